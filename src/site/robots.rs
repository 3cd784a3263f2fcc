//! robots.txt generation

/// Paths crawlers must not visit
const DISALLOWED: &[&str] = &["/admin", "/api"];

/// Render robots.txt for the site at `base_url`
pub fn robots_txt(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED {
        out.push_str(&format!("Disallow: {}\n", path));
    }
    out.push_str(&format!("\nSitemap: {}/sitemap.xml\n", base));
    out
}
