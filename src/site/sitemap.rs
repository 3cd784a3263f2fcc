//! XML sitemap generation
//!
//! One sitemap index pointing at per-language poetry and poet sitemaps.

use crate::index::Docstore;
use crate::rewriter::Lang;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use urlencoding::encode;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Which sitemap document to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Index,
    Poetry,
    Poets,
}

impl FromStr for SitemapKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "index" => Ok(SitemapKind::Index),
            "poetry" => Ok(SitemapKind::Poetry),
            "poets" => Ok(SitemapKind::Poets),
            other => Err(anyhow!(
                "Unknown sitemap kind '{}'. Valid kinds: index, poetry, poets",
                other
            )),
        }
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn urlset(locs: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("{}\n<urlset xmlns=\"{}\">\n", XML_HEADER, SITEMAP_NS);
    for loc in locs {
        out.push_str(&format!("  <url><loc>{}</loc></url>\n", xml_escape(&loc)));
    }
    out.push_str("</urlset>\n");
    out
}

/// Sitemap index listing the poetry and poet sitemaps of every language
pub fn sitemap_index(base_url: &str, lastmod: DateTime<Utc>) -> String {
    let base = base_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut out = format!("{}\n<sitemapindex xmlns=\"{}\">\n", XML_HEADER, SITEMAP_NS);
    for lang in Lang::ALL {
        for kind in ["poetry", "poets"] {
            let loc = format!("{}/sitemap-{}-{}.xml", base, kind, lang);
            out.push_str(&format!(
                "  <sitemap><loc>{}</loc><lastmod>{}</lastmod></sitemap>\n",
                xml_escape(&loc),
                lastmod
            ));
        }
    }
    out.push_str("</sitemapindex>\n");
    out
}

/// URL set of every poem in `lang`
pub fn poetry_sitemap(base_url: &str, lang: Lang, docstore: &Docstore) -> String {
    let base = base_url.trim_end_matches('/');
    urlset(
        docstore
            .poems_in(lang)
            .into_iter()
            .map(|poem| format!("{}/{}/poetry/{}", base, lang, encode(&poem.slug))),
    )
}

/// URL set of every poet with at least one poem, one URL per language
pub fn poets_sitemap(base_url: &str, lang: Lang, docstore: &Docstore) -> String {
    let base = base_url.trim_end_matches('/');
    let mut slugs: Vec<String> = docstore
        .list_poets()
        .into_iter()
        .map(|(poet, _)| poet.slug)
        .collect();
    slugs.sort();
    slugs.dedup();
    urlset(
        slugs
            .into_iter()
            .map(|slug| format!("{}/{}/poets/{}", base, lang, encode(&slug))),
    )
}
