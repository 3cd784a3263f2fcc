//! Static site outputs
//!
//! robots.txt and XML sitemaps rendered by string templating.

mod robots;
mod sitemap;

pub use robots::robots_txt;
pub use sitemap::{poetry_sitemap, poets_sitemap, sitemap_index, SitemapKind};
