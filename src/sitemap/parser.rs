//! Sitemap XML parser
//!
//! Sitemaps are parsed with the same lenient HTML5 tree builder used for
//! pages. Unknown elements such as `<urlset>` and `<loc>` are kept as generic
//! elements, so `<loc>` entries can be selected by tag structure.

use scraper::{Html, Selector};

/// Kind of sitemap document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<sitemapindex>`: locations are child sitemaps
    Index,
    /// `<urlset>`: locations are pages
    UrlSet,
}

/// Locations listed by a sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub kind: SitemapKind,
    /// Trimmed `<loc>` values in document order (empty entries dropped)
    pub locations: Vec<String>,
}

/// Parses a sitemap or sitemap index
///
/// # Example
///
/// ```
/// use sitemap_audit::sitemap::{parse_sitemap, SitemapKind};
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/</loc></url>
///   <url><loc> https://example.com/about </loc></url>
/// </urlset>"#;
///
/// let parsed = parse_sitemap(xml);
/// assert_eq!(parsed.kind, SitemapKind::UrlSet);
/// assert_eq!(parsed.locations, vec!["https://example.com/", "https://example.com/about"]);
/// ```
pub fn parse_sitemap(xml: &str) -> ParsedSitemap {
    let document = Html::parse_document(&strip_cdata(xml));

    let kind = if matches_any(&document, "sitemapindex") {
        SitemapKind::Index
    } else {
        SitemapKind::UrlSet
    };

    let loc_selector = match kind {
        SitemapKind::Index => "sitemap > loc",
        SitemapKind::UrlSet => "url > loc",
    };

    ParsedSitemap {
        kind,
        locations: select_text(&document, loc_selector),
    }
}

/// Removes CDATA markers so wrapped locations survive HTML tokenization
fn strip_cdata(xml: &str) -> String {
    xml.replace("<![CDATA[", "").replace("]]>", "")
}

fn matches_any(document: &Html, css: &str) -> bool {
    Selector::parse(css)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

fn select_text(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect()
}
