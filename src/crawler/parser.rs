//! HTML parser for extracting SEO signals
//!
//! This module handles parsing a page's HTML to extract:
//! - Title, meta description, robots meta, canonical and `<html lang>`
//! - Headings and an approximate word count
//! - Images, stylesheets, scripts and preloaded fonts
//! - JSON-LD schema types, hreflang alternates and Open Graph tags
//!
//! Parsing never fails; missing elements become `None` or empty lists.

use crate::crawler::record::{Heading, HreflangLink, ImageRef};
use crate::url::resolve_url;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// Signals extracted from one HTML document
///
/// Asset lists hold resolved URLs in document order, not yet de-duplicated
/// or size-probed.
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    pub title: Option<String>,
    pub description: Option<String>,
    pub h1: Option<String>,
    pub headings: Vec<Heading>,
    pub word_count: usize,
    pub images: Vec<ImageRef>,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub fonts: Vec<String>,
    pub schema_types: Vec<String>,
    pub hreflang: Vec<HreflangLink>,
    pub canonical: Option<String>,
    pub meta_robots: Option<String>,
    pub open_graph: BTreeMap<String, Option<String>>,
    pub lang: Option<String>,
}

/// Parses HTML content and extracts SEO signals
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL relative references resolve against (the final URL)
///
/// # Example
///
/// ```
/// use sitemap_audit::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html lang="en"><head><title>Test</title></head><body><h1>Hello</h1></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let signals = parse_page(html, &base_url);
/// assert_eq!(signals.title.as_deref(), Some("Test"));
/// assert_eq!(signals.h1.as_deref(), Some("Hello"));
/// assert_eq!(signals.lang.as_deref(), Some("en"));
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        title: first_text(&document, "head > title"),
        description: first_attr(&document, r#"meta[name="description"]"#, "content"),
        h1: first_text(&document, "h1"),
        headings: extract_headings(&document),
        word_count: count_words(&document),
        images: extract_images(&document, base_url),
        stylesheets: extract_urls(&document, r#"link[rel="stylesheet"]"#, "href", base_url),
        scripts: extract_urls(&document, "script[src]", "src", base_url),
        fonts: extract_urls(
            &document,
            r#"link[rel="preload"][as="font"]"#,
            "href",
            base_url,
        ),
        schema_types: extract_schema_types(&document),
        hreflang: extract_hreflang(&document, base_url),
        canonical: first_attr(&document, r#"link[rel="canonical"]"#, "href")
            .and_then(|href| resolve_url(base_url, &href)),
        meta_robots: first_attr(&document, r#"meta[name="robots"]"#, "content"),
        open_graph: extract_open_graph(&document),
        lang: non_empty(document.root_element().value().attr("lang")),
    }
}

/// Selects all elements matching a CSS selector
fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::error!("Invalid selector {:?}: {:?}", css, e);
            Vec::new()
        }
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Trimmed text of the first match, `None` if absent or blank
fn first_text(document: &Html, css: &str) -> Option<String> {
    select(document, css)
        .first()
        .map(|element| element_text(element).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Attribute of the first match, `None` if absent or empty
fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    select(document, css)
        .first()
        .and_then(|element| non_empty(element.value().attr(attr)))
}

/// Collects a URL attribute from every match, resolved against `base_url`
///
/// A missing attribute resolves like an empty one (to the page itself);
/// unresolvable values are skipped.
fn extract_urls(document: &Html, css: &str, attr: &str, base_url: &Url) -> Vec<String> {
    select(document, css)
        .iter()
        .filter_map(|element| {
            let href = element.value().attr(attr).unwrap_or("");
            resolve_url(base_url, href)
        })
        .collect()
}

/// Extracts every heading in document order
fn extract_headings(document: &Html) -> Vec<Heading> {
    select(document, "h1, h2, h3, h4, h5, h6")
        .iter()
        .filter_map(|element| {
            let level = element.value().name().strip_prefix('h')?.parse().ok()?;
            Some(Heading {
                level,
                text: element_text(element).trim().to_string(),
            })
        })
        .collect()
}

/// Counts whitespace-separated words in the body text
fn count_words(document: &Html) -> usize {
    select(document, "body")
        .first()
        .map(|body| element_text(body).split_whitespace().count())
        .unwrap_or(0)
}

/// Extracts images, preferring `src` over lazy-loading `data-src`
fn extract_images(document: &Html, base_url: &Url) -> Vec<ImageRef> {
    select(document, "img")
        .iter()
        .filter_map(|element| {
            let attrs = element.value();
            let raw_src = attrs
                .attr("src")
                .filter(|s| !s.is_empty())
                .or_else(|| attrs.attr("data-src"))
                .unwrap_or("");
            let src = resolve_url(base_url, raw_src)?;

            Some(ImageRef {
                src,
                alt: non_empty(attrs.attr("alt").map(str::trim)),
                width: attrs.attr("width").and_then(|w| w.trim().parse().ok()),
                height: attrs.attr("height").and_then(|h| h.trim().parse().ok()),
                bytes: None,
            })
        })
        .collect()
}

/// Extracts `@type` values from JSON-LD blocks
///
/// Blocks that fail to parse are ignored.
fn extract_schema_types(document: &Html) -> Vec<String> {
    let mut types = Vec::new();

    for script in select(document, r#"script[type="application/ld+json"]"#) {
        let data: Value = match serde_json::from_str(&element_text(&script)) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };

        match &data {
            Value::Array(items) => types.extend(
                items
                    .iter()
                    .filter_map(|item| item.get("@type"))
                    .filter_map(type_label),
            ),
            other => types.extend(other.get("@type").and_then(type_label)),
        }
    }

    types
}

/// Renders a truthy `@type` value as a string
///
/// Multi-typed nodes (`"@type": ["A", "B"]`) become `"A,B"`.
fn type_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn extract_hreflang(document: &Html, base_url: &Url) -> Vec<HreflangLink> {
    select(document, r#"link[rel="alternate"][hreflang]"#)
        .iter()
        .filter_map(|element| {
            let attrs = element.value();
            Some(HreflangLink {
                href: resolve_url(base_url, attrs.attr("href").unwrap_or(""))?,
                lang: attrs.attr("hreflang").unwrap_or("").trim().to_string(),
            })
        })
        .collect()
}

/// Extracts `og:*` meta properties; later tags overwrite earlier ones
fn extract_open_graph(document: &Html) -> BTreeMap<String, Option<String>> {
    let mut open_graph = BTreeMap::new();

    for element in select(document, r#"meta[property^="og:"]"#) {
        let attrs = element.value();
        let key = attrs
            .attr("property")
            .and_then(|p| p.strip_prefix("og:"))
            .unwrap_or("");
        if key.is_empty() {
            continue;
        }
        open_graph.insert(key.to_string(), non_empty(attrs.attr("content")));
    }

    open_graph
}
