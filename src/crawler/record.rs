//! Audit record types
//!
//! These are the records written to the results file. Field names are
//! serialized in camelCase so the file stays compatible with existing
//! dashboards reading `sitemap-crawl.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A heading element (`h1`..`h6`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// An `<img>` reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Only present when image probing is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// A stylesheet or preloaded font, with its HEAD-probed size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAsset {
    pub href: String,
    pub bytes: Option<u64>,
}

/// An external script, with its HEAD-probed size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptAsset {
    pub src: String,
    pub bytes: Option<u64>,
}

/// A `<link rel="alternate" hreflang>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HreflangLink {
    pub href: String,
    pub lang: String,
}

/// SEO audit of a single URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAudit {
    /// The URL as listed in the sitemap
    pub url: String,
    pub status: Option<u16>,
    /// URL after redirects
    pub final_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub h1: Option<String>,
    #[serde(default)]
    pub headings: Vec<Heading>,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub css: Vec<LinkedAsset>,
    #[serde(default)]
    pub js: Vec<ScriptAsset>,
    #[serde(default)]
    pub fonts: Vec<LinkedAsset>,
    #[serde(default)]
    pub schema_types: Vec<String>,
    #[serde(default)]
    pub hreflang: Vec<HreflangLink>,
    pub canonical: Option<String>,
    pub meta_robots: Option<String>,
    #[serde(default)]
    pub open_graph: BTreeMap<String, Option<String>>,
    pub lang: Option<String>,
}

impl UrlAudit {
    /// Builds the record for a page that could not be fetched or read
    ///
    /// Whatever was learned before the failure (status, final URL) is kept;
    /// every content field is empty.
    pub fn failed(url: &str, status: Option<u16>, final_url: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            status,
            final_url,
            title: None,
            description: None,
            h1: None,
            headings: Vec::new(),
            word_count: 0,
            images: Vec::new(),
            css: Vec::new(),
            js: Vec::new(),
            fonts: Vec::new(),
            schema_types: Vec::new(),
            hreflang: Vec::new(),
            canonical: None,
            meta_robots: None,
            open_graph: BTreeMap::new(),
            lang: None,
        }
    }

    /// Number of level-1 headings on the page
    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.level == 1).count()
    }
}
