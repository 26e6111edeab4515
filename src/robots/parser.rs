//! Robots.txt parser implementation
//!
//! Only the `User-Agent: *` group is collected; rules addressed to specific
//! crawlers are ignored since the auditor identifies as a desktop browser.

use crate::robots::matcher::PathMatcher;
use serde::{Deserialize, Serialize};

/// Allow/disallow path patterns from the global robots.txt group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotsRules {
    /// `Allow:` patterns, as written
    pub allow: Vec<String>,
    /// `Disallow:` patterns, as written
    pub disallow: Vec<String>,
}

impl RobotsRules {
    /// Creates a permissive rule set that allows everything
    ///
    /// This is used when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses robots.txt content
    ///
    /// Directive names are matched case-insensitively. A `User-Agent:` line
    /// opens the global group only when its value is exactly `*`; any other
    /// value closes it. Blank lines, comments and unknown directives are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use sitemap_audit::robots::RobotsRules;
    ///
    /// let rules = RobotsRules::parse("User-agent: *\nDisallow: /admin\nAllow: /admin/public");
    /// assert_eq!(rules.disallow, vec!["/admin"]);
    /// assert_eq!(rules.allow, vec!["/admin/public"]);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut rules = Self::default();
        let mut in_global = false;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.to_ascii_lowercase().as_str() {
                "user-agent" => {
                    in_global = value == "*";
                }
                "disallow" if in_global => rules.disallow.push(value.to_string()),
                "allow" if in_global => rules.allow.push(value.to_string()),
                _ => {}
            }
        }

        rules
    }

    /// Returns true if no rules were collected
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty()
    }

    /// Checks whether a URL path may be crawled
    ///
    /// See [`PathMatcher::is_allowed`] for the precedence rules.
    pub fn is_allowed(&self, path: &str) -> bool {
        self.matcher().is_allowed(path)
    }

    /// Compiles the patterns for repeated matching
    pub fn matcher(&self) -> PathMatcher {
        PathMatcher::new(self)
    }
}
