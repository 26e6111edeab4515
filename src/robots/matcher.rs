use crate::robots::RobotsRules;
use regex::Regex;

/// A robots.txt pattern compiled to a regular expression
#[derive(Debug, Clone)]
struct CompiledPattern {
    /// Length of the pattern as written, used for longest-match precedence
    len: usize,
    regex: Regex,
}

impl CompiledPattern {
    fn compile(pattern: &str) -> Option<Self> {
        let regex = pattern_regex(pattern)?;
        Some(Self {
            len: pattern.chars().count(),
            regex,
        })
    }
}

/// Pre-compiled allow/disallow patterns
///
/// Built once per run from [`RobotsRules`] so each URL check does not
/// recompile the patterns.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    allow: Vec<CompiledPattern>,
    disallow: Vec<CompiledPattern>,
}

impl PathMatcher {
    /// Compiles every non-empty pattern of `rules`
    pub fn new(rules: &RobotsRules) -> Self {
        let compile_all = |patterns: &[String]| {
            patterns
                .iter()
                .filter_map(|p| CompiledPattern::compile(p))
                .collect::<Vec<_>>()
        };

        Self {
            allow: compile_all(&rules.allow),
            disallow: compile_all(&rules.disallow),
        }
    }

    /// Checks whether a URL path may be crawled
    ///
    /// A path is allowed when no disallow pattern matches it, or when the
    /// longest matching allow pattern is strictly longer than the longest
    /// matching disallow pattern. Equal lengths resolve to disallowed.
    ///
    /// # Example
    ///
    /// ```
    /// use sitemap_audit::robots::RobotsRules;
    ///
    /// let rules = RobotsRules::parse("User-agent: *\nDisallow: /a\nAllow: /a/public");
    /// let matcher = rules.matcher();
    /// assert!(matcher.is_allowed("/a/public/page"));
    /// assert!(!matcher.is_allowed("/a/private"));
    /// assert!(matcher.is_allowed("/b"));
    /// ```
    pub fn is_allowed(&self, path: &str) -> bool {
        let Some(longest_disallow) = longest_match(&self.disallow, path) else {
            return true;
        };

        let longest_allow = longest_match(&self.allow, path).unwrap_or(0);
        longest_allow > longest_disallow
    }
}

/// Returns the length of the longest pattern matching `path`
fn longest_match(patterns: &[CompiledPattern], path: &str) -> Option<usize> {
    patterns
        .iter()
        .filter(|p| p.regex.is_match(path))
        .map(|p| p.len)
        .max()
}

/// Builds the regular expression for a robots.txt pattern
///
/// Regex metacharacters are escaped, `*` becomes `.*`, and the expression is
/// anchored at the start only, so the pattern acts as a prefix. An empty
/// pattern yields `None` because it never matches.
fn pattern_regex(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }

    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{}", body)).ok()
}

/// Checks if a URL path matches a single robots.txt pattern
///
/// # Examples
///
/// ```
/// use sitemap_audit::robots::path_matches;
///
/// assert!(path_matches("/admin/x", "/admin"));
/// assert!(path_matches("/shop/item.html", "/shop/*.html"));
/// assert!(!path_matches("/public", "/admin"));
/// assert!(!path_matches("/anything", ""));
/// ```
pub fn path_matches(path: &str, pattern: &str) -> bool {
    pattern_regex(pattern).is_some_and(|regex| regex.is_match(path))
}
