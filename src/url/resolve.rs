use std::collections::HashSet;
use url::Url;

/// Resolves an href against a base URL
///
/// An empty href resolves to the base itself (minus any fragment), matching
/// how browsers treat `src=""`. Returns `None` if the result is not a valid URL.
///
/// # Examples
///
/// ```
/// use sitemap_audit::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/blog/post").unwrap();
/// assert_eq!(resolve_url(&base, "/img/a.png").as_deref(), Some("https://example.com/img/a.png"));
/// assert_eq!(resolve_url(&base, "b.css").as_deref(), Some("https://example.com/blog/b.css"));
/// ```
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

/// Returns the path component of a URL string, or `None` if it does not parse
///
/// The query string is not part of the path, so robots rules are matched
/// against the path alone.
pub fn url_path(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|u| u.path().to_string())
}

/// Removes duplicates, keeping the first occurrence of each item
pub fn dedupe_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
