use sitemap_audit::config::Config;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at `start_url` with output under `dir`
pub fn test_config(start_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawl.start_url = start_url.to_string();
    config.crawl.request_delay_ms = 0;
    config.crawl.request_timeout_secs = 5;
    config.user_agent.value = "AuditTestBot/1.0".to_string();
    config.output.results_path = dir.join("results.json").to_string_lossy().into_owned();
    config.output.issues_path = dir.join("issues.csv").to_string_lossy().into_owned();
    config.output.summary_path = dir.join("summary.md").to_string_lossy().into_owned();
    config
}

/// Builds a `<urlset>` document from page URLs
pub fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("  <url><loc>{}</loc></url>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

/// Builds a `<sitemapindex>` document from child sitemap URLs
pub fn sitemap_index(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|u| format!("  <sitemap><loc>{}</loc></sitemap>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

/// Serves `body` for GET requests to `route`
pub async fn mount_get(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves an HTML page for GET requests to `route`
pub async fn mount_html(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}
