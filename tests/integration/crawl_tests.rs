//! End-to-end audit runs against a mock site

use crate::common::{mount_get, mount_html, test_config, urlset};
use sitemap_audit::crawler::{run_audit, Coordinator};
use sitemap_audit::output::{read_results, JsonFileSink};
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLIC_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <title>Public Page</title>
  <meta name="description" content="A public page">
  <link rel="canonical" href="/public">
  <link rel="stylesheet" href="/static/site.css">
  <script type="application/ld+json">{"@type": "WebPage"}</script>
</head>
<body>
  <h1>Welcome</h1>
  <p>Hello there world</p>
  <img src="/hero.jpg" alt="Hero">
  <script src="/static/app.js"></script>
  <script src="http://127.0.0.1:1/offline.js"></script>
</body>
</html>"#;

async fn mount_site(server: &MockServer) {
    let base = server.uri();
    mount_get(
        server,
        "/robots.txt",
        200,
        "User-agent: *\nDisallow: /private\n",
    )
    .await;
    mount_get(
        server,
        "/sitemap.xml",
        200,
        &urlset(&[format!("{}/private", base), format!("{}/public", base)]),
    )
    .await;
    mount_html(server, "/public", PUBLIC_PAGE).await;
    mount_html(server, "/private", "<html><title>Secret</title></html>").await;
    mount_head(server, "/static/site.css", 1234, None).await;
    mount_head(server, "/static/app.js", 4321, Some("gzip")).await;
}

/// Answers HEAD requests to `route` advertising `len` bytes
async fn mount_head(server: &MockServer, route: &str, len: usize, encoding: Option<&str>) {
    let mut response = ResponseTemplate::new(200)
        .insert_header("content-length", len.to_string().as_str())
        .set_body_bytes(vec![b'x'; len]);
    if let Some(encoding) = encoding {
        response = response.insert_header("content-encoding", encoding);
    }
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_disallowed_urls_are_not_audited() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = tempdir().unwrap();
    let config = test_config(&format!("{}/sitemap.xml", server.uri()), dir.path());
    let results_path = config.output.results_path.clone();

    let results = run_audit(config).await.unwrap();

    assert_eq!(results.len(), 1);
    let record = &results[0];
    assert_eq!(record.url, format!("{}/public", server.uri()));
    assert_eq!(record.status, Some(200));
    assert_eq!(record.title.as_deref(), Some("Public Page"));
    assert_eq!(record.description.as_deref(), Some("A public page"));
    assert_eq!(record.h1.as_deref(), Some("Welcome"));
    assert_eq!(record.lang.as_deref(), Some("en"));
    assert_eq!(record.schema_types, vec!["WebPage".to_string()]);
    assert_eq!(record.canonical, Some(format!("{}/public", server.uri())));

    assert_eq!(record.css.len(), 1);
    assert_eq!(record.css[0].href, format!("{}/static/site.css", server.uri()));
    assert_eq!(record.css[0].bytes, Some(1234));

    assert_eq!(record.js.len(), 2);
    assert_eq!(record.js[0].src, format!("{}/static/app.js", server.uri()));
    assert_eq!(record.js[0].bytes, Some(4321));
    assert_eq!(record.js[1].src, "http://127.0.0.1:1/offline.js");
    assert_eq!(record.js[1].bytes, None);

    assert_eq!(record.images.len(), 1);
    assert_eq!(record.images[0].alt.as_deref(), Some("Hero"));

    let on_disk = read_results(Path::new(&results_path)).unwrap();
    assert_eq!(on_disk, results);
}

#[tokio::test]
async fn test_plan_reports_disallowed_urls() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = tempdir().unwrap();
    let config = test_config(&format!("{}/sitemap.xml", server.uri()), dir.path());

    let plan = Coordinator::new(config).unwrap().plan().await.unwrap();

    assert_eq!(plan.discovered.len(), 2);
    assert_eq!(plan.allowed, vec![format!("{}/public", server.uri())]);
    assert_eq!(plan.disallowed_count(), 1);
    assert_eq!(plan.rules.disallow, vec!["/private".to_string()]);
}

#[tokio::test]
async fn test_unreachable_page_is_recorded_without_status() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &urlset(&["http://127.0.0.1:1/down".to_string(), format!("{}/up", base)]),
    )
    .await;
    mount_html(&server, "/up", "<html lang=\"ja\"><h1>Up</h1></html>").await;
    let dir = tempdir().unwrap();
    let config = test_config(&format!("{}/sitemap.xml", base), dir.path());

    let results = run_audit(config).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "http://127.0.0.1:1/down");
    assert_eq!(results[0].status, None);
    assert_eq!(results[0].final_url, None);
    assert!(results[0].headings.is_empty());
    assert_eq!(results[1].status, Some(200));
    assert_eq!(results[1].h1.as_deref(), Some("Up"));
}

#[tokio::test]
async fn test_http_error_pages_are_still_audited() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &urlset(&[format!("{}/gone", base)]),
    )
    .await;
    mount_get(
        &server,
        "/gone",
        404,
        "<html><title>Not Found</title></html>",
    )
    .await;
    let dir = tempdir().unwrap();
    let config = test_config(&format!("{}/sitemap.xml", base), dir.path());

    let results = run_audit(config).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, Some(404));
    assert_eq!(results[0].title.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn test_checkpointed_file_holds_all_results() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages: Vec<String> = (1..=3).map(|i| format!("{}/p{}", base, i)).collect();
    mount_get(&server, "/sitemap.xml", 200, &urlset(&pages)).await;
    for i in 1..=3 {
        mount_html(
            &server,
            &format!("/p{}", i),
            &format!("<html><title>Page {}</title></html>", i),
        )
        .await;
    }
    let dir = tempdir().unwrap();
    let mut config = test_config(&format!("{}/sitemap.xml", base), dir.path());
    config.crawl.checkpoint_every = 2;
    let results_path = dir.path().join("nested").join("out.json");
    let mut sink = JsonFileSink::new(&results_path);

    let coordinator = Coordinator::new(config).unwrap();
    let results = coordinator.run(&mut sink).await.unwrap();

    let on_disk = read_results(&results_path).unwrap();
    assert_eq!(on_disk.len(), 3);
    assert_eq!(on_disk, results);
    let titles: Vec<_> = on_disk.iter().filter_map(|r| r.title.clone()).collect();
    assert_eq!(titles, vec!["Page 1", "Page 2", "Page 3"]);
}

#[tokio::test]
async fn test_zero_max_urls_writes_empty_results() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &urlset(&[format!("{}/a", base)]),
    )
    .await;
    let dir = tempdir().unwrap();
    let mut config = test_config(&format!("{}/sitemap.xml", base), dir.path());
    config.crawl.max_urls = 0;
    let results_path = config.output.results_path.clone();

    let results = run_audit(config).await.unwrap();

    assert!(results.is_empty());
    let content = std::fs::read_to_string(results_path).unwrap();
    assert_eq!(content.trim(), "[]");
}

#[tokio::test]
async fn test_root_sitemap_failure_aborts_run() {
    let server = MockServer::start().await;
    mount_get(&server, "/sitemap.xml", 503, "unavailable").await;
    let dir = tempdir().unwrap();
    let config = test_config(&format!("{}/sitemap.xml", server.uri()), dir.path());
    let results_path = config.output.results_path.clone();

    assert!(run_audit(config).await.is_err());
    assert!(!Path::new(&results_path).exists());
}
