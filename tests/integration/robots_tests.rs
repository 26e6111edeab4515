//! robots.txt fetching against a mock server

use crate::common::mount_get;
use reqwest::Client;
use sitemap_audit::robots::fetch_robots;
use url::Url;
use wiremock::MockServer;

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/sitemap.xml", server.uri())).unwrap();

    let rules = fetch_robots(&Client::new(), &base).await;

    assert!(rules.is_empty());
    assert!(rules.is_allowed("/anything"));
}

#[tokio::test]
async fn test_only_wildcard_group_applies() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/robots.txt",
        200,
        "User-agent: Googlebot\nDisallow: /google-only\n\nUser-agent: *\nDisallow: /private\nAllow: /private/open\n",
    )
    .await;
    let base = Url::parse(&format!("{}/sitemap.xml", server.uri())).unwrap();

    let rules = fetch_robots(&Client::new(), &base).await;

    assert_eq!(rules.disallow, vec!["/private".to_string()]);
    assert_eq!(rules.allow, vec!["/private/open".to_string()]);
    assert!(rules.is_allowed("/google-only"));
    assert!(!rules.is_allowed("/private/secret"));
    assert!(rules.is_allowed("/private/open/page"));
}

#[tokio::test]
async fn test_unreachable_host_allows_everything() {
    let base = Url::parse("http://127.0.0.1:1/sitemap.xml").unwrap();
    let rules = fetch_robots(&Client::new(), &base).await;
    assert!(rules.is_empty());
}
