//! Sitemap resolution against a mock server

use crate::common::{mount_get, sitemap_index, urlset};
use reqwest::Client;
use sitemap_audit::sitemap::gather_urls;
use sitemap_audit::AuditError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pages(base: &str, prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{}/{}-{}", base, prefix, i)).collect()
}

#[tokio::test]
async fn test_index_concatenates_children_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    let first = pages(&base, "a", 3);
    let second = pages(&base, "b", 4);
    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &sitemap_index(&[
            format!("{}/sitemap-a.xml", base),
            format!("{}/sitemap-b.xml", base),
        ]),
    )
    .await;
    mount_get(&server, "/sitemap-a.xml", 200, &urlset(&first)).await;
    mount_get(&server, "/sitemap-b.xml", 200, &urlset(&second)).await;

    let start = Url::parse(&format!("{}/sitemap.xml", base)).unwrap();
    let urls = gather_urls(&Client::new(), &start, 100).await.unwrap();

    let expected: Vec<String> = first.into_iter().chain(second).collect();
    assert_eq!(urls.len(), 7);
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_urlset_truncated_to_max() {
    let server = MockServer::start().await;
    let base = server.uri();
    let all = pages(&base, "page", 10);
    mount_get(&server, "/sitemap.xml", 200, &urlset(&all)).await;

    let start = Url::parse(&format!("{}/sitemap.xml", base)).unwrap();
    let urls = gather_urls(&Client::new(), &start, 5).await.unwrap();

    assert_eq!(urls, all[..5].to_vec());
}

#[tokio::test]
async fn test_index_stops_fetching_children_at_max() {
    let server = MockServer::start().await;
    let base = server.uri();
    let first = pages(&base, "a", 3);

    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &sitemap_index(&[
            format!("{}/sitemap-a.xml", base),
            format!("{}/sitemap-b.xml", base),
            format!("{}/sitemap-c.xml", base),
        ]),
    )
    .await;
    mount_get(&server, "/sitemap-a.xml", 200, &urlset(&first)).await;
    for (route, prefix) in [("/sitemap-b.xml", "b"), ("/sitemap-c.xml", "c")] {
        let body = urlset(&pages(&base, prefix, 2));
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(0)
            .mount(&server)
            .await;
    }

    let start = Url::parse(&format!("{}/sitemap.xml", base)).unwrap();
    let urls = gather_urls(&Client::new(), &start, 3).await.unwrap();

    assert_eq!(urls, first);
    server.verify().await;
}

#[tokio::test]
async fn test_failed_child_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();
    let good = pages(&base, "good", 2);

    mount_get(
        &server,
        "/sitemap.xml",
        200,
        &sitemap_index(&[
            format!("{}/missing.xml", base),
            format!("{}/good.xml", base),
        ]),
    )
    .await;
    mount_get(&server, "/missing.xml", 404, "not found").await;
    mount_get(&server, "/good.xml", 200, &urlset(&good)).await;

    let start = Url::parse(&format!("{}/sitemap.xml", base)).unwrap();
    let urls = gather_urls(&Client::new(), &start, 100).await.unwrap();

    assert_eq!(urls, good);
}

#[tokio::test]
async fn test_root_failure_is_an_error() {
    let server = MockServer::start().await;
    mount_get(&server, "/sitemap.xml", 500, "boom").await;

    let start = Url::parse(&format!("{}/sitemap.xml", server.uri())).unwrap();
    let err = gather_urls(&Client::new(), &start, 100).await.unwrap_err();

    match err {
        AuditError::SitemapStatus { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_duplicates_and_relative_entries() {
    let server = MockServer::start().await;
    let base = server.uri();
    let entries = vec![
        format!("{}/a", base),
        "/b".to_string(),
        format!("{}/a", base),
    ];
    mount_get(&server, "/sitemap.xml", 200, &urlset(&entries)).await;

    let start = Url::parse(&format!("{}/sitemap.xml", base)).unwrap();
    let urls = gather_urls(&Client::new(), &start, 100).await.unwrap();

    assert_eq!(urls, vec![format!("{}/a", base), format!("{}/b", base)]);
}
