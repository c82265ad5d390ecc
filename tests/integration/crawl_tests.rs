//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sumi_tally::config::{parse_config, Config, CrawlConfig};
use sumi_tally::crawler::{crawl, Crawler, FetchError, HttpFetcher, PageFetcher};
use sumi_tally::output::{MarkdownOutput, OutputHandler, StdoutOutput};
use sumi_tally::PageOutcome;
use wiremock::matchers::{header_regex, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `route` linking to each of `links`
async fn mount_page(server: &MockServer, route: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect();

    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    format!(
                        "<html><head><title>{}</title></head><body>{}</body></html>",
                        route, anchors
                    ),
                    "text/html; charset=utf-8",
                ),
        )
        .mount(server)
        .await;
}

/// Normalized key prefix for pages on the mock server ("127.0.0.1:PORT")
fn host_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

#[tokio::test]
async fn test_full_crawl_counts_internal_links() {
    let mock_server = MockServer::start().await;
    let host = host_of(&mock_server);

    mount_page(&mock_server, "/", &["/page1", "/page2"]).await;
    mount_page(&mock_server, "/page1", &["/page2", "/"]).await;
    mount_page(&mock_server, "/page2", &[]).await;

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 3, 10).unwrap();
    let report = crawl(crawl_config, &Config::default())
        .await
        .expect("Crawl failed");

    assert_eq!(report.len(), 3);
    assert_eq!(report.count_for(&host), Some(2));
    assert_eq!(report.count_for(&format!("{}/page1", host)), Some(1));
    assert_eq!(report.count_for(&format!("{}/page2", host)), Some(2));
    assert_eq!(report.statistics.count(PageOutcome::Done), 3);
    assert_eq!(report.statistics.errors(), 0);

    // Ties on count are broken by key
    let text = report.render_text();
    let root_line = format!("Found 2 internal links to http://{}\n", host);
    let page2_line = format!("Found 2 internal links to http://{}/page2\n", host);
    let page1_line = format!("Found 1 internal links to http://{}/page1\n", host);
    let root_pos = text.find(&root_line).expect("missing root line");
    let page2_pos = text.find(&page2_line).expect("missing page2 line");
    let page1_pos = text.find(&page1_line).expect("missing page1 line");
    assert!(root_pos < page2_pos);
    assert!(page2_pos < page1_pos);
}

#[tokio::test]
async fn test_each_page_fetched_once_in_cycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/a">a</a><a href="/a/">a again</a>"#, "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Whichever of "/a" and "/a/" claims the key first is the one fetched
    Mock::given(method("GET"))
        .and(path_regex("^/a/?$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    r#"<a href="/">home</a><a href="http://127.0.0.1/">elsewhere</a>"#,
                    "text/html",
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 4, 50).unwrap();
    let report = crawl(crawl_config, &Config::default()).await.unwrap();

    let host = host_of(&mock_server);
    assert_eq!(report.len(), 2);
    assert_eq!(report.count_for(&format!("{}/a", host)), Some(2));
    assert_eq!(report.count_for(&host), Some(2));
}

#[tokio::test]
async fn test_single_page_limit_never_fetches_children() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/child1", "/child2", "/child3"]).await;

    for child in ["/child1", "/child2", "/child3"] {
        Mock::given(method("GET"))
            .and(path(child))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 2, 1).unwrap();
    let report = crawl(crawl_config, &Config::default()).await.unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.count_for(&host_of(&mock_server)), Some(1));
}

#[tokio::test]
async fn test_off_host_links_are_not_fetched() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    let other_page = format!("{}/elsewhere", other.uri());
    mount_page(&site, "/", &["/local", &other_page]).await;
    mount_page(&site, "/local", &[]).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&other)
        .await;

    let crawl_config = CrawlConfig::new(&site.uri(), 2, 10).unwrap();
    let report = crawl(crawl_config, &Config::default()).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.count_for(&host_of(&other)), None);
    assert_eq!(report.count_for(&format!("{}/elsewhere", host_of(&other))), None);
    assert_eq!(report.statistics.count(PageOutcome::ScopeRejected), 1);
}

#[tokio::test]
async fn test_non_html_and_missing_pages_end_only_their_branch() {
    let mock_server = MockServer::start().await;
    let host = host_of(&mock_server);

    mount_page(&mock_server, "/", &["/data.json", "/missing", "/docs"]).await;
    mount_page(&mock_server, "/docs", &["/docs/intro"]).await;
    mount_page(&mock_server, "/docs/intro", &[]).await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"href": "/never"}"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    // Unmatched routes ("/missing") get wiremock's default 404

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 3, 20).unwrap();
    let report = crawl(crawl_config, &Config::default()).await.unwrap();

    // Failed pages were still claimed and counted
    assert_eq!(report.count_for(&format!("{}/data.json", host)), Some(1));
    assert_eq!(report.count_for(&format!("{}/missing", host)), Some(1));
    assert_eq!(report.count_for(&format!("{}/docs/intro", host)), Some(1));
    assert_eq!(report.count_for(&format!("{}/never", host)), None);
    assert_eq!(report.statistics.count(PageOutcome::FetchFailed), 2);
    assert_eq!(report.statistics.count(PageOutcome::Done), 3);
}

#[tokio::test]
async fn test_http_fetcher_classifies_responses() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/ok", &[]).await;

    Mock::given(method("GET"))
        .and(path("/image.png"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&Config::default()).unwrap();
    let base = mock_server.uri();

    let page = fetcher.fetch(&format!("{}/ok", base)).await.unwrap();
    assert_eq!(page.status_code, 200);
    assert!(page.content_type.starts_with("text/html"));
    assert!(page.body.contains("<title>/ok</title>"));

    let result = fetcher.fetch(&format!("{}/image.png", base)).await;
    assert_eq!(
        result.unwrap_err(),
        FetchError::UnsupportedContentType("image/png".to_string())
    );

    let result = fetcher.fetch(&format!("{}/broken", base)).await;
    assert_eq!(result.unwrap_err(), FetchError::HttpStatus(503));
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", "^TallyTest/2\\.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>hello</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = parse_config(
        r#"
        [user-agent]
        crawler-name = "TallyTest"
        crawler-version = "2.0"
        "#,
    )
    .unwrap();

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 1, 5).unwrap();
    let crawler = Crawler::from_config(crawl_config, &config).unwrap();
    let report = crawler.run().await;

    assert_eq!(report.statistics.count(PageOutcome::Done), 1);
}

#[tokio::test]
async fn test_reports_written_to_outputs() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/about"]).await;
    mount_page(&mock_server, "/about", &["/"]).await;

    let crawl_config = CrawlConfig::new(&mock_server.uri(), 2, 10).unwrap();
    let report = crawl(crawl_config, &Config::default()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("summary.md");
    MarkdownOutput::new(&summary).write_report(&report).unwrap();

    let markdown = std::fs::read_to_string(&summary).unwrap();
    assert!(markdown.starts_with("# Sumi-Tally Crawl Report"));
    assert!(markdown.contains(&format!("http://{}/about", host_of(&mock_server))));

    let text = StdoutOutput {
        include_statistics: true,
    }
    .render(&report);
    assert!(text.contains(&format!("  REPORT for {}\n", mock_server.uri())));
    assert!(text.contains("Found 2 internal links to"));
}
