//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use crawl_check::config::Config;
use crawl_check::crawler::Coordinator;
use crawl_check::output::ErrorPolicy;
use crawl_check::{CrawlCheckError, FetchError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let uri = url::Url::parse(&server.uri()).expect("Failed to parse mock server URI");

    let mut config = Config::default();
    config.target.host = uri.host_str().expect("Mock server has no host").to_string();
    config.target.port = uri.port().expect("Mock server has no port").to_string();
    config.crawler.concurrent = 5;
    config.crawler.check_queue_interval = 10; // Very short for testing
    config
}

/// A 200 response whose body links to each of `links`
fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();

    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

/// Mounts a GET mock for `route` that must be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_visits_each_page_once() {
    let mock_server = MockServer::start().await;

    // A -> B, C; B -> C; C -> A (cycle back to the seed)
    mount_page(&mock_server, "/", html_page(&["/b", "/c"]), 1).await;
    mount_page(&mock_server, "/b", html_page(&["/c", "/"]), 1).await;
    mount_page(&mock_server, "/c", html_page(&["/"]), 1).await;

    let mut coordinator =
        Coordinator::new(create_test_config(&mock_server)).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.visited, 3);
    assert_eq!(report.summary_line(), "Visited 3 unique URLs");
    assert!(!report.has_errors());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(coordinator.in_flight(), 0);

    // Wiremock verifies the exactly-once expectations when mock_server drops
}

#[tokio::test]
async fn test_relative_and_absolute_same_host_links_are_unified() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(&[
            "docs/",
            &format!("{}/docs/", base_url),
            "/docs/#install",
            "/docs/?tab=2",
        ]),
        1,
    )
    .await;
    mount_page(&mock_server, "/docs/", html_page(&["intro", "../"]), 1).await;
    mount_page(&mock_server, "/docs/intro", html_page(&[]), 1).await;

    let report = Coordinator::new(create_test_config(&mock_server))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 3);
}

#[tokio::test]
async fn test_foreign_host_never_fetched() {
    let mock_server = MockServer::start().await;
    let foreign_server = MockServer::start().await;

    // Same machine, but "localhost" is a different host name than "127.0.0.1"
    let foreign_port = url::Url::parse(&foreign_server.uri())
        .expect("Failed to parse foreign URI")
        .port()
        .expect("Foreign server has no port");
    let foreign_link = format!("http://localhost:{}/outside", foreign_port);

    mount_page(
        &mock_server,
        "/",
        html_page(&[&foreign_link, "https://example.com/"]),
        1,
    )
    .await;
    mount_page(&foreign_server, "/outside", html_page(&[]), 0).await;

    let report = Coordinator::new(create_test_config(&mock_server))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 1);
}

#[tokio::test]
async fn test_reserved_prefix_never_fetched() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html_page(&["/cdn-cgi/l/email-protection", "/contact"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/contact", html_page(&[]), 1).await;
    mount_page(
        &mock_server,
        "/cdn-cgi/l/email-protection",
        html_page(&[]),
        0,
    )
    .await;

    let report = Coordinator::new(create_test_config(&mock_server))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 2);
}

#[tokio::test]
async fn test_collect_all_dedupes_by_source() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(&["/missing-one", "/missing-two", "/ok"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/ok", html_page(&["/missing-three"]), 1).await;
    mount_page(&mock_server, "/missing-one", ResponseTemplate::new(404), 1).await;
    mount_page(&mock_server, "/missing-two", ResponseTemplate::new(404), 1).await;
    mount_page(&mock_server, "/missing-three", ResponseTemplate::new(500), 1).await;

    let mut config = create_test_config(&mock_server);
    config.crawler.all_errors = true;

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.policy, ErrorPolicy::CollectAll);
    assert_eq!(report.visited, 5);
    assert_eq!(report.exit_code(), 1);

    // Two failing links on "/" collapse into one record; "/ok" gets its own
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].source, format!("{}/", base_url));
    assert!(report.errors[0].url.contains("/missing-"));
    assert_eq!(report.errors[1].source, format!("{}/ok", base_url));
    assert_eq!(report.errors[1].url, format!("{}/missing-three", base_url));
}

#[tokio::test]
async fn test_stop_on_first_error_halts_dispatch() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Discoveries are pushed to the front, so "/broken" is dispatched before "/after"
    mount_page(&mock_server, "/", html_page(&["/after", "/broken"]), 1).await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500), 1).await;
    mount_page(&mock_server, "/after", html_page(&[]), 0).await;

    let mut config = create_test_config(&mock_server);
    config.crawler.concurrent = 1;

    let result = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    match result {
        Err(CrawlCheckError::Fatal(FetchError::Status {
            url,
            found_on,
            status,
        })) => {
            assert_eq!(url, format!("{}/broken", base_url));
            assert_eq!(found_on, format!("{}/", base_url));
            assert_eq!(status, 500);
        }
        other => panic!("Expected a fatal status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_specific_paths_skip_link_discovery() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/a", html_page(&["/c"]), 1).await;
    mount_page(&mock_server, "/b", html_page(&["/c", "/"]), 1).await;
    mount_page(&mock_server, "/c", html_page(&[]), 0).await;
    mount_page(&mock_server, "/", html_page(&[]), 0).await;

    let mut config = create_test_config(&mock_server);
    config.specific_paths = vec!["/a".to_string(), "/b".to_string()];

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 2);
}

#[tokio::test]
async fn test_specific_path_failure_reports_seed_source() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/gone", ResponseTemplate::new(410), 1).await;

    let mut config = create_test_config(&mock_server);
    config.specific_paths = vec!["/gone".to_string()];
    config.crawler.all_errors = true;

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].source, "seed");
    assert!(report.render_errors().starts_with("seed -> "));
}

#[tokio::test]
async fn test_single_slot_crawl_is_depth_first() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", html_page(&["/a", "/b"]), 1).await;
    mount_page(&mock_server, "/a", html_page(&["/a1"]), 1).await;
    mount_page(&mock_server, "/a1", html_page(&[]), 1).await;
    mount_page(&mock_server, "/b", html_page(&[]), 1).await;

    let mut config = create_test_config(&mock_server);
    config.crawler.concurrent = 1;

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");
    assert_eq!(report.visited, 4);

    // With one slot, fetches are strictly sequential and follow queue order
    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let order: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(order, vec!["/", "/b", "/a", "/a1"]);
}

#[tokio::test]
async fn test_transport_error_is_fatal() {
    // Bind then drop a listener so nothing is serving on the port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);

    let mut config = Config::default();
    config.target.host = "127.0.0.1".to_string();
    config.target.port = port.to_string();
    config.crawler.check_queue_interval = 10;

    let result = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    match result {
        Err(CrawlCheckError::Fatal(FetchError::Transport { found_on, .. })) => {
            assert_eq!(found_on, "seed");
        }
        other => panic!("Expected a fatal transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", html_page(&["/docs"]), 1).await;
    mount_page(
        &mock_server,
        "/docs",
        ResponseTemplate::new(301).insert_header("location", "/docs/"),
        1,
    )
    .await;
    mount_page(&mock_server, "/docs/", html_page(&["intro"]), 1).await;
    mount_page(&mock_server, "/docs/intro", html_page(&[]), 1).await;
    mount_page(&mock_server, "/intro", html_page(&[]), 0).await;

    let mut config = create_test_config(&mock_server);
    config.crawler.all_errors = true;

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 3);
    assert!(report.errors.is_empty(), "unexpected errors: {:?}", report.errors);
}

#[tokio::test]
async fn test_off_host_redirect_target_is_not_parsed() {
    let mock_server = MockServer::start().await;
    let foreign_server = MockServer::start().await;

    let foreign_port = url::Url::parse(&foreign_server.uri())
        .expect("Failed to parse foreign URI")
        .port()
        .expect("Foreign server has no port");

    mount_page(&mock_server, "/", html_page(&["/login"]), 1).await;
    mount_page(
        &mock_server,
        "/login",
        ResponseTemplate::new(302)
            .insert_header("location", format!("http://localhost:{}/sso", foreign_port)),
        1,
    )
    .await;
    mount_page(&foreign_server, "/sso", html_page(&["/account"]), 1).await;
    mount_page(&mock_server, "/account", html_page(&[]), 0).await;

    let report = Coordinator::new(create_test_config(&mock_server))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.visited, 2);
}

#[tokio::test]
async fn test_in_flight_requests_never_exceed_ceiling() {
    let mock_server = MockServer::start().await;
    let delay = Duration::from_millis(300);

    mount_page(&mock_server, "/", html_page(&["/s1", "/s2", "/s3"]), 1).await;
    for route in ["/s1", "/s2", "/s3"] {
        mount_page(&mock_server, route, html_page(&[]).set_delay(delay), 1).await;
    }

    let mut config = create_test_config(&mock_server);
    config.crawler.concurrent = 2;

    let start = Instant::now();
    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");
    let elapsed = start.elapsed();

    assert_eq!(report.visited, 4);

    // Three slow pages through two slots take at least two delay periods;
    // had all three overlapped the crawl would finish after one
    assert!(
        elapsed >= delay * 2,
        "three delayed pages finished in {:?}, so more than two overlapped",
        elapsed
    );
}
