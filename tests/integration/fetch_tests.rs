use robofinder::config::FetchConfig;
use robofinder::crawler::{fetch_with_retry, shutdown, ConnectionProvider, FetchOutcome, RetryPolicy};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

#[tokio::test]
async fn test_fetch_success_first_attempt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /admin"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());

    let result = fetch_with_retry(&mut provider, &url, &fast_policy(), &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Body("Disallow: /admin".to_string()));
    assert_eq!(result.attempts, 1);
    assert_eq!(result.url, url);
}

#[tokio::test]
async fn test_fetch_recovers_after_server_errors() {
    let mock_server = MockServer::start().await;

    // First two requests fail, later ones succeed
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Allow: /ok"))
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());

    let result = fetch_with_retry(&mut provider, &url, &fast_policy(), &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Body("Allow: /ok".to_string()));
    assert_eq!(result.attempts, 3);
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_attempts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());

    let result = fetch_with_retry(&mut provider, &url, &fast_policy(), &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Exhausted);
    assert_eq!(result.attempts, 3);
    assert!(result.into_body().is_none());
}

#[tokio::test]
async fn test_empty_body_is_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());

    let result = fetch_with_retry(&mut provider, &url, &fast_policy(), &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Body(String::new()));
}

#[tokio::test]
async fn test_timeout_is_retryable_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let config = FetchConfig {
        timeout_secs: 1,
        ..FetchConfig::default()
    };
    let mut provider = ConnectionProvider::new(config);
    let url = format!("{}/robots.txt", mock_server.uri());
    let policy = RetryPolicy::new(1, Duration::from_millis(10));

    let result = fetch_with_retry(&mut provider, &url, &policy, &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Exhausted);
    assert_eq!(result.attempts, 1);
}

#[tokio::test]
async fn test_shutdown_abandons_in_flight_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let (trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    let result = fetch_with_retry(&mut provider, &url, &fast_policy(), &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Cancelled);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_shutdown_interrupts_backoff() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let url = format!("{}/robots.txt", mock_server.uri());
    let policy = RetryPolicy::new(3, Duration::from_secs(30));

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    let result = fetch_with_retry(&mut provider, &url, &policy, &shutdown).await;

    assert_eq!(result.outcome, FetchOutcome::Cancelled);
    assert_eq!(result.attempts, 1);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_provider_reuses_client_across_urls() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web/1if_/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /one"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/web/2if_/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /two"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let mut provider = ConnectionProvider::new(FetchConfig::default());
    let first = format!("{}/web/1if_/robots.txt", mock_server.uri());
    let second = format!("{}/web/2if_/robots.txt", mock_server.uri());

    let result = fetch_with_retry(&mut provider, &first, &fast_policy(), &shutdown).await;
    assert_eq!(result.outcome, FetchOutcome::Body("Disallow: /one".to_string()));
    assert_eq!(provider.builds(), 1);

    let result = fetch_with_retry(&mut provider, &second, &fast_policy(), &shutdown).await;
    assert_eq!(result.outcome, FetchOutcome::Body("Disallow: /two".to_string()));

    assert!(provider.is_connected());
    assert_eq!(provider.builds(), 1);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}
