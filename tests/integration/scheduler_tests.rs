use robofinder::config::FetchConfig;
use robofinder::crawler::{shutdown, RetryPolicy, Scheduler};
use robofinder::RoboError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn snapshot_urls(base: &str, prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}/{}/{}/robots.txt", base, prefix, i))
        .collect()
}

#[tokio::test]
async fn test_collects_successes_and_drops_failures() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/ok/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /a"))
        .expect(4)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/bad/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&mock_server)
        .await;

    let mut urls = snapshot_urls(&mock_server.uri(), "ok", 4);
    urls.extend(snapshot_urls(&mock_server.uri(), "bad", 2));

    let (_trigger, shutdown) = shutdown::channel();
    let scheduler = Scheduler::new(3, FetchConfig::default())
        .with_policy(RetryPolicy::new(3, Duration::from_millis(10)));

    let batch = scheduler.run_all(urls, &shutdown).await.unwrap();

    assert_eq!(batch.bodies.len(), 4);
    assert!(batch.bodies.iter().all(|body| body == "Disallow: /a"));
    assert_eq!(batch.stats.fetched, 4);
    assert_eq!(batch.stats.failed, 2);
}

#[tokio::test]
async fn test_failures_run_in_parallel() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let backoff = Duration::from_millis(100);
    let (_trigger, shutdown) = shutdown::channel();
    let scheduler =
        Scheduler::new(3, FetchConfig::default()).with_policy(RetryPolicy::new(3, backoff));

    let start = Instant::now();
    let batch = scheduler
        .run_all(snapshot_urls(&mock_server.uri(), "web", 10), &shutdown)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert!(batch.bodies.is_empty());
    assert_eq!(batch.stats.failed, 10);
    // One worker handles at least ceil(10 / 3) = 4 URLs, each waiting 3 backoffs
    assert!(elapsed >= backoff * 12, "finished too fast: {:?}", elapsed);
    // Sequential processing would need 10 * 3 backoffs
    assert!(elapsed < backoff * 30, "workers did not overlap: {:?}", elapsed);
}

#[tokio::test]
async fn test_concurrency_bounds_in_flight_requests() {
    let mock_server = MockServer::start().await;
    let delay = Duration::from_millis(200);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Allow: /").set_delay(delay))
        .expect(6)
        .mount(&mock_server)
        .await;

    let (_trigger, shutdown) = shutdown::channel();
    let scheduler = Scheduler::new(3, FetchConfig::default());

    let start = Instant::now();
    let batch = scheduler
        .run_all(snapshot_urls(&mock_server.uri(), "web", 6), &shutdown)
        .await
        .unwrap();

    assert_eq!(batch.bodies.len(), 6);
    // Six slow responses through three workers take at least two rounds
    assert!(start.elapsed() >= delay * 2);
}

#[tokio::test]
async fn test_interrupt_stops_pool_promptly() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let (trigger, shutdown) = shutdown::channel();
    let scheduler = Scheduler::new(3, FetchConfig::default());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    let result = scheduler
        .run_all(snapshot_urls(&mock_server.uri(), "web", 20), &shutdown)
        .await;

    assert!(matches!(result, Err(RoboError::Interrupted)));
    assert!(start.elapsed() < Duration::from_secs(5));

    // Only the first wave of requests was ever started
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.len() <= 3, "started {} requests", received.len());
}
