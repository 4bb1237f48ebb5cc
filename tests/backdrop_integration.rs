use std::time::Duration;

use tokio::time::timeout;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unsplash_backdrop::config::EndpointsConfig;
use unsplash_backdrop::query::{AuthorizedQuery, Query, SourceQuery};
use unsplash_backdrop::{Backdrop, BackdropOptions, Style};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn options(server: &MockServer, delay: Duration) -> BackdropOptions {
    BackdropOptions {
        delay,
        endpoints: EndpointsConfig {
            source_base: server.uri(),
            api_base: server.uri(),
        },
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_photo_mounts_idle() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let backdrop = Backdrop::mount(
        Query::Anonymous(SourceQuery::Photo {
            photo_id: "abc123".to_string(),
        }),
        options(&server, Duration::from_millis(100)),
    );

    let mut rx = backdrop.subscribe();
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("timeout waiting for fetch pass")
        .expect("backdrop channel closed");

    let current = backdrop.current().expect("image should be displayed");
    assert_eq!(current.payload(), b"payload");
    assert!(current.source().ends_with("/abc123"));

    // One handle resolved: Idle state. The rotator never starts a timer and
    // winds down, so the channel closes without ever publishing again.
    let closed = timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("rotator should settle into idle");
    assert!(closed.is_err(), "single image must not rotate");

    // Core value overrides the caller's background-image; other keys pass.
    let base = Style::from([
        ("background-image".to_string(), "url(caller.png)".to_string()),
        ("color".to_string(), "red".to_string()),
    ]);
    let style = backdrop.style(&base);
    assert_eq!(style["background-image"], current.background_image());
    assert_eq!(style["color"], "red");

    backdrop.unmount().await;
    // MockServer verifies the `.expect(1)` on drop: exactly one call.
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn two_photos_rotate_and_unmount_stops_the_timer() {
    init_tracing();
    let server = MockServer::start().await;
    for (id, body) in [("a", "payload-a"), ("b", "payload-b")] {
        Mock::given(method("GET"))
            .and(path(format!("/photos/{id}")))
            .and(query_param("client_id", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_bytes().to_vec()))
            .mount(&server)
            .await;
    }

    let query = AuthorizedQuery {
        access_key: "key".to_string(),
        photo_ids: vec!["a".to_string(), "b".to_string()],
        collection_ids: Vec::new(),
        topics: Vec::new(),
        username: None,
        orientation: None,
        content_filter: None,
        count: None,
    };
    let backdrop = Backdrop::mount(
        Query::Authorized(query),
        options(&server, Duration::from_millis(200)),
    );

    let mut rx = backdrop.subscribe();
    let mut seen = Vec::new();
    for _ in 0..3 {
        timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("timeout waiting for rotation")
            .expect("backdrop channel closed");
        seen.push(rx.borrow().as_ref().unwrap().payload().to_vec());
    }
    assert_eq!(
        seen,
        [
            b"payload-a".to_vec(),
            b"payload-b".to_vec(),
            b"payload-a".to_vec(),
        ]
    );

    backdrop.unmount().await;
    // Teardown cancelled the timer; no further updates can arrive.
    assert!(rx.changed().await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mounts_from_yaml_config() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/vincent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"portrait".to_vec()))
        .mount(&server)
        .await;

    let yaml = format!(
        "query:\n  by: user\n  username: vincent\ndelay: 250ms\nendpoints:\n  source-base: \"{}\"\n",
        server.uri()
    );
    let config: unsplash_backdrop::config::BackdropConfig = serde_yaml::from_str(&yaml).unwrap();
    config.validate().unwrap();

    let backdrop = Backdrop::from_config(&config);
    let mut rx = backdrop.subscribe();
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("timeout waiting for fetch pass")
        .expect("backdrop channel closed");
    assert_eq!(backdrop.current().unwrap().payload(), b"portrait");

    backdrop.unmount().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_fetch_leaves_the_backdrop_empty() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backdrop = Backdrop::mount(
        Query::Anonymous(SourceQuery::Random { keywords: None }),
        options(&server, Duration::from_millis(100)),
    );

    // Give the fetch pass time to fail.
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(backdrop.current().is_none());

    // Nothing displayed: the caller's style passes through untouched.
    let base = Style::from([
        ("background-image".to_string(), "url(caller.png)".to_string()),
        ("color".to_string(), "red".to_string()),
    ]);
    assert_eq!(backdrop.style(&base), base);

    backdrop.unmount().await;
}
