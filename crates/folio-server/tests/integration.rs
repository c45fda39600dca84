//! End-to-end tests over a real listener: routes, static fallback, and the
//! visitor-count SSE lifecycle as a browser would drive it.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use folio_server::start;
use folio_settings::{FolioSettings, GithubSettings};
use futures::StreamExt;

fn test_settings(site_dir: &Path, github_base: &str) -> FolioSettings {
    let mut settings = FolioSettings::default();
    settings.server.host = "127.0.0.1".into();
    settings.server.port = 0;
    settings.server.site_dir = site_dir.display().to_string();
    settings.github = GithubSettings {
        username: "octocat".into(),
        api_base: github_base.into(),
        top_repos: 6,
    };
    settings
}

fn site_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>folio-test</title>",
    )
    .unwrap();
    dir
}

async fn visitors_reported(base: &str, expected: usize) -> bool {
    for _ in 0..150 {
        let stats: serde_json::Value = reqwest::get(format!("{base}/api/stats"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if stats["stats"]["visitors"] == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

/// Read the next `data:` payload from an SSE byte stream, skipping
/// comment/keep-alive frames.
async fn next_event_data<S, B, E>(stream: &mut S, buf: &mut String) -> Option<String>
where
    S: futures::Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    loop {
        if let Some(idx) = buf.find("\n\n") {
            let frame = buf[..idx].to_string();
            let _ = buf.drain(..idx + 2);
            if let Some(data) = frame
                .lines()
                .find_map(|line| line.strip_prefix("data:").map(str::trim_start))
            {
                return Some(data.to_string());
            }
            continue;
        }
        let chunk = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .ok()??
            .ok()?;
        buf.push_str(&String::from_utf8_lossy(chunk.as_ref()));
    }
}

#[tokio::test]
async fn health_and_stats_respond() {
    let site = site_dir();
    let handle = start(
        Arc::new(test_settings(site.path(), "http://127.0.0.1:1")),
        None,
    )
    .await
    .unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);

    let health: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let stats: serde_json::Value = reqwest::get(format!("{base}/api/stats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["ok"], true);
    assert_eq!(stats["stats"]["visitors"], 0);
    assert_eq!(stats["stats"]["messages_received"], 0);

    handle.stop().await;
}

#[tokio::test]
async fn contact_submission_is_stored_and_counted() {
    let site = site_dir();
    let handle = start(
        Arc::new(test_settings(site.path(), "http://127.0.0.1:1")),
        None,
    )
    .await
    .unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);
    let client = reqwest::Client::new();

    let accepted: serde_json::Value = client
        .post(format!("{base}/api/contact"))
        .json(&serde_json::json!({
            "name": "Ada",
            "email": "Ada@Example.com",
            "subject": "Hello",
            "message": "Great site!",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(accepted["ok"], true);

    let rejected = client
        .post(format!("{base}/api/contact"))
        .json(&serde_json::json!({
            "name": "Ada",
            "email": "",
            "subject": "Hello",
            "message": "Great site!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 400);
    let body: serde_json::Value = rejected.json().await.unwrap();
    assert_eq!(body["error"], "All fields are required.");

    let stats: serde_json::Value = reqwest::get(format!("{base}/api/stats"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["stats"]["messages_received"], 1);

    handle.stop().await;
}

#[tokio::test]
async fn github_proxy_passes_through_shaped_payload() {
    let upstream = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/users/octocat"))
        .respond_with(
            wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login": "octocat",
                "name": "The Octocat",
                "followers": 100,
            })),
        )
        .mount(&upstream)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/users/octocat/repos"))
        .respond_with(
            wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "folio", "html_url": "https://github.com/octocat/folio",
                 "stargazers_count": 5, "forks_count": 2, "fork": false},
            ])),
        )
        .mount(&upstream)
        .await;

    let site = site_dir();
    let handle = start(Arc::new(test_settings(site.path(), &upstream.uri())), None)
        .await
        .unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);

    let body: serde_json::Value = reqwest::get(format!("{base}/api/github"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["login"], "octocat");
    assert_eq!(body["repos"][0]["stars"], 5);

    handle.stop().await;
}

#[tokio::test]
async fn static_site_serves_index_with_spa_fallback() {
    let site = site_dir();
    let handle = start(
        Arc::new(test_settings(site.path(), "http://127.0.0.1:1")),
        None,
    )
    .await
    .unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);

    for path in ["/", "/projects/anything"] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 200, "path {path}");
        assert!(resp.text().await.unwrap().contains("folio-test"));
    }

    handle.stop().await;
}

#[tokio::test]
async fn visitor_stream_counts_connects_and_disconnects() {
    let site = site_dir();
    let handle = start(
        Arc::new(test_settings(site.path(), "http://127.0.0.1:1")),
        None,
    )
    .await
    .unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);
    let client = reqwest::Client::new();

    // First subscriber sees itself counted.
    let first = client
        .get(format!("{base}/api/visitors"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        first.headers().get("content-type").unwrap(),
        "text/event-stream"
    );
    let mut first_stream = Box::pin(first.bytes_stream());
    let mut first_buf = String::new();
    let data = next_event_data(&mut first_stream, &mut first_buf)
        .await
        .unwrap();
    assert_eq!(data, r#"{"count":1}"#);
    assert!(visitors_reported(&base, 1).await);

    // Second subscriber bumps the count for both.
    let second = client
        .get(format!("{base}/api/visitors"))
        .send()
        .await
        .unwrap();
    let mut second_stream = Box::pin(second.bytes_stream());
    let mut second_buf = String::new();
    let data = next_event_data(&mut second_stream, &mut second_buf)
        .await
        .unwrap();
    assert_eq!(data, r#"{"count":2}"#);
    let data = next_event_data(&mut first_stream, &mut first_buf)
        .await
        .unwrap();
    assert_eq!(data, r#"{"count":2}"#);

    // Dropping the second connection decrements and notifies the survivor.
    drop(second_stream);
    assert!(visitors_reported(&base, 1).await);
    let data = next_event_data(&mut first_stream, &mut first_buf)
        .await
        .unwrap();
    assert_eq!(data, r#"{"count":1}"#);

    // Last client gone: the count drains to zero.
    drop(first_stream);
    assert!(visitors_reported(&base, 0).await);

    handle.stop().await;
}
