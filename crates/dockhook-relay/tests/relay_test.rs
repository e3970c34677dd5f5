//! End-to-end tests for the relay pipeline against a loopback webhook.
//!
//! A minimal HTTP/1.1 listener stands in for the webhook endpoint and
//! captures every request it receives:
//! 1. Single event delivery (path, headers, exact JSON body)
//! 2. No deduplication of repeated events
//! 3. Skipped events never reach the network
//! 4. Non-2xx statuses are reported, not treated as failures
//! 5. Full dispatch loop ordering until a stream error

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use dockhook_common::config::RelayConfig;
use dockhook_common::error::{DockhookError, Result};
use dockhook_common::types::EventRecord;
use dockhook_relay::{Delivery, HttpWebhook, Notifier, dispatch};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

// ── Loopback webhook ────────────────────────────────────────────────

#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

async fn spawn_webhook(status_line: &'static str) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let request = read_request(&mut socket).await;
            let response =
                format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            if tx.send(request).is_err() {
                break;
            }
        }
    });

    (format!("http://{addr}/hook"), rx)
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split_whitespace();
    let method = request_line.next().unwrap().to_owned();
    let path = request_line.next().unwrap().to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_owned()))
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .map_or(0, |(_, v)| v.parse().unwrap());
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8(buf[header_end..header_end + content_length].to_vec()).unwrap();

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn notifier_for(url: &str) -> Notifier<HttpWebhook> {
    let config = RelayConfig::new(url)
        .unwrap()
        .with_timeout(Some(Duration::from_secs(5)));
    Notifier::new(HttpWebhook::new(&config).unwrap())
}

// ── Delivery ────────────────────────────────────────────────────────

#[tokio::test]
async fn start_event_posts_exact_json_body() {
    let (url, mut requests) = spawn_webhook("200 OK").await;
    let notifier = notifier_for(&url);

    let event = EventRecord::new("start", [("name", "web1")]);
    assert_eq!(notifier.notify(&event).await, Delivery::Sent { status: 200 });

    let request = requests.recv().await.unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/hook");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(
        request.body,
        r#"{"text":"*web1* is is starting:\n```\n{name=web1}\n```"}"#
    );

    let parsed: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(parsed.as_object().unwrap().len(), 1);
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn repeated_event_posts_twice() {
    let (url, mut requests) = spawn_webhook("200 OK").await;
    let notifier = notifier_for(&url);

    let event = EventRecord::new("die", [("name", "db"), ("exitCode", "0")]);
    let _ = notifier.notify(&event).await;
    let _ = notifier.notify(&event).await;

    let first = requests.recv().await.unwrap();
    let second = requests.recv().await.unwrap();
    assert_eq!(first.body, second.body);
    assert!(first.body.contains("is is die"));
}

#[tokio::test]
async fn skipped_events_make_no_request() {
    let (url, mut requests) = spawn_webhook("200 OK").await;
    let notifier = notifier_for(&url);

    let nameless = EventRecord::new("start", [("image", "nginx")]);
    let resize = EventRecord::new("resize", [("name", "web1")]);
    assert_eq!(notifier.notify(&nameless).await, Delivery::Skipped);
    assert_eq!(notifier.notify(&resize).await, Delivery::Unsupported);

    // A real request afterwards proves nothing was queued before it.
    let exec = EventRecord::new("exec_start: abc123", [("name", "web1")]);
    let _ = notifier.notify(&exec).await;
    let request = requests.recv().await.unwrap();
    assert!(request.body.contains("is is exec-ing abc123:"));
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let (url, _requests) = spawn_webhook("500 Internal Server Error").await;
    let notifier = notifier_for(&url);

    let event = EventRecord::new("start", [("name", "web1")]);
    assert_eq!(notifier.notify(&event).await, Delivery::Sent { status: 500 });
}

// ── Dispatch loop ───────────────────────────────────────────────────

#[tokio::test]
async fn dispatch_delivers_in_order_until_stream_error() {
    let (url, mut requests) = spawn_webhook("204 No Content").await;
    let notifier = notifier_for(&url);

    let events: Vec<Result<EventRecord>> = vec![
        Ok(EventRecord::new("start", [("name", "api")])),
        Ok(EventRecord::new("exec_start: sh -c date", [("name", "api")])),
        Ok(EventRecord::new("die", [("name", "api")])),
        Err(DockhookError::EventStream {
            message: "daemon went away".into(),
        }),
    ];

    let err = dispatch::run(futures::stream::iter(events), &notifier)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("daemon went away"));

    let mut bodies = Vec::new();
    for _ in 0..3 {
        bodies.push(requests.recv().await.unwrap().body);
    }
    assert!(bodies[0].contains("*api* is is starting"));
    assert!(bodies[1].contains("*api* is is exec-ing sh -c date"));
    assert!(bodies[2].contains("*api* is is die"));
}
