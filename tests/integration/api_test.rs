//! HTTP API integration tests
//!
//! Each test binds the router on an ephemeral port and speaks plain
//! HTTP/1.1 over a TCP socket.

use serde_json::{json, Value};
use slice_backtester::api::{router, AppState};
use slice_backtester::config::BacktestSettings;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(AppState::new(BacktestSettings::default())));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

/// Send one request and return (status, parsed JSON body)
async fn send(addr: &str, method: &str, body: Option<&str>) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut request = format!(
        "{} /api/backtest HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
        method, addr
    );
    match body {
        Some(body) => {
            request.push_str("Content-Type: application/json\r\n");
            request.push_str(&format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
        }
        None => request.push_str("Content-Length: 0\r\n\r\n"),
    }
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let status: u16 = raw
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    let (_, payload) = raw.split_once("\r\n\r\n").unwrap();
    let value = serde_json::from_str(payload).unwrap_or(Value::Null);
    (status, value)
}

fn series(n: usize) -> Value {
    let bars: Vec<Value> = (0..n)
        .map(|i| {
            let close = 100 + i;
            json!({
                "time": format!("2024-03-{:02}", i + 1),
                "open": close,
                "high": close + 1,
                "low": close - 1,
                "close": close,
            })
        })
        .collect();
    Value::Array(bars)
}

#[tokio::test]
async fn test_post_backtest() {
    let addr = spawn_server().await;
    let body = json!({
        "data": series(10),
        "strategy": "TWAP",
        "startingCapital": 10000,
        "riskPerTrade": 2,
        "sliceCount": 5,
        "maxChildSize": 5000,
        "seed": 42,
    })
    .to_string();

    let (status, value) = send(&addr, "POST", Some(&body)).await;
    assert_eq!(status, 200);

    let slices = value["slices"].as_array().unwrap();
    assert_eq!(slices.len(), 5);
    assert_eq!(slices[1]["timestamp"], "2024-03-03");
    for key in ["timestamp", "price", "qty", "priceChange", "pnl"] {
        assert!(slices[0].get(key).is_some(), "missing slice field {}", key);
    }

    let trades = value["trades"].as_array().unwrap();
    assert_eq!(trades.len(), 5);
    let action = trades[0]["action"].as_str().unwrap();
    assert!(action == "BUY" || action == "SELL");

    let win_rate = value["winRate"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&win_rate));
    assert!(value["totalPnL"].is_number());
    assert!(value["equitySegments"].is_array());
    assert_eq!(value["seed"], 42);
}

#[tokio::test]
async fn test_same_seed_same_response() {
    let addr = spawn_server().await;
    let body = json!({ "data": series(12), "strategy": "ICEBERG", "seed": 7 }).to_string();

    let (_, first) = send(&addr, "POST", Some(&body)).await;
    let (_, second) = send(&addr, "POST", Some(&body)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_data_is_bad_request() {
    let addr = spawn_server().await;

    let (status, value) = send(&addr, "POST", Some(r#"{"data": [], "strategy": "TWAP"}"#)).await;
    assert_eq!(status, 400);
    assert_eq!(value["error"], "No data provided");

    let (status, value) = send(&addr, "POST", Some(r#"{"strategy": "TWAP"}"#)).await;
    assert_eq!(status, 400);
    assert_eq!(value["error"], "No data provided");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let addr = spawn_server().await;
    let (status, value) = send(&addr, "POST", Some("{not json")).await;
    assert_eq!(status, 400);
    assert!(value["error"].is_string());
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let addr = spawn_server().await;
    for method in ["GET", "PUT", "DELETE"] {
        let (status, value) = send(&addr, method, None).await;
        assert_eq!(status, 405, "{} should be rejected", method);
        assert_eq!(value["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_oversized_inputs_are_bad_request() {
    let addr = spawn_server().await;

    let body = json!({"data": series(3), "riskPerTrade": 1e27, "seed": 1}).to_string();
    let (status, value) = send(&addr, "POST", Some(&body)).await;
    assert_eq!(status, 400);
    assert!(value["error"].as_str().unwrap().contains("overflow"));

    let body = json!({"data": series(3), "sliceCount": 4398046511104u64}).to_string();
    let (status, value) = send(&addr, "POST", Some(&body)).await;
    assert_eq!(status, 400);
    assert!(value["error"].as_str().unwrap().contains("exceeds the maximum"));

    // Server keeps answering afterwards
    let body = json!({"data": series(3), "seed": 1}).to_string();
    let (status, _) = send(&addr, "POST", Some(&body)).await;
    assert_eq!(status, 200);
}
