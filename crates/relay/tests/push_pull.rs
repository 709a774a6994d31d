use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use relay::{Relay, RelayError};
use tokio::time::{sleep, timeout};
use zeromq::{PullSocket, Socket, SocketRecv};

async fn recv_text(pull: &mut PullSocket) -> String {
    let message = timeout(Duration::from_secs(5), pull.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("recv failed");
    assert_eq!(message.len(), 1, "expected a single-part frame");
    String::from_utf8(message.get(0).unwrap().to_vec()).unwrap()
}

/// Connects a PULL socket and waits until the relay has delivered to it.
async fn connected_pull(relay: &Relay) -> PullSocket {
    let mut pull = PullSocket::new();
    pull.connect(relay.endpoint()).await.unwrap();

    timeout(Duration::from_secs(5), relay.send("ready"))
        .await
        .expect("pull peer never became reachable")
        .unwrap();
    assert_eq!(recv_text(&mut pull).await, "ready");

    pull
}

#[tokio::test]
async fn test_bind_reports_resolved_port() {
    let relay = Relay::bind("tcp://127.0.0.1:0").await.unwrap();

    assert!(relay.endpoint().starts_with("tcp://127.0.0.1:"));
    assert!(!relay.endpoint().ends_with(":0"));
    relay.close().await.unwrap();
}

#[tokio::test]
async fn test_second_bind_on_same_endpoint_fails() {
    let first = Relay::bind("tcp://127.0.0.1:0").await.unwrap();

    let second = Relay::bind(first.endpoint()).await;
    assert!(matches!(second, Err(RelayError::Bind { .. })));
}

#[tokio::test]
async fn test_pull_consumer_receives_frame_verbatim() {
    let relay = Relay::bind("tcp://127.0.0.1:0").await.unwrap();
    let mut pull = connected_pull(&relay).await;

    let frame = r#"{"signal":"BUY","symbol":"EURUSD","price":1.1,"time":"2024-01-01T00:00:00Z","interval":"M1","volume":1}"#;
    relay.send(frame).await.unwrap();

    assert_eq!(recv_text(&mut pull).await, frame);
}

#[tokio::test]
async fn test_send_waits_for_late_consumer() {
    let relay = Arc::new(Relay::bind("tcp://127.0.0.1:0").await.unwrap());

    let pending = {
        let relay = relay.clone();
        tokio::spawn(async move { relay.send("early").await })
    };
    sleep(Duration::from_millis(100)).await;
    assert!(!pending.is_finished(), "send returned before any consumer connected");

    let mut pull = PullSocket::new();
    pull.connect(relay.endpoint()).await.unwrap();

    assert_eq!(recv_text(&mut pull).await, "early");
    timeout(Duration::from_secs(5), pending)
        .await
        .expect("send never completed")
        .unwrap()
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_arrive_as_whole_frames() {
    let relay = Arc::new(Relay::bind("tcp://127.0.0.1:0").await.unwrap());
    let mut pull = connected_pull(&relay).await;

    let frames: Vec<String> = (0..50)
        .map(|i| format!(r#"{{"signal":"BUY","symbol":"SYM{i}","price":{i},"time":"t","interval":"M1","volume":{i}}}"#))
        .collect();

    let sends = frames.iter().cloned().map(|frame| {
        let relay = relay.clone();
        tokio::spawn(async move { relay.send(&frame).await })
    });
    for result in join_all(sends).await {
        result.unwrap().unwrap();
    }

    let mut received = Vec::with_capacity(frames.len());
    for _ in 0..frames.len() {
        received.push(recv_text(&mut pull).await);
    }

    let mut expected = frames.clone();
    expected.sort();
    received.sort();
    assert_eq!(received, expected);
}

#[tokio::test]
async fn test_send_after_close_is_rejected() {
    let relay = Relay::bind("tcp://127.0.0.1:0").await.unwrap();
    relay.close().await.unwrap();

    assert!(matches!(relay.send("late").await, Err(RelayError::Closed)));
}
