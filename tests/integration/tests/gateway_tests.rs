//! End-to-end gateway tests against a loopback mock server
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::sync::Arc;
use std::time::Duration;

use accord_client::{Client, ClientBuilder};
use accord_common::{ClientConfig, ClientError};
use accord_gateway::connection::ConnectionStatus;
use integration_tests::{wait_for_status, message_json, MockGateway, RecordingListener};
use serde_json::json;

fn test_client(url: &str) -> (Arc<Client>, Arc<RecordingListener>) {
    let mut config = ClientConfig::new("test-token");
    config.gateway.url = url.to_string();
    config.gateway.backoff_base_ms = 50;
    config.gateway.backoff_cap_ms = 200;
    config.gateway.max_reconnect_attempts = 3;
    config.gateway.handshake_timeout_ms = 8_000;

    let listener = RecordingListener::new();
    let client = ClientBuilder::from_config(config)
        .listener(listener.clone())
        .build();
    (Arc::new(client), listener)
}

#[tokio::test]
async fn test_handshake_reaches_ready() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();

    let identify = conn.expect_op(2).await.unwrap();
    assert_eq!(identify["d"]["token"], "test-token");
    assert!(identify["d"]["intents"].is_u64());
    assert!(identify["d"]["properties"]["browser"].is_string());

    conn.send_dispatch(1, "READY", integration_tests::ready_json("sess-ready"))
        .await
        .unwrap();

    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);
    assert!(listener.wait_for("Ready").await);
    let user = client.self_user().unwrap();
    assert_eq!(user.username, "self");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_heartbeat_keeps_connection_alive() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(300).await.unwrap();
    conn.complete_handshake("sess-hb").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    // Two full heartbeat cycles, each acked.
    for _ in 0..2 {
        let hb = conn.expect_op(1).await.unwrap();
        assert_eq!(hb["d"], 1, "heartbeat carries last dispatch sequence");
        conn.send_heartbeat_ack().await.unwrap();
    }

    assert_eq!(client.status(), ConnectionStatus::Ready);
    assert!(client.latency().is_some());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_missed_ack_reconnects_and_resumes() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(200).await.unwrap();
    conn.complete_handshake("sess-resume").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    // Swallow heartbeats without acking; the second un-acked tick kills
    // the connection and the client dials again. Keep the first socket
    // open so the timeout, not a transport loss, triggers the reconnect.
    let stale = conn;

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    let resume = conn.expect_op(6).await.unwrap();
    assert_eq!(resume["d"]["session_id"], "sess-resume");
    assert_eq!(resume["d"]["seq"], 1);
    assert_eq!(resume["d"]["token"], "test-token");

    conn.send_dispatch(2, "RESUMED", json!({})).await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);
    assert!(listener.wait_for("Resumed").await);

    drop(stale);
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_server_reconnect_request_resumes() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-op7").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.send_json(&json!({ "op": 7 })).await.unwrap();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    let resume = conn.expect_op(6).await.unwrap();
    assert_eq!(resume["d"]["session_id"], "sess-op7");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_non_resumable_invalid_session_identifies_fresh() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-invalid").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.send_json(&json!({ "op": 9, "d": false })).await.unwrap();

    // The session is discarded, so after the randomized delay a fresh
    // Identify arrives on the same socket instead of a Resume.
    let identify = conn.expect_op(2).await.unwrap();
    assert_eq!(identify["d"]["token"], "test-token");
    assert!(identify["d"].get("session_id").is_none());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_heartbeats_acked_while_rehandshake_pending() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    // Interval shorter than the minimum re-handshake delay, so several
    // heartbeat cycles fall inside the pending window.
    conn.send_hello(300).await.unwrap();
    conn.complete_handshake("sess-pending").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.send_json(&json!({ "op": 9, "d": false })).await.unwrap();

    // The client must keep its heartbeat alive while the delayed
    // re-handshake is pending. If acks sent during the window went
    // unread, the client would declare the connection dead and redial,
    // and the Identify below would never arrive on this socket.
    let hb = conn.expect_op(1).await.unwrap();
    assert_eq!(hb["d"], 1);
    conn.send_heartbeat_ack().await.unwrap();

    // expect_op keeps acking any further heartbeats while waiting.
    let identify = conn.expect_op(2).await.unwrap();
    assert_eq!(identify["d"]["token"], "test-token");
    assert!(client.latency().is_some());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_resumable_close_code_resumes() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-4000").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.close_with(4000, "unknown error").await.unwrap();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    let resume = conn.expect_op(6).await.unwrap();
    assert_eq!(resume["d"]["session_id"], "sess-4000");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_fatal_close_code_surfaces_terminal_error() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, _listener) = test_client(&server.url());

    let runner = Arc::clone(&client);
    let run = tokio::spawn(async move { runner.run().await });

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-fatal").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.close_with(4004, "authentication failed").await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(ClientError::AuthenticationFailed)));
    assert_eq!(client.status(), ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn test_dispatch_reaches_listener_and_cache() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-dispatch").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.send_dispatch(2, "MESSAGE_CREATE", message_json("555", "42", "7", "hello"))
        .await
        .unwrap();

    assert!(listener.wait_for("MessageCreate").await);
    // Generic before specific.
    let names = listener.names();
    let generic = names.iter().position(|n| n == "Message").unwrap();
    let specific = names.iter().position(|n| n == "MessageCreate").unwrap();
    assert!(generic < specific);

    let message = client
        .cache()
        .message(accord_core::Snowflake::new(42), accord_core::Snowflake::new(555))
        .unwrap();
    assert_eq!(message.content, "hello");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_unknown_event_type_is_harmless() {
    let mut server = MockGateway::start().await.unwrap();
    let (client, listener) = test_client(&server.url());
    client.connect();

    let mut conn = server.next_connection().await.unwrap();
    conn.send_hello(45_000).await.unwrap();
    conn.complete_handshake("sess-unknown").await.unwrap();
    assert!(wait_for_status(|| client.status(), ConnectionStatus::Ready).await);

    conn.send_dispatch(2, "STAGE_INSTANCE_CREATE", json!({ "id": "1" }))
        .await
        .unwrap();
    conn.send_dispatch(3, "MESSAGE_CREATE", message_json("556", "42", "7", "still alive"))
        .await
        .unwrap();

    assert!(listener.wait_for("MessageCreate").await);
    assert_eq!(client.status(), ConnectionStatus::Ready);

    client.close().await.unwrap();
}
