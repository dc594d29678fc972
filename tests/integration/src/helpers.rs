//! Test helpers for integration tests
//!
//! Provides a scriptable loopback gateway server, connection-side frame
//! plumbing, and a recording listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use accord_gateway::connection::ConnectionStatus;
use accord_gateway::dispatch::EventListener;
use accord_gateway::events::GatewayEvent;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode as WsCloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

/// How long helpers wait before declaring the peer silent
pub const RECV_TIMEOUT: Duration = Duration::from_secs(10);

/// Loopback websocket server standing in for the real gateway
pub struct MockGateway {
    addr: SocketAddr,
    conn_rx: mpsc::UnboundedReceiver<ServerConnection>,
    _accept_task: JoinHandle<()>,
}

impl MockGateway {
    /// Bind an ephemeral loopback port and accept connections forever
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (conn_tx, conn_rx) = mpsc::unbounded_channel();
        let accept_task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };
                if conn_tx.send(ServerConnection { ws }).is_err() {
                    break;
                }
            }
        });
        Ok(Self {
            addr,
            conn_rx,
            _accept_task: accept_task,
        })
    }

    /// Websocket URL clients should dial
    pub fn url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    /// Wait for the next inbound connection
    pub async fn next_connection(&mut self) -> Result<ServerConnection> {
        tokio::time::timeout(RECV_TIMEOUT, self.conn_rx.recv())
            .await
            .context("timed out waiting for a gateway connection")?
            .context("accept loop ended")
    }
}

/// Server side of one accepted websocket connection
pub struct ServerConnection {
    ws: WebSocketStream<TcpStream>,
}

impl ServerConnection {
    /// Send one raw JSON frame
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.ws.send(Message::Text(value.to_string())).await?;
        Ok(())
    }

    /// Send Hello (op 10) with the given heartbeat interval
    pub async fn send_hello(&mut self, interval_ms: u64) -> Result<()> {
        self.send_json(&json!({
            "op": 10,
            "d": { "heartbeat_interval": interval_ms }
        }))
        .await
    }

    /// Send a Dispatch (op 0) frame
    pub async fn send_dispatch(&mut self, seq: u64, event_type: &str, data: Value) -> Result<()> {
        self.send_json(&json!({
            "op": 0,
            "s": seq,
            "t": event_type,
            "d": data
        }))
        .await
    }

    /// Acknowledge a heartbeat (op 11)
    pub async fn send_heartbeat_ack(&mut self) -> Result<()> {
        self.send_json(&json!({ "op": 11 })).await
    }

    /// Receive the next text frame as JSON
    pub async fn recv_json(&mut self) -> Result<Value> {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .context("timed out waiting for a frame")?
                .context("connection closed")??;
            match msg {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(_) => anyhow::bail!("peer closed the connection"),
                _ => {}
            }
        }
    }

    /// Receive frames until one with the given opcode arrives
    ///
    /// Heartbeats that arrive while waiting for something else are
    /// acknowledged so the connection stays alive.
    pub async fn expect_op(&mut self, op: u8) -> Result<Value> {
        loop {
            let frame = self.recv_json().await?;
            let got = frame["op"].as_u64().context("frame without opcode")?;
            if got == u64::from(op) {
                return Ok(frame);
            }
            if got == 1 {
                self.send_heartbeat_ack().await?;
            }
        }
    }

    /// Drive the server half of a fresh handshake: Identify in, Ready out
    pub async fn complete_handshake(&mut self, session_id: &str) -> Result<Value> {
        let identify = self.expect_op(2).await?;
        self.send_dispatch(1, "READY", crate::fixtures::ready_json(session_id))
            .await?;
        Ok(identify)
    }

    /// Close the connection with a gateway close code
    pub async fn close_with(mut self, code: u16, reason: &str) -> Result<()> {
        self.ws
            .close(Some(CloseFrame {
                code: WsCloseCode::from(code),
                reason: reason.to_string().into(),
            }))
            .await?;
        Ok(())
    }

    /// Drop the TCP stream without a close frame
    pub fn abort(self) {
        drop(self);
    }
}

/// Listener that records every delivered event name in order
#[derive(Default)]
pub struct RecordingListener {
    names: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.lock().iter().any(|n| n == name)
    }

    /// Wait until an event with this name has been delivered
    pub async fn wait_for(&self, name: &str) -> bool {
        for _ in 0..100 {
            if self.contains(name) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        false
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &GatewayEvent) {
        self.names.lock().push(event.name().to_string());
    }
}

/// Poll until the client reaches the wanted status
pub async fn wait_for_status(
    status_of: impl Fn() -> ConnectionStatus,
    wanted: ConnectionStatus,
) -> bool {
    for _ in 0..100 {
        if status_of() == wanted {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
