//! Gateway connection manager
//!
//! Owns the socket, the heartbeat task, and the reconnect/resume state
//! machine. The read loop runs on the calling task; the heartbeat timer
//! and the socket writer each run on their own task, communicating with
//! the read loop only through `SessionState` and channels.

use super::backoff::Backoff;
use super::session::{ConnectionStatus, SessionState};
use crate::error::GatewayError;
use crate::events::{EventType, GatewayEvent, StatusChangeEvent};
use crate::handlers::{HandlerContext, HandlerRegistry};
use crate::protocol::{
    CloseCode, GatewayFrame, IdentifyPayload, Intents, OpCode, PresenceUpdatePayload,
    RequestGuildMembersPayload, ResumePayload, VoiceStateUpdatePayload,
};
use accord_common::GatewaySettings;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

/// Manages one persistent gateway connection
pub struct Gateway {
    token: String,
    settings: GatewaySettings,
    session: Arc<SessionState>,
    registry: Arc<HandlerRegistry>,
    ctx: Arc<HandlerContext>,
    outbound: RwLock<Option<mpsc::UnboundedSender<GatewayFrame>>>,
    shutdown: watch::Sender<bool>,
}

impl Gateway {
    /// Create a connection manager; `run` must be called to connect
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        settings: GatewaySettings,
        session: Arc<SessionState>,
        registry: Arc<HandlerRegistry>,
        ctx: Arc<HandlerContext>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            token: token.into(),
            settings,
            session,
            registry,
            ctx,
            outbound: RwLock::new(None),
            shutdown,
        }
    }

    /// Current connection lifecycle status
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.session.status()
    }

    /// Round-trip latency of the last acknowledged heartbeat
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.session.latency()
    }

    /// The session state shared with the entity builder
    #[must_use]
    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Signal the read loop and heartbeat task to exit and close the socket
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Send a presence update (op 3)
    pub fn update_presence(&self, payload: &PresenceUpdatePayload) -> Result<(), GatewayError> {
        self.send(GatewayFrame::presence_update(payload))
    }

    /// Send a voice state update (op 4)
    pub fn update_voice_state(
        &self,
        payload: &VoiceStateUpdatePayload,
    ) -> Result<(), GatewayError> {
        self.send(GatewayFrame::voice_state_update(payload))
    }

    /// Request member chunks for a guild (op 8)
    pub fn request_guild_members(
        &self,
        payload: &RequestGuildMembersPayload,
    ) -> Result<(), GatewayError> {
        self.send(GatewayFrame::request_guild_members(payload))
    }

    fn send(&self, frame: GatewayFrame) -> Result<(), GatewayError> {
        let guard = self.outbound.read();
        let sender = guard.as_ref().ok_or(GatewayError::NotConnected)?;
        sender.send(frame).map_err(|_| GatewayError::NotConnected)
    }

    fn transition(&self, status: ConnectionStatus) {
        let previous = self.session.set_status(status);
        if previous != status {
            debug!(from = %previous, to = %status, "connection status changed");
            self.ctx
                .dispatcher
                .dispatch(GatewayEvent::StatusChange(StatusChangeEvent {
                    previous,
                    current: status,
                }));
        }
    }

    /// Run the connection until shutdown or a fatal error
    ///
    /// Recoverable disconnects are retried internally with backoff,
    /// resuming the session where possible. Fatal errors discard the
    /// session and return.
    pub async fn run(&self) -> Result<(), GatewayError> {
        let mut backoff = Backoff::new(
            Duration::from_millis(self.settings.backoff_base_ms),
            Duration::from_millis(self.settings.backoff_cap_ms),
            self.settings.max_reconnect_attempts,
        );
        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            match self.run_connection(&mut shutdown_rx, &mut backoff).await {
                Ok(()) => {
                    info!("gateway shut down");
                    self.transition(ConnectionStatus::Unconnected);
                    return Ok(());
                }
                Err(err) if err.is_resumable() => {
                    self.transition(ConnectionStatus::Reconnecting);
                    let Some(delay) = backoff.next_delay() else {
                        self.transition(ConnectionStatus::Disconnected);
                        return Err(GatewayError::ReconnectExhausted {
                            attempts: backoff.attempt(),
                        });
                    };
                    warn!(
                        error = %err,
                        attempt = backoff.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        "reconnecting"
                    );
                    tokio::select! {
                        () = tokio::time::sleep(delay) => {}
                        _ = shutdown_rx.changed() => {
                            self.transition(ConnectionStatus::Unconnected);
                            return Ok(());
                        }
                    }
                }
                Err(err) => {
                    error!(error = %err, "fatal gateway error");
                    self.session.invalidate();
                    self.transition(ConnectionStatus::Disconnected);
                    return Err(err);
                }
            }
        }
    }

    /// One socket lifetime: connect, handshake, read until disconnect
    async fn run_connection(
        &self,
        shutdown_rx: &mut watch::Receiver<bool>,
        backoff: &mut Backoff,
    ) -> Result<(), GatewayError> {
        self.transition(ConnectionStatus::Connecting);
        self.session.reset_heartbeat();

        let (ws, _response) = tokio_tungstenite::connect_async(self.settings.url.as_str()).await?;
        self.transition(ConnectionStatus::WaitingForHello);
        let (mut sink, mut stream) = ws.split();

        // Writer task: sole owner of the sink. Heartbeats and caller
        // frames are serialized here, off the read loop.
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<GatewayFrame>();
        let writer = tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                match frame.to_json() {
                    Ok(text) => {
                        if sink.send(WsMessage::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(error = %err, "failed to encode outbound frame"),
                }
            }
            let _ = sink.close().await;
        });
        *self.outbound.write() = Some(out_tx.clone());

        let result = self
            .drive_connection(&mut stream, &out_tx, shutdown_rx, backoff)
            .await;

        *self.outbound.write() = None;
        drop(out_tx);
        writer.abort();
        result
    }

    async fn drive_connection(
        &self,
        stream: &mut (impl StreamExt<Item = Result<WsMessage, tokio_tungstenite::tungstenite::Error>>
                  + Unpin),
        out_tx: &mpsc::UnboundedSender<GatewayFrame>,
        shutdown_rx: &mut watch::Receiver<bool>,
        backoff: &mut Backoff,
    ) -> Result<(), GatewayError> {
        // Phase 1: Hello, within the handshake timeout.
        let hello = tokio::time::timeout(self.settings.handshake_timeout(), async {
            loop {
                match stream.next().await {
                    None => {
                        return Err(GatewayError::Transport(
                            tokio_tungstenite::tungstenite::Error::ConnectionClosed,
                        ))
                    }
                    Some(Err(err)) => return Err(err.into()),
                    Some(Ok(WsMessage::Text(text))) => {
                        let frame = GatewayFrame::from_json(&text)?;
                        if let Some(hello) = frame.as_hello() {
                            return Ok(hello);
                        }
                        debug!(frame = %frame, "ignoring pre-hello frame");
                    }
                    Some(Ok(_)) => {}
                }
            }
        })
        .await
        .map_err(|_| GatewayError::HandshakeTimeout)??;

        // Phase 2: heartbeat task on its own timer. It reads the shared
        // session state and signals the read loop when an ack is missed.
        let interval = Duration::from_millis(hello.heartbeat_interval);
        info!(interval_ms = hello.heartbeat_interval, "received hello");
        let (dead_tx, mut dead_rx) = mpsc::channel::<()>(1);
        let hb_session = Arc::clone(&self.session);
        let hb_tx = out_tx.clone();
        let heartbeat = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; the first heartbeat
            // should wait a full interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !hb_session.heartbeat_acked() {
                    let _ = dead_tx.send(()).await;
                    break;
                }
                hb_session.record_heartbeat_sent();
                if hb_tx
                    .send(GatewayFrame::heartbeat(hb_session.sequence()))
                    .is_err()
                {
                    break;
                }
            }
        });

        // Phase 3: authenticate, resuming if a prior session survives.
        self.send_handshake(out_tx);
        let mut ready_deadline = tokio::time::Instant::now() + self.settings.handshake_timeout();
        // Armed when the server invalidates the session; the delayed
        // re-handshake fires from the select loop so inbound frames,
        // heartbeat acks included, keep flowing in the meantime.
        let mut rehandshake_at: Option<tokio::time::Instant> = None;

        // Phase 4: the read loop.
        let result = loop {
            tokio::select! {
                _ = shutdown_rx.changed() => break Ok(()),
                Some(()) = dead_rx.recv() => {
                    warn!("heartbeat ack missed");
                    break Err(GatewayError::HeartbeatTimeout);
                }
                () = tokio::time::sleep_until(ready_deadline),
                        if !self.session.status().is_ready() && rehandshake_at.is_none() => {
                    break Err(GatewayError::HandshakeTimeout);
                }
                () = tokio::time::sleep_until(
                        rehandshake_at.unwrap_or_else(tokio::time::Instant::now)),
                        if rehandshake_at.is_some() => {
                    rehandshake_at = None;
                    self.send_handshake(out_tx);
                    ready_deadline = tokio::time::Instant::now()
                        + self.settings.handshake_timeout();
                }
                msg = stream.next() => match msg {
                    None => {
                        break Err(GatewayError::Transport(
                            tokio_tungstenite::tungstenite::Error::ConnectionClosed,
                        ))
                    }
                    Some(Err(err)) => break Err(err.into()),
                    Some(Ok(WsMessage::Close(frame))) => {
                        break Err(Self::classify_close(frame));
                    }
                    Some(Ok(WsMessage::Text(text))) => {
                        match self.handle_frame(&text, out_tx, backoff) {
                            Flow::Continue => {}
                            Flow::RehandshakeAfter(delay) => {
                                rehandshake_at =
                                    Some(tokio::time::Instant::now() + delay);
                            }
                            Flow::Disconnect(err) => break Err(err),
                        }
                    }
                    Some(Ok(_)) => {}
                }
            }
        };

        heartbeat.abort();
        result
    }

    fn send_handshake(&self, out_tx: &mpsc::UnboundedSender<GatewayFrame>) {
        if let (Some(session_id), Some(seq), true) = (
            self.session.session_id(),
            self.session.sequence(),
            self.session.can_resume(),
        ) {
            info!(session_id = %session_id, seq, "resuming session");
            self.transition(ConnectionStatus::Resuming);
            let _ = out_tx.send(GatewayFrame::resume(&ResumePayload {
                token: self.token.clone(),
                session_id,
                seq,
            }));
        } else {
            info!("identifying");
            self.transition(ConnectionStatus::Identifying);
            let _ = out_tx.send(GatewayFrame::identify(&IdentifyPayload::new(
                &self.token,
                Intents::from_bits_retain(self.settings.intents),
            )));
        }
        self.transition(ConnectionStatus::WaitingForReady);
    }

    /// Process one inbound text frame
    fn handle_frame(
        &self,
        text: &str,
        out_tx: &mpsc::UnboundedSender<GatewayFrame>,
        backoff: &mut Backoff,
    ) -> Flow {
        let frame = match GatewayFrame::from_json(text) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "dropping undecodable frame");
                return Flow::Continue;
            }
        };

        match frame.op {
            OpCode::Dispatch => {
                // Record the sequence before the handler runs, so a
                // concurrent heartbeat reports the latest frame.
                if let Some(seq) = frame.s {
                    self.session.record_sequence(seq);
                }
                let Some(event_type) = frame.t.as_deref() else {
                    warn!("dispatch frame without event type");
                    return Flow::Continue;
                };
                self.observe_handshake_dispatch(event_type, frame.d.as_ref(), backoff);
                let data = frame.d.clone().unwrap_or(serde_json::Value::Null);
                self.registry.dispatch(&self.ctx, event_type, data);
                Flow::Continue
            }
            OpCode::Heartbeat => {
                // Server may request an immediate heartbeat.
                self.session.record_heartbeat_sent();
                let _ = out_tx.send(GatewayFrame::heartbeat(self.session.sequence()));
                Flow::Continue
            }
            OpCode::HeartbeatAck => {
                self.session.record_heartbeat_ack();
                Flow::Continue
            }
            OpCode::Reconnect => {
                info!("server requested reconnect");
                Flow::Disconnect(GatewayError::ReconnectRequested)
            }
            OpCode::InvalidSession => {
                // Resumable: retry Resume after a short randomized delay.
                // Not resumable: discard the session and fall back to a
                // fresh Identify. The delay is scheduled by the read loop
                // so inbound frames keep draining while we wait.
                let resumable = frame.invalid_session_resumable();
                warn!(resumable, "session invalidated by server");
                if !resumable {
                    self.session.invalidate();
                }
                let delay = Duration::from_secs(rand::thread_rng().gen_range(1..=5));
                Flow::RehandshakeAfter(delay)
            }
            OpCode::Hello => Flow::Continue,
            other => {
                debug!(op = %other, "ignoring unexpected op");
                Flow::Continue
            }
        }
    }

    /// Capture session identity from READY/RESUMED before handlers run
    fn observe_handshake_dispatch(
        &self,
        event_type: &str,
        data: Option<&serde_json::Value>,
        backoff: &mut Backoff,
    ) {
        match EventType::from_str(event_type) {
            Some(EventType::Ready) => {
                if let Some(session_id) = data
                    .and_then(|d| d.get("session_id"))
                    .and_then(|v| v.as_str())
                {
                    self.session.set_session_id(session_id);
                }
                backoff.reset();
                self.transition(ConnectionStatus::Ready);
            }
            Some(EventType::Resumed) => {
                backoff.reset();
                self.transition(ConnectionStatus::Ready);
            }
            _ => {}
        }
    }

    fn classify_close(
        frame: Option<tokio_tungstenite::tungstenite::protocol::CloseFrame<'_>>,
    ) -> GatewayError {
        let Some(frame) = frame else {
            return GatewayError::Transport(
                tokio_tungstenite::tungstenite::Error::ConnectionClosed,
            );
        };
        let raw: u16 = frame.code.into();
        match CloseCode::from_u16(raw) {
            Some(CloseCode::AuthenticationFailed) => GatewayError::AuthenticationFailed,
            Some(code) => {
                info!(code = %code, "gateway close frame");
                GatewayError::Closed(code)
            }
            None => {
                // Standard WebSocket close codes are transient.
                debug!(code = raw, "non-gateway close code");
                GatewayError::Transport(tokio_tungstenite::tungstenite::Error::ConnectionClosed)
            }
        }
    }
}

/// Read-loop control flow after one frame
enum Flow {
    Continue,
    /// Re-handshake after the given delay without leaving the read loop
    RehandshakeAfter(Duration),
    Disconnect(GatewayError),
}
