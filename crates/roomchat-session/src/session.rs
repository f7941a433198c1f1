//! A live connection to one room.
//!
//! A session owns exactly one data-channel connection. It:
//! - sends outbound actions as single text frames
//! - runs a reader task that decodes inbound frames and calls the listener
//! - tracks its lifecycle state and publishes it on a `watch` channel

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use roomchat_protocol::{decode, Outbound, ParticipantName, RoomIdentity};
use roomchat_transport::{
    CloseFrame, Connection, ConnectionId, Incoming, Transport,
    WebSocketConnection, WebSocketTransport,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{EventListener, SessionError};

/// Reason sent in the close frame on [`Session::leave`].
pub const LEAVE_REASON: &str = "User left";

/// Close code sent when the peer delivers a frame we can't read as text.
const UNSUPPORTED_DATA: u16 = 1003;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Why a session closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The caller called [`Session::leave`].
    Left,

    /// The peer closed the channel: a kick, a room close, or the server
    /// going away. Carries the peer's close frame when it sent one.
    Disconnected(Option<CloseFrame>),

    /// Reading or writing failed at the transport level.
    TransportFailed(String),

    /// The peer sent something the session can't interpret at all.
    ProtocolViolation(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Disconnected(Some(frame)) => write!(f, "disconnected ({frame})"),
            Self::Disconnected(None) => write!(f, "disconnected"),
            Self::TransportFailed(e) => write!(f, "transport failed: {e}"),
            Self::ProtocolViolation(e) => write!(f, "protocol violation: {e}"),
        }
    }
}

/// The lifecycle state of a session.
///
/// ```text
/// Connecting ──(handshake ok)──→ Open ──(leave / disconnect / error)──→ Closed
/// ```
///
/// `Closed` is terminal. A closed session can't be reopened; join again
/// for a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The handshake is in flight. [`Session::connect`] only returns once
    /// it has finished, so a returned session is never in this state.
    Connecting,
    Open,
    Closed(CloseReason),
}

impl SessionState {
    /// Returns `true` if outbound actions are accepted.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    /// The close reason, once closed.
    pub fn close_reason(&self) -> Option<&CloseReason> {
        match self {
            Self::Closed(reason) => Some(reason),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared state between the session handle and its reader task
// ---------------------------------------------------------------------------

struct Shared {
    conn: WebSocketConnection,
    listener: RwLock<Option<Arc<dyn EventListener>>>,
    state: watch::Sender<SessionState>,
    room: RoomIdentity,
}

impl Shared {
    fn is_closed(&self) -> bool {
        self.state.borrow().is_closed()
    }

    /// Moves the session to `Closed(reason)`. Returns `false` if it was
    /// already closed, in which case the first reason stands.
    fn mark_closed(&self, reason: CloseReason) -> bool {
        let room = &self.room;
        self.state.send_if_modified(|state| {
            if state.is_closed() {
                return false;
            }
            tracing::info!(%room, %reason, "session closed");
            *state = SessionState::Closed(reason);
            true
        })
    }

    fn current_listener(&self) -> Option<Arc<dyn EventListener>> {
        self.listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Decodes one frame and hands it to the listener.
    fn dispatch(&self, raw: &str) {
        let event = match decode(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(room = %self.room, error = %e, "discarding malformed frame");
                return;
            }
        };
        // Clone the Arc out so the callback runs without holding the lock.
        match self.current_listener() {
            Some(listener) => {
                tracing::trace!(room = %self.room, ?event, "dispatching event");
                listener.on_event(&event);
            }
            None => {
                tracing::trace!(room = %self.room, ?event, "no listener attached, event dropped");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An open (or formerly open) connection to one room.
///
/// Outbound actions are fire-and-forget: they return once the frame is
/// written, without waiting for any acknowledgement. On a closed session
/// they are silent no-ops that return `Ok(())`.
///
/// Dropping the session stops its reader task and drops the connection.
pub struct Session {
    user: ParticipantName,
    shared: Arc<Shared>,
    state_rx: watch::Receiver<SessionState>,
    reader: JoinHandle<()>,
}

impl Session {
    /// Dials `url` and opens a session on it.
    ///
    /// # Errors
    /// Returns [`SessionError::Connect`] if the connection or handshake
    /// fails or times out. No session is created in that case.
    pub async fn connect(
        transport: &WebSocketTransport,
        url: &str,
        room: RoomIdentity,
        user: ParticipantName,
    ) -> Result<Self, SessionError> {
        tracing::debug!(%room, %user, "connecting");
        let conn = transport.connect(url).await.map_err(|e| {
            tracing::info!(%room, %user, error = %e, "join failed");
            SessionError::Connect(e)
        })?;
        Ok(Self::open(conn, room, user))
    }

    /// Wraps an already-connected channel in a session and starts reading.
    pub fn open(
        conn: WebSocketConnection,
        room: RoomIdentity,
        user: ParticipantName,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(SessionState::Open);
        let conn_id = conn.id();
        let shared = Arc::new(Shared {
            conn,
            listener: RwLock::new(None),
            state: state_tx,
            room,
        });
        tracing::info!(room = %shared.room, %user, %conn_id, "joined room");

        let reader = tokio::spawn(read_loop(Arc::clone(&shared)));
        Self {
            user,
            shared,
            state_rx,
            reader,
        }
    }

    /// The room this session belongs to. Never changes.
    pub fn room(&self) -> &RoomIdentity {
        &self.shared.room
    }

    /// The name this session joined under.
    pub fn user(&self) -> &ParticipantName {
        &self.user
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.shared.conn.id()
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state_rx.borrow().is_open()
    }

    /// A receiver that observes every state change, for use in
    /// `tokio::select!` loops.
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Waits until the session is closed and returns why.
    ///
    /// This is the out-of-band disconnect signal: a kick or room close
    /// shows up here, never as an event to the listener.
    pub async fn closed(&self) -> CloseReason {
        let mut rx = self.state_rx.clone();
        let reason = rx
            .wait_for(SessionState::is_closed)
            .await
            .ok()
            .and_then(|state| state.close_reason().cloned());
        reason.unwrap_or_else(|| {
            CloseReason::TransportFailed("session state channel dropped".into())
        })
    }

    // -- Listener -----------------------------------------------------------

    /// Attaches `listener`, replacing any previous one.
    ///
    /// Frames already being dispatched may still reach the old listener.
    pub fn set_listener(&self, listener: impl EventListener) {
        self.replace_listener(Some(Arc::new(listener)));
    }

    /// Detaches the current listener. Later frames are dropped.
    pub fn clear_listener(&self) {
        self.replace_listener(None);
    }

    fn replace_listener(&self, listener: Option<Arc<dyn EventListener>>) {
        *self
            .shared
            .listener
            .write()
            .unwrap_or_else(PoisonError::into_inner) = listener;
    }

    // -- Outbound actions ---------------------------------------------------

    /// Sends `text` to everyone in the room.
    pub async fn broadcast(&self, text: &str) -> Result<(), SessionError> {
        self.send(Outbound::Broadcast(text)).await
    }

    /// Replies to the message `quoted` with `reply`.
    pub async fn reply(&self, quoted: &str, reply: &str) -> Result<(), SessionError> {
        self.send(Outbound::Reply { quoted, reply }).await
    }

    /// Sends `text` privately to `user`.
    pub async fn send_private(&self, user: &str, text: &str) -> Result<(), SessionError> {
        self.send(Outbound::Private { user, text }).await
    }

    /// Shares an image given as a base64 string.
    pub async fn send_image(&self, base64: &str) -> Result<(), SessionError> {
        self.send(Outbound::Image(base64)).await
    }

    /// Sends a transport-level ping.
    ///
    /// The data channel has no idle timeout of its own; call this during
    /// long silences to keep intermediaries from dropping the connection.
    /// The pong is consumed by the transport and never reaches the
    /// listener.
    pub async fn ping(&self) -> Result<(), SessionError> {
        if !self.is_open() {
            tracing::debug!(room = %self.room(), "session closed, ping skipped");
            return Ok(());
        }
        self.shared
            .conn
            .ping()
            .await
            .map_err(|e| self.fail(e))
    }

    /// Leaves the room: sends close code 1001 `"User left"` and closes
    /// the session.
    ///
    /// Idempotent. On an already-closed session it does nothing.
    pub async fn leave(&self) {
        if !self.shared.mark_closed(CloseReason::Left) {
            tracing::debug!(room = %self.room(), "leave on closed session ignored");
            return;
        }
        let frame = CloseFrame::new(CloseFrame::GOING_AWAY, LEAVE_REASON);
        if let Err(e) = self.shared.conn.close(frame).await {
            tracing::debug!(room = %self.room(), error = %e, "close frame not delivered");
        }
    }

    async fn send(&self, action: Outbound<'_>) -> Result<(), SessionError> {
        if !self.is_open() {
            tracing::debug!(
                room = %self.room(),
                kind = action.kind(),
                "session closed, outbound action dropped"
            );
            return Ok(());
        }
        self.shared
            .conn
            .send(&action.encode())
            .await
            .map_err(|e| self.fail(e))?;
        tracing::debug!(room = %self.room(), kind = action.kind(), "frame sent");
        Ok(())
    }

    /// Closes the session after a write failure and wraps the error.
    fn fail(&self, e: roomchat_transport::TransportError) -> SessionError {
        self.shared
            .mark_closed(CloseReason::TransportFailed(e.to_string()));
        SessionError::Transport(e)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("room", self.room())
            .field("user", &self.user)
            .field("state", &*self.state_rx.borrow())
            .finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

/// Reads frames until the session closes. One frame is fully dispatched
/// before the next is read, which keeps listener calls in arrival order.
async fn read_loop(shared: Arc<Shared>) {
    loop {
        let incoming = shared.conn.recv().await;
        if shared.is_closed() {
            break;
        }
        match incoming {
            Ok(Incoming::Text(text)) => shared.dispatch(&text),
            Ok(Incoming::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => shared.dispatch(&text),
                Err(_) => {
                    shared.mark_closed(CloseReason::ProtocolViolation(
                        "binary frame is not UTF-8".into(),
                    ));
                    let frame = CloseFrame::new(UNSUPPORTED_DATA, "text frames only");
                    if let Err(e) = shared.conn.close(frame).await {
                        tracing::debug!(room = %shared.room, error = %e, "close frame not delivered");
                    }
                    break;
                }
            },
            Ok(Incoming::Closed(frame)) => {
                shared.mark_closed(CloseReason::Disconnected(frame));
                if let Err(e) = shared.conn.finish().await {
                    tracing::debug!(room = %shared.room, error = %e, "close reply not delivered");
                }
                break;
            }
            Err(e) => {
                shared.mark_closed(CloseReason::TransportFailed(e.to_string()));
                break;
            }
        }
    }
    tracing::debug!(room = %shared.room, "reader stopped");
}
