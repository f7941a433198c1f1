//! Transport abstraction layer for Roomchat.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! the persistent duplex channel a room session runs on. The transport is
//! assumed to deliver text frames reliably and in order, and to signal
//! disconnects.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket client via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::time::Duration;

/// Default time allowed for the connect + upgrade handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Transport settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound on establishing a connection, handshake included.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// A close code plus reason, as carried by a close frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    pub code: u16,
    pub reason: String,
}

impl CloseFrame {
    /// Code 1001 ("going away"), sent when a participant leaves.
    pub const GOING_AWAY: u16 = 1001;

    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CloseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

/// One item read from a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// A text frame.
    Text(String),
    /// A binary frame. The chat protocol is text-only.
    Binary(Vec<u8>),
    /// The peer closed the connection, with its close frame if it sent one.
    /// Also returned when the stream ends without a close frame.
    Closed(Option<CloseFrame>),
}

/// Opens outbound connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Connects to `url` and completes the handshake.
    async fn connect(&self, url: &str) -> Result<Self::Connection, Self::Error>;
}

/// A single duplex connection carrying text frames.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one text frame.
    async fn send(&self, text: &str) -> Result<(), Self::Error>;

    /// Receives the next frame. Control frames (ping/pong) are skipped.
    async fn recv(&self) -> Result<Incoming, Self::Error>;

    /// Sends a transport-level keepalive ping.
    async fn ping(&self) -> Result<(), Self::Error>;

    /// Starts the closing handshake with the given code and reason.
    async fn close(&self, frame: CloseFrame) -> Result<(), Self::Error>;

    /// Flushes any frame the connection queued on its own, such as the
    /// reply to a peer's close frame. Call after [`Incoming::Closed`] to
    /// complete the peer's closing handshake.
    async fn finish(&self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
