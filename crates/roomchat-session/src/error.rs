//! Error types for the session layer.

use roomchat_transport::TransportError;

/// Errors returned by session operations.
///
/// Malformed inbound frames and remote disconnects are not errors here:
/// the first are logged and dropped, the second surface through
/// [`Session::closed`](crate::Session::closed).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The data channel could not be opened. No session exists.
    #[error("failed to open session: {0}")]
    Connect(#[source] TransportError),

    /// Writing to an open session failed. The session is now closed.
    #[error("session transport failed: {0}")]
    Transport(#[source] TransportError),
}
