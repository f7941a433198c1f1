//! Error types for the protocol layer.
//!
//! Each crate in Roomchat defines its own error enum. A `ProtocolError`
//! always means the problem is in the shape of a frame, never in the
//! network or the registry.

/// Errors that can occur in the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The inbound frame has no `:` separating sender from payload.
    ///
    /// This is a protocol violation on the server side. Sessions log it
    /// and drop the frame; they do not tear the connection down.
    #[error("malformed frame (missing ':' separator): {0:?}")]
    MalformedFrame(String),
}
