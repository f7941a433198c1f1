//! Error types for the registry client.

use roomchat_protocol::RoomIdentity;

/// Errors that can occur talking to the room registry.
///
/// Kick and close never produce these; they degrade to `false`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry refused to create the room. Any non-201 answer to a
    /// create request means the name is taken.
    #[error("room {0} already exists")]
    RoomAlreadyExists(RoomIdentity),

    /// A configured base URL can't be parsed or can't carry a path.
    #[error("invalid registry url: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The registry could not be reached, timed out, or sent an unreadable
    /// body.
    #[error("registry unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),
}
