//! Unified error type for the Roomchat client.

use roomchat_protocol::RoomIdentity;
use roomchat_registry::RegistryError;
use roomchat_session::SessionError;
use roomchat_transport::TransportError;

/// Top-level error for the Roomchat client.
///
/// The two failures a caller is expected to branch on get their own
/// variants: [`RoomAlreadyExists`](Self::RoomAlreadyExists) from create and
/// [`ConnectionFailed`](Self::ConnectionFailed) from join. Kick and close
/// never error; they return `false`.
#[derive(Debug, thiserror::Error)]
pub enum ChatroomError {
    /// The registry refused to create the room.
    #[error("room {0} already exists")]
    RoomAlreadyExists(RoomIdentity),

    /// The data channel for `room` could not be opened: timeout, network
    /// failure, or the registry rejected the room (e.g. unknown name).
    #[error("failed to join room {room}: {source}")]
    ConnectionFailed {
        room: RoomIdentity,
        #[source]
        source: TransportError,
    },

    /// Any other registry error (unreachable, bad configuration).
    #[error(transparent)]
    Registry(RegistryError),

    /// A session-level error (write failure on an open session).
    #[error(transparent)]
    Session(SessionError),
}

impl From<RegistryError> for ChatroomError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::RoomAlreadyExists(room) => Self::RoomAlreadyExists(room),
            other => Self::Registry(other),
        }
    }
}

impl From<SessionError> for ChatroomError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}
