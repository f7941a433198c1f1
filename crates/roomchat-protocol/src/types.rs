//! Core protocol types for Roomchat.
//!
//! The data channel itself carries plain text (`sender:payload`). The
//! types here are what that text means once decoded, plus the identity
//! newtypes used to build control-plane and data-plane addresses.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The name of a room.
///
/// Assigned when a room is created or joined and never changes for the
/// life of a session. Both the registry URLs and the data-channel URL
/// are built from it.
///
/// Newtype over `String` so a room name can't be passed where a user
/// name is expected. `#[serde(transparent)]` keeps the JSON form a
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomIdentity(String);

impl RoomIdentity {
    /// Creates a room identity from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the room name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RoomIdentity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A participant's display name.
///
/// Chosen by the caller. Uniqueness inside a room is the registry's
/// business, not the client's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Creates a participant name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the display name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ParticipantName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// ---------------------------------------------------------------------------
// Event: the decoded form of an inbound frame
// ---------------------------------------------------------------------------

/// A decoded inbound frame.
///
/// Produced by [`decode`](crate::decode) and handed to the session's
/// listener. An event has no life beyond that callback.
///
/// There are deliberately no `Reply` or `Private` variants: reply and
/// private-message frames decode as [`Event::Message`] with their
/// bracket markup left in the text.
///
/// `#[serde(tag = "type")]` gives internally tagged JSON, e.g.
/// `{ "type": "Join", "user": "carol" }`, for hosts that forward events
/// to a browser or a log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A chat message (including reply and private-message markup).
    Message { from: String, text: String },

    /// An image, base64-encoded, with the `[IMAGE] ` marker stripped.
    Image { from: String, base64: String },

    /// Server sentinel: `user` joined the room.
    Join { user: String },

    /// Server sentinel: `user` left the room.
    Leave { user: String },
}

impl Event {
    /// Returns the participant this event is about (sender or subject).
    pub fn participant(&self) -> &str {
        match self {
            Self::Message { from, .. } | Self::Image { from, .. } => from,
            Self::Join { user } | Self::Leave { user } => user,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
