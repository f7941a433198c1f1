//! The admin credential handed to a room's creator.

use roomchat_protocol::RoomIdentity;
use secrecy::{ExposeSecret, SecretString};

/// The admin token for one room.
///
/// Only the creator receives one. It carries the room it was issued for,
/// so kick/close can only ever be sent for that room. The token travels
/// on the control plane only, never over the data channel.
///
/// The token is a [`SecretString`]: `Debug` redacts it and it is zeroized
/// on drop.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    room: RoomIdentity,
    token: SecretString,
}

impl AdminCredential {
    /// Rebuilds a credential from a room and a token obtained earlier.
    pub fn new(room: RoomIdentity, token: impl Into<String>) -> Self {
        Self {
            room,
            token: SecretString::from(token.into()),
        }
    }

    /// The room this credential administers.
    pub fn room(&self) -> &RoomIdentity {
        &self.room
    }

    /// The raw token, as returned by the registry.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let cred = AdminCredential::new(RoomIdentity::new("lobby"), "s3cret");
        let debug = format!("{cred:?}");
        assert!(debug.contains("lobby"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_accessors() {
        let cred = AdminCredential::new(RoomIdentity::new("lobby"), "tok");
        assert_eq!(cred.room().as_str(), "lobby");
        assert_eq!(cred.token(), "tok");
    }

    #[test]
    fn test_clone_keeps_token() {
        let cred = AdminCredential::new(RoomIdentity::new("lobby"), "tok");
        let cloned = cred.clone();
        assert_eq!(cloned.token(), "tok");
        assert_eq!(cloned.room(), cred.room());
    }
}
