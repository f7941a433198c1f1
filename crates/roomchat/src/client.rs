//! `Chatroom` builder and entry points.
//!
//! This is the entry point for using Roomchat. It ties together the
//! layers: registry (control plane) → transport → session.

use roomchat_protocol::{ParticipantName, RoomIdentity};
use roomchat_registry::{AdminCredential, RegistryClient, RegistryConfig};
use roomchat_session::{Session, SessionError};
use roomchat_transport::{TransportConfig, WebSocketTransport};

use crate::ChatroomError;

/// Builder for configuring a [`Chatroom`] client.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use roomchat::prelude::*;
///
/// # fn run() -> Result<(), ChatroomError> {
/// let chat = Chatroom::builder()
///     .registry_config(
///         RegistryConfig::default().create_timeout(Duration::from_secs(5)),
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatroomBuilder {
    registry: RegistryConfig,
    transport: TransportConfig,
}

impl ChatroomBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry endpoints and HTTP timeouts.
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry = config;
        self
    }

    /// Sets the data-channel connect settings.
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport = config;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    /// Returns [`ChatroomError::Registry`] if a configured base URL does
    /// not parse.
    pub fn build(self) -> Result<Chatroom, ChatroomError> {
        let registry = RegistryClient::new(self.registry)?;
        let transport = WebSocketTransport::new(self.transport);
        Ok(Chatroom {
            registry,
            transport,
        })
    }
}

/// A client for one chat service.
///
/// Holds no per-room state: every call names its room, and every joined
/// room is its own [`Session`]. One client can create, join and
/// administer any number of rooms concurrently.
#[derive(Debug, Clone)]
pub struct Chatroom {
    registry: RegistryClient,
    transport: WebSocketTransport,
}

impl Chatroom {
    /// Returns a builder for configuring the client.
    pub fn builder() -> ChatroomBuilder {
        ChatroomBuilder::new()
    }

    /// A client against the default public service.
    ///
    /// # Errors
    /// Same as [`ChatroomBuilder::build`].
    pub fn new() -> Result<Self, ChatroomError> {
        Self::builder().build()
    }

    /// The underlying registry client, for direct control-plane access.
    pub fn registry(&self) -> &RegistryClient {
        &self.registry
    }

    /// Registers a new room and returns its admin credential.
    ///
    /// The caller is not joined; call [`join_room`](Self::join_room) (or
    /// use [`create_and_join`](Self::create_and_join)) to participate.
    ///
    /// # Errors
    /// - [`ChatroomError::RoomAlreadyExists`] if the registry refuses
    /// - [`ChatroomError::Registry`] if the registry is unreachable
    pub async fn create_room(
        &self,
        room: impl Into<RoomIdentity>,
    ) -> Result<AdminCredential, ChatroomError> {
        let room = room.into();
        Ok(self.registry.create_room(&room).await?)
    }

    /// Opens a data channel to `room` as `user`.
    ///
    /// The returned session is open but has no listener; attach one with
    /// [`Session::set_listener`]. Frames that arrive before then are
    /// dropped.
    ///
    /// # Errors
    /// Returns [`ChatroomError::ConnectionFailed`] on timeout, network
    /// failure, or if the service rejects the handshake (e.g. the room
    /// does not exist).
    pub async fn join_room(
        &self,
        room: impl Into<RoomIdentity>,
        user: impl Into<ParticipantName>,
    ) -> Result<Session, ChatroomError> {
        let room = room.into();
        let user = user.into();
        let url = self.registry.join_url(&room, &user)?;

        Session::connect(&self.transport, url.as_str(), room.clone(), user)
            .await
            .map_err(|e| match e {
                SessionError::Connect(source) => {
                    ChatroomError::ConnectionFailed { room, source }
                }
                other => ChatroomError::Session(other),
            })
    }

    /// Creates `room` and joins it as `user`.
    ///
    /// If the join fails the room stays registered; the credential is lost
    /// with the error, so the room lingers until the service reaps it.
    ///
    /// # Errors
    /// Any error from [`create_room`](Self::create_room) or
    /// [`join_room`](Self::join_room).
    pub async fn create_and_join(
        &self,
        room: impl Into<RoomIdentity>,
        user: impl Into<ParticipantName>,
    ) -> Result<(AdminCredential, Session), ChatroomError> {
        let room = room.into();
        let admin = self.create_room(room.clone()).await?;
        let session = self.join_room(room, user).await.inspect_err(|e| {
            tracing::warn!(room = %admin.room(), error = %e, "room created but join failed");
        })?;
        Ok((admin, session))
    }

    /// Removes `user` from the credential's room.
    ///
    /// `true` only if the registry confirmed. Never errors.
    pub async fn kick_user(
        &self,
        admin: &AdminCredential,
        user: impl Into<ParticipantName>,
    ) -> bool {
        self.registry.kick_user(admin, &user.into()).await
    }

    /// Closes the credential's room, disconnecting everyone in it.
    ///
    /// `true` only if the registry confirmed. Never errors.
    pub async fn close_room(&self, admin: &AdminCredential) -> bool {
        self.registry.close_room(admin).await
    }
}
