//! # Roomchat
//!
//! Client for transient, server-hosted group chat rooms.
//!
//! A room is created through an HTTP registry, which returns an admin
//! token. Participants join over a WebSocket data channel and exchange
//! colon-framed text messages. The room creator can kick participants or
//! close the room with the token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roomchat::prelude::*;
//!
//! # async fn run() -> Result<(), ChatroomError> {
//! let chat = Chatroom::new()?;
//! let (admin, session) = chat.create_and_join("lobby", "alice").await?;
//!
//! let (queue, mut events) = event_queue();
//! session.set_listener(queue);
//! session.broadcast("hello").await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! chat.close_room(&admin).await;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{Chatroom, ChatroomBuilder};
pub use error::ChatroomError;

pub use roomchat_protocol as protocol;
pub use roomchat_registry as registry;
pub use roomchat_session as session;
pub use roomchat_transport as transport;

pub mod prelude {
    pub use crate::{Chatroom, ChatroomBuilder, ChatroomError};
    pub use roomchat_protocol::{Event, ParticipantName, RoomIdentity};
    pub use roomchat_registry::{AdminCredential, RegistryConfig};
    pub use roomchat_session::{
        event_queue, CloseReason, EventListener, EventQueue, Session,
        SessionState,
    };
    pub use roomchat_transport::{CloseFrame, TransportConfig};
}
