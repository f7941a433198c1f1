//! Wire protocol for Roomchat.
//!
//! This crate defines the "language" spoken on a room's data channel:
//!
//! - **Types** ([`Event`], [`RoomIdentity`], [`ParticipantName`]): the
//!   decoded, typed view of what travels on the wire, plus the identity
//!   newtypes used to address rooms and participants.
//! - **Codec** ([`Outbound`], [`decode`], `encode_*`): how outbound
//!   actions become frame payloads and how inbound frames become events.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (raw text frames) and
//! the session (listener dispatch). It does no I/O.
//!
//! ```text
//! Transport (text) → Protocol (Event) → Session (listener callbacks)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{
    decode, encode_broadcast, encode_image, encode_private, encode_reply,
    Outbound, IMAGE_MARKER, JOIN_SENTINEL, LEAVE_SENTINEL,
};
pub use error::ProtocolError;
pub use types::{Event, ParticipantName, RoomIdentity};
