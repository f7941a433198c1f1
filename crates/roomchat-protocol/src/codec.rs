//! Encoding of outbound actions and decoding of inbound frames.
//!
//! Encoding and decoding are *asymmetric*:
//!
//! - Encoding produces only the **payload**. The chat service prefixes
//!   `sender:` itself before relaying the frame to other participants.
//! - Decoding consumes a full **frame** (`sender:payload`) as relayed by
//!   the service.
//!
//! | Action        | Payload           |
//! |---------------|-------------------|
//! | broadcast `T` | `T`               |
//! | reply `M`,`R` | `[REPLY:M] : R`   |
//! | private `U`,`T` | `[PM:U] :T`     |
//! | image `B`     | `[IMAGE] B`       |
//!
//! Reply and private-message payloads have no decoding counterpart: they
//! come back as [`Event::Message`] carrying the literal markup.

use crate::{Event, ProtocolError};

/// Prefix marking an image payload. Followed by one space, then base64.
pub const IMAGE_MARKER: &str = "[IMAGE]";

/// Payload the server sends on behalf of a participant who joined.
pub const JOIN_SENTINEL: &str = "Joined the room";

/// Payload the server sends on behalf of a participant who left.
pub const LEAVE_SENTINEL: &str = "Left the room";

/// Separator between sender and payload in an inbound frame.
const SENDER_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Payload for a plain broadcast: the text itself.
pub fn encode_broadcast(text: &str) -> String {
    text.to_owned()
}

/// Payload replying to `quoted` with `reply`.
pub fn encode_reply(quoted: &str, reply: &str) -> String {
    format!("[REPLY:{quoted}] : {reply}")
}

/// Payload for a private message to `user`.
pub fn encode_private(user: &str, text: &str) -> String {
    format!("[PM:{user}] :{text}")
}

/// Payload for an image given as a base64 string.
pub fn encode_image(base64: &str) -> String {
    format!("{IMAGE_MARKER} {base64}")
}

/// An outbound chat action, borrowed from the caller's strings.
///
/// Sessions build one of these per call and send `encode()`'s result as a
/// single text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound<'a> {
    /// Text delivered to every participant.
    Broadcast(&'a str),
    /// A reply quoting an earlier message.
    Reply { quoted: &'a str, reply: &'a str },
    /// A message addressed to one participant.
    Private { user: &'a str, text: &'a str },
    /// A base64-encoded image.
    Image(&'a str),
}

impl Outbound<'_> {
    /// Returns the exact frame payload for this action.
    pub fn encode(&self) -> String {
        match *self {
            Self::Broadcast(text) => encode_broadcast(text),
            Self::Reply { quoted, reply } => encode_reply(quoted, reply),
            Self::Private { user, text } => encode_private(user, text),
            Self::Image(base64) => encode_image(base64),
        }
    }

    /// Short name of the action, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Broadcast(_) => "broadcast",
            Self::Reply { .. } => "reply",
            Self::Private { .. } => "private",
            Self::Image(_) => "image",
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes one inbound frame into an [`Event`].
///
/// The frame is split on its first `:` into sender and payload; the
/// payload is trimmed and classified in this order:
///
/// 1. starts with `[IMAGE]` → [`Event::Image`], marker and the single
///    character after it removed
/// 2. equals `Left the room` → [`Event::Leave`]
/// 3. equals `Joined the room` → [`Event::Join`]
/// 4. anything else → [`Event::Message`]
///
/// # Errors
/// Returns [`ProtocolError::MalformedFrame`] if the frame has no `:`.
pub fn decode(raw: &str) -> Result<Event, ProtocolError> {
    let (sender, payload) = raw
        .split_once(SENDER_SEPARATOR)
        .ok_or_else(|| ProtocolError::MalformedFrame(raw.to_owned()))?;
    let from = sender.to_owned();
    let payload = payload.trim();

    if let Some(rest) = payload.strip_prefix(IMAGE_MARKER) {
        // The marker is followed by one separator character (a space on
        // well-formed frames).
        let mut chars = rest.chars();
        chars.next();
        return Ok(Event::Image {
            from,
            base64: chars.as_str().to_owned(),
        });
    }

    let event = match payload {
        LEAVE_SENTINEL => Event::Leave { user: from },
        JOIN_SENTINEL => Event::Join { user: from },
        text => Event::Message {
            from,
            text: text.to_owned(),
        },
    };
    Ok(event)
}
