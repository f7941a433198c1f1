//! Live room sessions for Roomchat.
//!
//! This crate owns the data channel once a participant has joined:
//!
//! 1. **Outbound**: broadcast, reply, private message, image, ping, leave
//!    ([`Session`])
//! 2. **Inbound**: a reader task decodes each frame and calls the
//!    attached [`EventListener`], strictly in arrival order
//! 3. **Lifecycle**: `Connecting → Open → Closed`, observable through
//!    [`Session::state`] and [`Session::closed`]
//!
//! # How it fits in the stack
//!
//! ```text
//! Chatroom (above)  ← creates sessions from registry join URLs
//!     ↕
//! Session Layer (this crate)  ← one live room connection + listener
//!     ↕
//! Protocol / Transport (below)  ← frame codec, WebSocket connection
//! ```

mod error;
mod listener;
mod session;

pub use error::SessionError;
pub use listener::{event_queue, EventListener, EventQueue};
pub use session::{CloseReason, Session, SessionState, LEAVE_REASON};
