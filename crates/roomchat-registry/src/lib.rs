//! Room registry client for Roomchat.
//!
//! The registry is the control plane: an HTTP service that reserves room
//! names, hands the creator an admin token, and performs kicks and room
//! closes. The chat traffic itself never goes through it.
//!
//! # Key types
//!
//! - [`RegistryClient`]: issues create/kick/close requests and builds
//!   data-channel join URLs
//! - [`RegistryConfig`]: base URLs and timeouts
//! - [`AdminCredential`]: admin token bound to the room it was issued for
//!
//! # Failure contract
//!
//! [`RegistryClient::create_room`] returns a `Result`; kick and close
//! return `bool`. The asymmetry is part of the API: a refused kick is a
//! routine outcome, not an error the caller must handle.

mod client;
mod config;
mod credential;
mod error;

pub use client::RegistryClient;
pub use config::{
    RegistryConfig, DEFAULT_ADMIN_TIMEOUT, DEFAULT_CREATE_TIMEOUT,
    DEFAULT_HTTP_BASE, DEFAULT_WS_BASE,
};
pub use credential::AdminCredential;
pub use error::RegistryError;
