//! HTTP client for the room registry.
//!
//! Every endpoint is a `GET` with its arguments in the query string and a
//! plain-text body:
//!
//! ```text
//! {http_base}/create?room={room}                 → 201 + admin token
//! {http_base}/{room}/delete?user={user}&admin={t} → kick
//! {http_base}/{room}/delete?admin={t}             → close
//! {ws_base}/join?room={room}&user={user}          → data-channel upgrade
//! ```

use reqwest::{Client, StatusCode, Url};
use roomchat_protocol::{ParticipantName, RoomIdentity};

use crate::{AdminCredential, RegistryConfig, RegistryError};

/// Client for the room registry's control-plane endpoints.
///
/// Holds no per-room state: the room and admin token are passed in on
/// every call, so one client can serve any number of rooms. Cheap to
/// clone (the inner `reqwest::Client` is reference-counted).
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    http_base: Url,
    ws_base: Url,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidUrl`] if a base URL doesn't parse
    /// - [`RegistryError::Client`] if the HTTP client can't be built
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http_base = parse_base(&config.http_base)?;
        let ws_base = parse_base(&config.ws_base)?;
        let http = Client::builder().build().map_err(RegistryError::Client)?;
        Ok(Self {
            http,
            http_base,
            ws_base,
            config,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Reserves `room` and returns the admin credential for it.
    ///
    /// Creating a room does not join it: the creator still has to open a
    /// data channel like any other participant.
    ///
    /// # Errors
    /// - [`RegistryError::RoomAlreadyExists`] for any status other than 201
    /// - [`RegistryError::Unavailable`] on network failure or timeout
    pub async fn create_room(
        &self,
        room: &RoomIdentity,
    ) -> Result<AdminCredential, RegistryError> {
        let mut url = endpoint(&self.http_base, &["create"])?;
        url.query_pairs_mut().append_pair("room", room.as_str());

        let response = self
            .http
            .get(url)
            .timeout(self.config.create_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%room, error = %e, "create request failed");
                RegistryError::Unavailable(e)
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            tracing::info!(%room, %status, "registry refused room creation");
            return Err(RegistryError::RoomAlreadyExists(room.clone()));
        }

        let token = response.text().await.map_err(RegistryError::Unavailable)?;
        tracing::info!(%room, "room created");
        Ok(AdminCredential::new(room.clone(), token))
    }

    /// Builds the data-channel URL for `user` joining `room`.
    pub fn join_url(
        &self,
        room: &RoomIdentity,
        user: &ParticipantName,
    ) -> Result<Url, RegistryError> {
        let mut url = endpoint(&self.ws_base, &["join"])?;
        url.query_pairs_mut()
            .append_pair("room", room.as_str())
            .append_pair("user", user.as_str());
        Ok(url)
    }

    /// Asks the registry to remove `user` from the credential's room.
    ///
    /// Returns `true` only when the registry answers with a 2xx status.
    /// Network errors, timeouts and refusals (e.g. a wrong admin token)
    /// all yield `false`. On success the registry closes the target's
    /// data channel; their session sees an unsolicited disconnect.
    pub async fn kick_user(
        &self,
        admin: &AdminCredential,
        user: &ParticipantName,
    ) -> bool {
        let url = match self.delete_url(admin, Some(user)) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(room = %admin.room(), error = %e, "kick failed");
                return false;
            }
        };
        let ok = self.admin_request(url).await;
        if ok {
            tracing::info!(room = %admin.room(), %user, "user kicked");
        }
        ok
    }

    /// Asks the registry to close the credential's room.
    ///
    /// Same contract as [`kick_user`](Self::kick_user). On success every
    /// participant's session sees a disconnect.
    pub async fn close_room(&self, admin: &AdminCredential) -> bool {
        let url = match self.delete_url(admin, None) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(room = %admin.room(), error = %e, "close failed");
                return false;
            }
        };
        let ok = self.admin_request(url).await;
        if ok {
            tracing::info!(room = %admin.room(), "room closed");
        }
        ok
    }

    fn delete_url(
        &self,
        admin: &AdminCredential,
        user: Option<&ParticipantName>,
    ) -> Result<Url, RegistryError> {
        let mut url =
            endpoint(&self.http_base, &[admin.room().as_str(), "delete"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(user) = user {
                query.append_pair("user", user.as_str());
            }
            query.append_pair("admin", admin.token());
        }
        Ok(url)
    }

    /// Sends a kick/close request and reduces the outcome to a bool.
    async fn admin_request(&self, url: Url) -> bool {
        match self
            .http
            .get(url)
            .timeout(self.config.admin_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "registry rejected admin request"
                );
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "admin request failed");
                false
            }
        }
    }
}

fn parse_base(raw: &str) -> Result<Url, RegistryError> {
    let url =
        Url::parse(raw).map_err(|e| RegistryError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(RegistryError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Appends `segments` to `base` as percent-encoded path segments.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, RegistryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| RegistryError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
