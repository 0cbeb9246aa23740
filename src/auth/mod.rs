//! Configuration ownership and authenticated Spotify calls.
//!
//! [`CredentialManager`] is the only component that reads or writes the
//! persisted configuration. Authenticated requests go through
//! [`CredentialManager::request`], which refreshes the bearer token once on
//! a 401/400 and retries exactly once.

pub mod config;
pub mod error;
pub mod providers;

pub use config::ConfigStore;
pub use error::AuthError;
pub use providers::{CredentialProvider, GeniusToken, SpotifyAuthorization};

use std::path::Path;
use std::time::Duration;

use log::warn;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::installer::APP_FOLDER;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONFIG_FILE: &str = "config.json";

/// Owns the persisted configuration and mediates all authenticated calls.
pub struct CredentialManager {
    http: reqwest::Client,
    accounts_url: String,
    config: ConfigStore,
}

impl CredentialManager {
    /// Load the configuration from `<install_dir>/Spotr/config.json`,
    /// eagerly; a missing file starts the manager unauthenticated.
    pub fn open(install_dir: &Path) -> Result<Self, AuthError> {
        let path = install_dir.join(APP_FOLDER).join(CONFIG_FILE);
        Self::with_config(ConfigStore::load(path)?)
    }

    pub fn with_config(config: ConfigStore) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            accounts_url: providers::DEFAULT_ACCOUNTS_URL.to_string(),
            config,
        })
    }

    /// Override the accounts service base URL (stub servers in tests).
    pub fn with_accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = url.into();
        self
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    /// Authenticated request with the default bearer header.
    pub async fn request(
        &mut self,
        method: Method,
        url: &str,
    ) -> Result<Option<Value>, AuthError> {
        self.request_with(method, url, None, None).await
    }

    /// Authenticated request with optional explicit headers and JSON body.
    ///
    /// A 401 or 400 triggers a single token refresh; the retry always
    /// carries a freshly built bearer header. Any other non-success status
    /// after the possible retry is a typed error. A success body that is
    /// not valid JSON yields `Ok(None)`.
    pub async fn request_with(
        &mut self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<&Value>,
    ) -> Result<Option<Value>, AuthError> {
        let mut response = self.send(method.clone(), url, headers, body).await?;

        if matches!(response.status().as_u16(), 400 | 401) {
            self.refresh_access_token().await?;
            response = self.send(method, url, None, body).await?;
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("request error - status {status} for {url}");
            return Err(AuthError::RequestFailed { status });
        }

        Ok(response.json().await.ok())
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, AuthError> {
        let mut request = self.http.request(method, url);
        match headers {
            Some(headers) => request = request.headers(headers),
            None => {
                let key = self.config.get(config::KEY_ACCESS_TOKEN).unwrap_or("");
                request = request.header(AUTHORIZATION, format!("Bearer {key}"));
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Exchange the stored refresh token and Basic credential blob for a
    /// new access token, store it, and persist.
    pub async fn refresh_access_token(&mut self) -> Result<(), AuthError> {
        let refresh_token = self
            .config
            .get(config::KEY_REFRESH_TOKEN)
            .ok_or(AuthError::NotAuthorized(config::KEY_REFRESH_TOKEN))?
            .to_string();
        let blob = self
            .config
            .get(config::KEY_BASIC_CREDENTIALS)
            .ok_or(AuthError::NotAuthorized(config::KEY_BASIC_CREDENTIALS))?
            .to_string();

        let token_url = Url::parse(&self.accounts_url)?.join("api/token")?;
        let response = self
            .http
            .post(token_url)
            .header(AUTHORIZATION, format!("Basic {blob}"))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &refresh_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(
                "token refresh failed - status {status}; base_64 or refresh_token is likely stale"
            );
            return Err(AuthError::TokenExchange { status });
        }

        let payload: RefreshResponse = response.json().await?;
        self.config.set(config::KEY_ACCESS_TOKEN, payload.access_token);
        self.config.persist();
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}
