//! Spotify authorization-code flow with Basic client credentials.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use url::Url;

use crate::auth::config::{
    ConfigStore, KEY_ACCESS_TOKEN, KEY_BASIC_CREDENTIALS, KEY_REFRESH_TOKEN,
};
use crate::auth::error::AuthError;

use super::CredentialProvider;

pub(crate) const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Fixed redirect target registered for the application. The user pastes
/// the URL they land on; the code is parsed out of it.
pub const REDIRECT_URI: &str = "https://www.google.com/";

const SCOPES: &str = concat!(
    "playlist-read-collaborative ",
    "playlist-read-private ",
    "user-read-playback-state ",
    "user-modify-playback-state ",
    "user-read-currently-playing ",
    "user-read-recently-played ",
    "playlist-modify-private ",
    "playlist-modify-public",
);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the authorization-code exchange against the Spotify accounts
/// service. The exchange deliberately bypasses the bearer-token request
/// path: no access token exists yet.
pub struct SpotifyAuthorization {
    http: reqwest::Client,
    accounts_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyAuthorization {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }

    /// Override the accounts service base URL (stub servers in tests).
    pub fn with_accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = url.into();
        self
    }

    /// Consent URL the user must visit to obtain an authorization code.
    pub fn authorize_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.accounts_url)?.join("authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", REDIRECT_URI)
            .append_pair("scope", SCOPES);
        Ok(url)
    }
}

#[async_trait]
impl CredentialProvider for SpotifyAuthorization {
    fn name(&self) -> &'static str {
        "spotify"
    }

    fn begin_flow(&self, _config: &ConfigStore) -> Result<(), AuthError> {
        let url = self.authorize_url()?;
        opener::open_browser(url.as_str())?;
        Ok(())
    }

    async fn complete_flow(
        &self,
        config: &mut ConfigStore,
        code: &str,
    ) -> Result<(), AuthError> {
        let token_url = Url::parse(&self.accounts_url)?.join("api/token")?;
        let blob = BASE64.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .http
            .post(token_url)
            .header("Authorization", format!("Basic {blob}"))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", REDIRECT_URI),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::TokenExchange {
                status: response.status().as_u16(),
            });
        }

        let payload: TokenResponse = response.json().await?;
        config.set(KEY_REFRESH_TOKEN, payload.refresh_token);
        config.set(KEY_BASIC_CREDENTIALS, blob);
        config.persist();
        Ok(())
    }

    fn current_token(&self, config: &ConfigStore) -> Option<String> {
        config.get(KEY_ACCESS_TOKEN).map(str::to_string)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    refresh_token: String,
}

/// Pull the `code` query parameter out of a pasted redirect URL. A bare
/// code (anything that is not a URL) is accepted as-is.
pub fn extract_authorization_code(input: &str) -> Result<String, AuthError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidRedirect("empty input".to_string()));
    }
    match Url::parse(trimmed) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, code)| code.into_owned())
            .ok_or_else(|| {
                AuthError::InvalidRedirect(format!("no code parameter in {trimmed}"))
            }),
        Err(_) => Ok(trimmed.to_string()),
    }
}
