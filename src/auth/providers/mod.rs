//! External credential providers for the two post-install services.
//!
//! Spotify runs a full authorization-code exchange; Genius stores a token
//! the user pastes. Both are variants of one capability so the front-end
//! drives them uniformly.

mod genius;
mod spotify;

pub use genius::{GENIUS_AUTH_URL, GeniusToken};
pub use spotify::{REDIRECT_URI, SpotifyAuthorization, extract_authorization_code};
pub(crate) use spotify::DEFAULT_ACCOUNTS_URL;

use async_trait::async_trait;

use super::config::ConfigStore;
use super::error::AuthError;

/// One external credential source set up after installation.
#[async_trait]
pub trait CredentialProvider {
    fn name(&self) -> &'static str;

    /// Point the user at the service's consent page. Receiving the result
    /// is out-of-band: the caller captures the user's input and passes it
    /// to [`CredentialProvider::complete_flow`].
    fn begin_flow(&self, config: &ConfigStore) -> Result<(), AuthError>;

    /// Finish the flow with the user-supplied input (authorization code or
    /// pasted token) and persist the resulting credentials before
    /// returning.
    async fn complete_flow(&self, config: &mut ConfigStore, input: &str)
    -> Result<(), AuthError>;

    /// Credential currently stored for this provider, if any.
    fn current_token(&self, config: &ConfigStore) -> Option<String>;
}
