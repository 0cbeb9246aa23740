//! Genius static-token provider.

use async_trait::async_trait;

use crate::auth::config::{ConfigStore, KEY_GENIUS_TOKEN};
use crate::auth::error::AuthError;

use super::CredentialProvider;

/// Consent page where the user creates an API client and copies its token.
pub const GENIUS_AUTH_URL: &str = "https://api.genius.com/oauth/authorize";

/// Genius does not go through a token endpoint here: the user pastes a
/// pre-obtained access token and it is stored verbatim, unvalidated.
pub struct GeniusToken;

#[async_trait]
impl CredentialProvider for GeniusToken {
    fn name(&self) -> &'static str {
        "genius"
    }

    fn begin_flow(&self, _config: &ConfigStore) -> Result<(), AuthError> {
        opener::open_browser(GENIUS_AUTH_URL)?;
        Ok(())
    }

    async fn complete_flow(
        &self,
        config: &mut ConfigStore,
        token: &str,
    ) -> Result<(), AuthError> {
        config.set(KEY_GENIUS_TOKEN, token);
        config.persist();
        Ok(())
    }

    fn current_token(&self, config: &ConfigStore) -> Option<String> {
        config.get(KEY_GENIUS_TOKEN).map(str::to_string)
    }
}
