use thiserror::Error;

/// Normalized errors from the credential manager and providers.
///
/// The original tool exited the process on any HTTP failure; here the
/// caller gets a typed error and decides what to do with it.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authorized: missing {0}; run the authorization step first")]
    NotAuthorized(&'static str),
    #[error("request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("token exchange failed with status {status}")]
    TokenExchange { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid redirect input: {0}")]
    InvalidRedirect(String),
    #[error("could not open browser: {0}")]
    Browser(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<url::ParseError> for AuthError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

impl From<opener::OpenError> for AuthError {
    fn from(error: opener::OpenError) -> Self {
        Self::Browser(error.to_string())
    }
}
