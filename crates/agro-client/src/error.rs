//! Error types of the API client.
//!
//! Failures are split by how the caller must react: a missing or rejected
//! session sends the user back to the login page, network and API errors are
//! shown on the page, local storage errors are reported and otherwise treated
//! as "no session".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable session was stored, so the request was never sent.
    #[error("no active session")]
    LoginRequired,
    /// The API answered 401 or 403. The local session has been cleared.
    #[error("session rejected by the API (HTTP {status})")]
    Unauthorized { status: u16 },
    /// The request produced no response at all.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success response. `message` is the API's own text when it sent one.
    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },
    #[error("could not decode API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the caller has to send the user back to the login page.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::LoginRequired | ApiError::Unauthorized { .. })
    }

    /// Message the API attached to a business error, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
    #[error("could not encode stored value: {0}")]
    Encode(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Guard failed: the session was missing, incomplete or of the wrong role.
    /// Local session state has already been cleared.
    #[error("login required")]
    LoginRequired,
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::LoginRequired => ApiError::LoginRequired,
        }
    }
}
