use thiserror::Error;

/// Message shown when a login attempt fails for any reason other than the
/// server rejecting the credentials.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("local storage access failed: {0}")]
    Access(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The endpoint answered with a non-2xx status and a readable message.
    #[error("{0}")]
    Rejected(String),

    /// Network failure, or a rejection without a usable body. The detail is
    /// kept for logging only.
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => FetchError::Decode(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
