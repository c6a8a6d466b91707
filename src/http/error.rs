use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid request url: {0}")]
    InvalidUrl(String),

    #[error("Spotify API error (status {status}): {message}")]
    Remote { status: u16, message: String },
}

impl ApiError {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}
