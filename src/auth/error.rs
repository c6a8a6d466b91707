use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No linked Spotify account")]
    NotLinked,

    #[error("No Spotify token")]
    NoToken,

    #[error("Session provider error: {0}")]
    Provider(String),
}
