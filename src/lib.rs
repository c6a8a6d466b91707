pub mod auth;
pub mod event;
pub mod http;
pub mod player;
pub mod ui;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthError, Credential, CredentialResolver, SessionProvider};
pub use http::{PlayerClient, error::ApiError};
pub use player::{
    Command, CommandPhase, ControlsConfig, DispatchOutcome, PlaybackController, PlaybackSnapshot,
    Track,
};
pub use ui::{render::RenderAdapter, view::NowPlayingView};
