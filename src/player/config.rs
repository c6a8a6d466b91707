use std::time::Duration;

pub const SPOTIFY_PLAYER_API: &str = "https://api.spotify.com/v1/me/player";

#[derive(Debug, Clone)]
pub struct ControlsConfig {
    pub api_base: String,
    pub poll_interval: Duration,
    pub settle_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            api_base: SPOTIFY_PLAYER_API.to_string(),
            poll_interval: Duration::from_secs(5),
            settle_delay: Duration::from_millis(350),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
