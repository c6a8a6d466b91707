use crate::player::model::PlaybackSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAffordance {
    Play,
    Pause,
}

impl ToggleAffordance {
    pub fn glyph(&self) -> &'static str {
        match self {
            ToggleAffordance::Play => "▶",
            ToggleAffordance::Pause => "⏸",
        }
    }
}

/// What the surface should show for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlayingView {
    pub title: String,
    pub subtitle: String,
    pub cover_url: Option<String>,
    pub toggle: ToggleAffordance,
}

impl NowPlayingView {
    /// Shown before the first state read completes.
    pub fn placeholder() -> Self {
        Self {
            title: "No Spotify playing".to_string(),
            subtitle: "Connect Spotify in User Settings → Connections".to_string(),
            cover_url: None,
            toggle: ToggleAffordance::Play,
        }
    }

    pub fn from_snapshot(snapshot: &PlaybackSnapshot) -> Self {
        let toggle = if snapshot.is_playing {
            ToggleAffordance::Pause
        } else {
            ToggleAffordance::Play
        };

        let Some(track) = &snapshot.track else {
            return Self {
                title: "No Spotify playing".to_string(),
                subtitle: "Start a song on any device".to_string(),
                cover_url: None,
                toggle,
            };
        };

        let title = if track.name.is_empty() {
            "Unknown title".to_string()
        } else {
            track.name.clone()
        };

        let subtitle = if track.artist_names.is_empty() {
            "Unknown artist".to_string()
        } else {
            track.artist_names.join(", ")
        };

        Self {
            title,
            subtitle,
            cover_url: track.cover_url.clone(),
            toggle,
        }
    }
}
