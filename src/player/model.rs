use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artist_names: Vec<String>,
    pub cover_url: Option<String>,
}

/// Point-in-time view of remote playback. `track: None` means nothing is
/// playing (or the state could not be read).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub is_playing: bool,
}

impl PlaybackSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerState {
    #[serde(default)]
    pub item: Option<PlayerItem>,
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Debug, Deserialize)]
pub struct PlayerItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<NamedObject>,
    #[serde(default)]
    pub album: Option<Album>,
    /// Present on podcast episodes, which carry no artists.
    #[serde(default)]
    pub show: Option<NamedObject>,
}

#[derive(Debug, Deserialize)]
pub struct NamedObject {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
pub struct Image {
    pub url: String,
}

impl From<PlayerItem> for Track {
    fn from(item: PlayerItem) -> Self {
        let mut artist_names: Vec<String> =
            item.artists.into_iter().filter_map(|a| a.name).collect();

        if artist_names.is_empty() {
            if let Some(show) = item.show.and_then(|s| s.name) {
                artist_names.push(show);
            }
        }

        let cover_url = item
            .album
            .and_then(|album| album.images.into_iter().next())
            .map(|image| image.url);

        Track {
            name: item.name.unwrap_or_default(),
            artist_names,
            cover_url,
        }
    }
}

impl From<PlayerState> for PlaybackSnapshot {
    fn from(state: PlayerState) -> Self {
        PlaybackSnapshot {
            track: state.item.map(Track::from),
            is_playing: state.is_playing,
        }
    }
}

impl PlaybackSnapshot {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value::<PlayerState>(value).map(Self::from)
    }
}
