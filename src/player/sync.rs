use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use arc_swap::ArcSwapOption;
use tracing::debug;

use crate::{http::PlayerClient, player::model::PlaybackSnapshot, ui::render::RenderAdapter};

// Fetches are not serialised against each other; the last to resolve wins.
pub struct StateSync {
    client: Arc<PlayerClient>,
    renderer: Arc<dyn RenderAdapter>,
    latest: ArcSwapOption<PlaybackSnapshot>,
    mounted: AtomicBool,
}

impl StateSync {
    pub fn new(client: Arc<PlayerClient>, renderer: Arc<dyn RenderAdapter>) -> Self {
        Self {
            client,
            renderer,
            latest: ArcSwapOption::empty(),
            mounted: AtomicBool::new(false),
        }
    }

    pub async fn fetch_state(&self) -> PlaybackSnapshot {
        let snapshot = match self.client.current_state().await {
            Ok(value) => PlaybackSnapshot::from_value(value).unwrap_or_else(|e| {
                debug!("Unexpected player state shape: {e}");
                PlaybackSnapshot::empty()
            }),
            Err(e) => {
                debug!("Player state unavailable: {e}");
                PlaybackSnapshot::empty()
            }
        };

        self.latest.store(Some(Arc::new(snapshot.clone())));
        if self.is_mounted() {
            self.renderer.update_display(&snapshot);
        }
        snapshot
    }

    pub fn latest(&self) -> Option<Arc<PlaybackSnapshot>> {
        self.latest.load_full()
    }

    /// Returns the previous value.
    pub fn set_mounted(&self, mounted: bool) -> bool {
        self.mounted.swap(mounted, Ordering::AcqRel)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn repaint(&self) {
        if !self.is_mounted() {
            return;
        }
        if let Some(snapshot) = self.latest.load_full() {
            self.renderer.update_display(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;
    use crate::{
        auth::StaticSessionProvider,
        http::transport::HttpResponse,
        player::model::Track,
        testing::{FakeTransport, RecordingRenderer, RenderCall, player_client},
    };

    fn sync_with(transport: FakeTransport, provider: StaticSessionProvider) -> (StateSync, RecordingRenderer) {
        let renderer = RecordingRenderer::new();
        let client = Arc::new(player_client(transport, provider));
        let sync = StateSync::new(client, Arc::new(renderer.clone()));
        sync.set_mounted(true);
        (sync, renderer)
    }

    fn linked() -> StaticSessionProvider {
        StaticSessionProvider::new().with_session(Some("tok"), None)
    }

    #[tokio::test]
    async fn renders_current_track() {
        let transport = FakeTransport::new().on(
            Method::GET,
            "",
            HttpResponse::new(
                200,
                r#"{"item":{"name":"Song A","artists":[{"name":"Artist X"}]},"is_playing":true}"#,
            ),
        );
        let (sync, renderer) = sync_with(transport, linked());

        let snapshot = sync.fetch_state().await;

        let expected = PlaybackSnapshot {
            track: Some(Track {
                name: "Song A".into(),
                artist_names: vec!["Artist X".into()],
                cover_url: None,
            }),
            is_playing: true,
        };
        assert_eq!(snapshot, expected);
        assert_eq!(sync.latest().as_deref(), Some(&expected));
        assert_eq!(renderer.calls(), vec![RenderCall::Display(expected)]);
    }

    #[tokio::test]
    async fn nothing_playing_renders_empty() {
        let transport = FakeTransport::new().on(Method::GET, "", HttpResponse::new(200, "{}"));
        let (sync, renderer) = sync_with(transport, linked());

        assert_eq!(sync.fetch_state().await, PlaybackSnapshot::empty());
        assert_eq!(renderer.displayed(), vec![PlaybackSnapshot::empty()]);
    }

    #[tokio::test]
    async fn auth_failure_degrades_to_empty() {
        let (sync, renderer) = sync_with(FakeTransport::new(), StaticSessionProvider::new());

        assert_eq!(sync.fetch_state().await, PlaybackSnapshot::empty());
        assert_eq!(renderer.displayed(), vec![PlaybackSnapshot::empty()]);
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_empty() {
        let transport = FakeTransport::new().fail(Method::GET, "", "timed out");
        let (sync, _) = sync_with(transport, linked());

        assert_eq!(sync.fetch_state().await, PlaybackSnapshot::empty());
    }

    #[tokio::test]
    async fn malformed_state_degrades_to_empty() {
        let transport =
            FakeTransport::new().on(Method::GET, "", HttpResponse::new(200, r#"{"item":"oops","is_playing":1}"#));
        let (sync, _) = sync_with(transport, linked());

        assert_eq!(sync.fetch_state().await, PlaybackSnapshot::empty());
    }

    #[tokio::test]
    async fn failure_replaces_previous_snapshot() {
        let transport = FakeTransport::new().on(
            Method::GET,
            "",
            HttpResponse::new(200, r#"{"item":{"name":"Song"},"is_playing":true}"#),
        );
        let (sync, _) = sync_with(transport.clone(), linked());

        assert!(sync.fetch_state().await.has_track());
        transport.set_fail(Method::GET, "", "offline");
        sync.fetch_state().await;
        assert_eq!(sync.latest().as_deref(), Some(&PlaybackSnapshot::empty()));
    }

    #[tokio::test]
    async fn repaint_uses_latest_without_fetching() {
        let transport = FakeTransport::new().on(
            Method::GET,
            "",
            HttpResponse::new(200, r#"{"item":{"name":"Song"},"is_playing":false}"#),
        );
        let (sync, renderer) = sync_with(transport.clone(), linked());

        sync.repaint();
        assert!(renderer.displayed().is_empty());

        let snapshot = sync.fetch_state().await;
        sync.repaint();

        assert_eq!(transport.requests().len(), 1);
        assert_eq!(renderer.displayed(), vec![snapshot.clone(), snapshot]);
    }

    #[tokio::test]
    async fn unmounted_surface_is_not_drawn() {
        let transport = FakeTransport::new().on(
            Method::GET,
            "",
            HttpResponse::new(200, r#"{"item":{"name":"Song"},"is_playing":true}"#),
        );
        let (sync, renderer) = sync_with(transport, linked());
        sync.set_mounted(false);

        let snapshot = sync.fetch_state().await;
        sync.repaint();

        assert!(renderer.displayed().is_empty());
        assert_eq!(sync.latest().as_deref(), Some(&snapshot));
    }
}
