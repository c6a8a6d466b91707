use flume::Sender;

use crate::{
    event::events::UiEvent,
    player::model::PlaybackSnapshot,
    ui::{notice::Notice, view::NowPlayingView},
};

/// Surface the controls draw on. Implemented by the host.
pub trait RenderAdapter: Send + Sync {
    /// Attaches the surface. Returns `false` when the host has nowhere to
    /// put it yet; the next "surface available" signal retries.
    fn mount(&self) -> bool;
    fn unmount(&self);
    fn update_display(&self, snapshot: &PlaybackSnapshot);
    fn set_busy(&self, busy: bool);
    fn show_notice(&self, notice: &Notice);
}

/// Forwards render calls as [`UiEvent`]s to whoever drives the real surface.
#[derive(Clone)]
pub struct ChannelRenderer {
    event_tx: Sender<UiEvent>,
}

impl ChannelRenderer {
    pub fn new(event_tx: Sender<UiEvent>) -> Self {
        Self { event_tx }
    }
}

impl RenderAdapter for ChannelRenderer {
    fn mount(&self) -> bool {
        self.event_tx.send(UiEvent::Mounted(NowPlayingView::placeholder())).is_ok()
    }

    fn unmount(&self) {
        let _ = self.event_tx.send(UiEvent::Unmounted);
    }

    fn update_display(&self, snapshot: &PlaybackSnapshot) {
        let _ = self
            .event_tx
            .send(UiEvent::Display(NowPlayingView::from_snapshot(snapshot)));
    }

    fn set_busy(&self, busy: bool) {
        let _ = self.event_tx.send(UiEvent::Busy(busy));
    }

    fn show_notice(&self, notice: &Notice) {
        let _ = self.event_tx.send(UiEvent::Notice(notice.clone()));
    }
}
