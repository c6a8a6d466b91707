use crate::ui::{notice::Notice, view::NowPlayingView};

/// Render instructions emitted by [`crate::ui::render::ChannelRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Mounted(NowPlayingView),
    Unmounted,
    Display(NowPlayingView),
    Busy(bool),
    Notice(Notice),
}
