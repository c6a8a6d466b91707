use std::sync::Arc;

use flume::Receiver;
use spotbar::{
    auth::StaticSessionProvider,
    event::events::UiEvent,
    player::{Command, ControlsConfig, PlaybackController},
    ui::{render::ChannelRenderer, view::NowPlayingView},
    util::{hook::set_panic_hook, log::initialize_logging},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let (event_tx, event_rx) = flume::unbounded();
    let controller = PlaybackController::new(
        Arc::new(session_from_env()),
        Arc::new(ChannelRenderer::new(event_tx)),
        config_from_env(),
    )?;

    tokio::spawn(render(event_rx));
    let commands = controller.start().await;
    println!("[p] play/pause  [n] next  [b] previous  [q] quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.trim() {
            "p" | "toggle" => Command::TogglePlayPause,
            "n" | "next" => Command::Next,
            "b" | "prev" => Command::Previous,
            "q" | "quit" => break,
            "" => continue,
            other => {
                println!("Unknown command: {other}");
                continue;
            }
        };

        if commands.send(command).is_err() {
            break;
        }
    }

    controller.stop().await;
    Ok(())
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}

/// The demo host has no chat client behind it, so the session token comes
/// straight from the environment.
fn session_from_env() -> StaticSessionProvider {
    let token = std::env::var("SPOTIFY_ACCESS_TOKEN").ok();
    let device = std::env::var("SPOTIFY_DEVICE_ID").ok();

    if token.is_none() {
        info!("SPOTIFY_ACCESS_TOKEN is not set");
    }

    StaticSessionProvider::new().with_session(token.as_deref(), device.as_deref())
}

fn config_from_env() -> ControlsConfig {
    let mut config = ControlsConfig::default();
    if let Ok(api_base) = std::env::var("SPOTIFY_API_BASE") {
        config.api_base = api_base;
    }
    config
}

async fn render(event_rx: Receiver<UiEvent>) {
    let mut shown: Option<NowPlayingView> = None;

    while let Ok(event) = event_rx.recv_async().await {
        match event {
            UiEvent::Mounted(view) | UiEvent::Display(view) => {
                if shown.as_ref() != Some(&view) {
                    println!("{} {} - {}", view.toggle.glyph(), view.title, view.subtitle);
                    shown = Some(view);
                }
            }
            UiEvent::Notice(notice) => eprintln!("! {}", notice.text),
            UiEvent::Busy(_) | UiEvent::Unmounted => {}
        }
    }
}
