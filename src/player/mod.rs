pub mod commands;
pub mod config;
pub mod controller;
pub mod model;
pub mod state;
pub mod sync;

pub use commands::{Command, PlayerOperation};
pub use config::ControlsConfig;
pub use controller::{DispatchOutcome, PlaybackController};
pub use model::{PlaybackSnapshot, Track};
pub use state::CommandPhase;
