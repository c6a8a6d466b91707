use reqwest::Method;

/// User-initiated command coming from the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Previous,
    Next,
    TogglePlayPause,
}

/// A single call against the player resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOperation {
    State,
    Previous,
    Next,
    Pause,
    Play,
}

impl PlayerOperation {
    pub fn path(&self) -> &'static str {
        match self {
            PlayerOperation::State => "",
            PlayerOperation::Previous => "/previous",
            PlayerOperation::Next => "/next",
            PlayerOperation::Pause => "/pause",
            PlayerOperation::Play => "/play",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            PlayerOperation::State => Method::GET,
            PlayerOperation::Previous | PlayerOperation::Next => Method::POST,
            PlayerOperation::Pause | PlayerOperation::Play => Method::PUT,
        }
    }
}
