/// Lifecycle of a dispatched command: `Idle -> Dispatching -> Settling -> Idle`.
/// A failed dispatch goes straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CommandPhase {
    #[default]
    Idle = 0,
    Dispatching = 1,
    Settling = 2,
}

impl CommandPhase {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CommandPhase::Dispatching,
            2 => CommandPhase::Settling,
            _ => CommandPhase::Idle,
        }
    }
}
