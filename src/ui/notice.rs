/// Dismissible message shown to the user, e.g. after a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
}

impl Notice {
    pub fn request_failed() -> Self {
        Self {
            text: "Spotify request failed".to_string(),
        }
    }
}
