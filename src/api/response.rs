use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Timestamps are rendered as plain `YYYY-MM-DD HH:MM:SS` strings.
pub fn timestamp(value: Option<chrono::NaiveDateTime>) -> Option<String> {
    value.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
}
