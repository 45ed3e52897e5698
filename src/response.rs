use serde::Serialize;

/// Response envelope shared by every endpoint: a human-readable message
/// plus an optional payload.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
        }
    }
}
