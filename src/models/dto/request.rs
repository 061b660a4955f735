use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const MAX_PROMPT_CHARS: u64 = 8000;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub persona_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectPersonaRequest {
    #[validate(length(min = 1, max = 100))]
    pub persona_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 8000), custom(function = "not_blank"))]
    pub prompt: String,

    /// The user's local time, when the client knows it. Server time otherwise.
    #[serde(default)]
    pub local_time: Option<DateTime<FixedOffset>>,
}
