use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A transcript entry as the user sees it (Markdown).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A transcript entry as sent to the provider: a list of content blocks.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: Vec<Value>,
}

impl ApiMessage {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![serde_json::json!({ "type": "text", "text": text.into() })],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Session {
    pub id: String,
    pub persona_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub api_messages: Vec<ApiMessage>,
    pub last_tool_summary: String,
    pub suggestions_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(persona_id: Option<String>) -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4().to_string(),
            persona_id,
            messages: Vec::new(),
            api_messages: Vec::new(),
            last_tool_summary: String::new(),
            suggestions_hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Drops both transcripts and the sources sidebar. The persona is kept.
    pub fn reset_conversation(&mut self) {
        self.messages.clear();
        self.api_messages.clear();
        self.last_tool_summary.clear();
        self.suggestions_hidden = false;
        self.touch();
    }

    pub fn switch_persona(&mut self, persona_id: Option<String>) {
        self.persona_id = persona_id;
        self.reset_conversation();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
