use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ChatMessage, Demographic, Persona, Session};

/// One card of the persona selection grid.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaCardDto {
    pub id: String,
    pub name: String,
    pub label: String,
    pub summary_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub call_to_action: String,
}

impl From<&Persona> for PersonaCardDto {
    fn from(persona: &Persona) -> Self {
        PersonaCardDto {
            id: persona.id.clone(),
            name: persona.name.clone(),
            label: persona.label.clone(),
            summary_line: persona.summary_line(),
            image: persona.image.clone(),
            call_to_action: format!("Interview {}", persona.first_name()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaGridDto {
    pub title: String,
    pub instructions: String,
    pub rows: Vec<Vec<PersonaCardDto>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaDetailDto {
    #[serde(flatten)]
    pub card: PersonaCardDto,
    pub demographics: Vec<Demographic>,
    pub background: String,
    pub key_concerns: Vec<String>,
    pub purchase_behavior: Vec<String>,
    pub communication_style: Vec<String>,
    pub pain_points: Vec<String>,
}

impl From<&Persona> for PersonaDetailDto {
    fn from(persona: &Persona) -> Self {
        PersonaDetailDto {
            card: persona.into(),
            demographics: persona.demographics.clone(),
            background: persona.background.clone(),
            key_concerns: persona.key_concerns.clone(),
            purchase_behavior: persona.purchase_behavior.clone(),
            communication_style: persona.communication_style.clone(),
            pain_points: persona.pain_points.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<PersonaCardDto>,
    pub heading: String,
    pub input_placeholder: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionDto {
    pub fn new(session: &Session, persona: Option<&Persona>) -> Self {
        let (heading, input_placeholder) = match persona {
            Some(p) => (
                format!("Interviewing {}", p.name),
                format!("Ask {} a question…", p.first_name()),
            ),
            None => (
                "Honda Japan Market Research — User Personas for India".to_string(),
                "Ask a market research question…".to_string(),
            ),
        };

        SessionDto {
            id: session.id.clone(),
            persona: persona.map(PersonaCardDto::from),
            heading,
            input_placeholder,
            messages: session.messages.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub prompts: Vec<String>,
}

impl SuggestionsDto {
    pub fn none() -> Self {
        SuggestionsDto {
            heading: None,
            prompts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcesDto {
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReplyDto {
    pub reply: String,
    pub tool_summary: String,
    pub sources: String,
    pub failed: bool,
}
