use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, Utc};
use futures::channel::mpsc::{self, UnboundedSender};

use crate::{
    config::Config,
    constants::prompts::{EMPTY_RESPONSE_NOTICE, PREDEFINED_QUESTIONS},
    errors::{AppError, AppResult},
    models::{
        domain::{ApiMessage, ChatMessage, DatasetRecord, Persona, Role, Session},
        dto::{
            request::MAX_PROMPT_CHARS,
            response::{ChatReplyDto, SessionDto, SourcesDto, SuggestionsDto},
        },
    },
    repositories::SessionRepository,
    services::{
        llm_client::{ChatCompletionClient, MessageRequest, ThinkingConfig},
        persona_service::{PersonaService, MAX_FOLLOWUP_PROMPTS},
        prompt_builder::{build_user_content, system_prompt, time_context},
        response_formatter::{extract_tool_summary, format_blocks_for_display, render_sources},
        tools::{beta_header, build_tool_config},
    },
};

/// Per-request provider settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub max_tokens: u32,
    pub thinking_budget_tokens: u32,
    pub tools: Vec<serde_json::Value>,
    pub max_context_rows: usize,
    pub stream_upstream: bool,
}

impl ChatSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model_name.clone(),
            max_tokens: config.max_tokens,
            thinking_budget_tokens: config.thinking_budget_tokens,
            tools: build_tool_config(
                config.enable_web_search,
                config.enable_web_fetch,
                config.web_search_max_uses,
                config.web_fetch_max_uses,
            ),
            max_context_rows: config.max_context_rows,
            stream_upstream: config.stream_responses,
        }
    }

    fn request(&self, messages: Vec<ApiMessage>, system: String) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages,
            system: Some(system),
            tools: self.tools.clone(),
            thinking: (self.thinking_budget_tokens > 0)
                .then(|| ThinkingConfig::enabled(self.thinking_budget_tokens)),
            stream: false,
            beta: beta_header(&self.tools),
        }
    }
}

pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    personas: Arc<PersonaService>,
    client: Arc<dyn ChatCompletionClient>,
    dataset: Arc<Vec<DatasetRecord>>,
    settings: ChatSettings,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        personas: Arc<PersonaService>,
        client: Arc<dyn ChatCompletionClient>,
        dataset: Arc<Vec<DatasetRecord>>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            repository,
            personas,
            client,
            dataset,
            settings,
        }
    }

    pub fn dataset_len(&self) -> usize {
        self.dataset.len()
    }

    async fn load(&self, id: &str) -> AppResult<Session> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{}' not found", id)))
    }

    fn persona_for(&self, session: &Session) -> AppResult<Option<&Persona>> {
        session
            .persona_id
            .as_deref()
            .map(|id| self.personas.get(id))
            .transpose()
    }

    pub async fn create_session(&self, persona_id: Option<String>) -> AppResult<Session> {
        if let Some(id) = persona_id.as_deref() {
            self.personas.get(id)?;
        }
        let session = self.repository.create(Session::new(persona_id)).await?;
        log::info!(
            "Created session {} (persona={})",
            session.id,
            session.persona_id.as_deref().unwrap_or("none")
        );
        Ok(session)
    }

    pub async fn get_session(&self, id: &str) -> AppResult<Session> {
        self.load(id).await
    }

    pub async fn delete_session(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Session with id '{}' not found",
                id
            )));
        }
        log::info!("Deleted session {}", id);
        Ok(())
    }

    /// Drops every session untouched for longer than `max_idle`.
    pub async fn prune_idle_sessions(&self, max_idle: chrono::Duration) -> AppResult<usize> {
        let removed = self.repository.delete_idle(Utc::now() - max_idle).await?;
        if removed > 0 {
            log::info!("Pruned {} idle sessions", removed);
        }
        Ok(removed)
    }

    pub async fn session_view(&self, id: &str) -> AppResult<SessionDto> {
        let session = self.load(id).await?;
        let persona = self.persona_for(&session)?;
        Ok(SessionDto::new(&session, persona))
    }

    pub async fn select_persona(&self, id: &str, persona_id: &str) -> AppResult<Session> {
        self.personas.get(persona_id)?;
        let mut session = self.load(id).await?;
        session.switch_persona(Some(persona_id.to_string()));
        log::info!("Session {} now interviewing {}", id, persona_id);
        self.repository.update(session).await
    }

    pub async fn back_to_personas(&self, id: &str) -> AppResult<Session> {
        let mut session = self.load(id).await?;
        session.switch_persona(None);
        self.repository.update(session).await
    }

    pub async fn clear_conversation(&self, id: &str) -> AppResult<Session> {
        let mut session = self.load(id).await?;
        session.reset_conversation();
        self.repository.update(session).await
    }

    pub async fn suggestions(&self, id: &str) -> AppResult<SuggestionsDto> {
        let session = self.load(id).await?;
        let persona = self.persona_for(&session)?;

        if session.messages.is_empty() && !session.suggestions_hidden {
            return Ok(match persona {
                Some(p) => SuggestionsDto {
                    heading: Some("Interview starters".to_string()),
                    prompts: self.personas.starter_prompts(&p.id),
                },
                None => SuggestionsDto {
                    heading: Some("Market questions".to_string()),
                    prompts: PREDEFINED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
                },
            });
        }

        match persona {
            Some(p) if !session.messages.is_empty() => {
                let prompts = p.followup_prompts(MAX_FOLLOWUP_PROMPTS);
                if prompts.is_empty() {
                    Ok(SuggestionsDto::none())
                } else {
                    Ok(SuggestionsDto {
                        heading: Some("Suggested follow-ups".to_string()),
                        prompts,
                    })
                }
            }
            _ => Ok(SuggestionsDto::none()),
        }
    }

    pub async fn sources(&self, id: &str) -> AppResult<SourcesDto> {
        let session = self.load(id).await?;
        Ok(SourcesDto {
            markdown: render_sources(&session.last_tool_summary),
        })
    }

    /// Runs one turn and returns the rendered reply.
    pub async fn send_message(
        &self,
        id: &str,
        prompt: &str,
        local_time: Option<DateTime<FixedOffset>>,
    ) -> AppResult<ChatReplyDto> {
        if self.settings.stream_upstream {
            // Upstream streaming with nobody listening to the deltas.
            let (sink, _) = mpsc::unbounded();
            self.run_turn(id, prompt, local_time, Some(sink)).await
        } else {
            self.run_turn(id, prompt, local_time, None).await
        }
    }

    /// Runs one turn, forwarding text deltas to `sink` as they arrive.
    pub async fn stream_message(
        &self,
        id: &str,
        prompt: &str,
        local_time: Option<DateTime<FixedOffset>>,
        sink: UnboundedSender<String>,
    ) -> AppResult<ChatReplyDto> {
        self.run_turn(id, prompt, local_time, Some(sink)).await
    }

    async fn run_turn(
        &self,
        id: &str,
        prompt: &str,
        local_time: Option<DateTime<FixedOffset>>,
        sink: Option<UnboundedSender<String>>,
    ) -> AppResult<ChatReplyDto> {
        if prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "prompt must not be empty".to_string(),
            ));
        }
        if prompt.chars().count() as u64 > MAX_PROMPT_CHARS {
            return Err(AppError::ValidationError(format!(
                "prompt exceeds {} characters",
                MAX_PROMPT_CHARS
            )));
        }

        let mut session = self.load(id).await?;
        let persona = self.persona_for(&session)?;

        let time_ctx = match local_time {
            Some(t) => time_context(&t),
            None => time_context(&Local::now()),
        };

        session.messages.push(ChatMessage {
            role: Role::User,
            content: prompt.to_string(),
        });
        session.api_messages.push(ApiMessage {
            role: Role::User,
            content: build_user_content(
                prompt,
                &self.dataset,
                self.settings.max_context_rows,
                Some(&time_ctx),
            ),
        });
        session.suggestions_hidden = true;

        let request = self
            .settings
            .request(session.api_messages.clone(), system_prompt(persona));

        let result = match sink {
            Some(sink) => self.client.stream_message(request, sink).await,
            None => self.client.create_message(request).await,
        };

        let (reply, tool_summary, assistant_message, failed) = match result {
            Ok(message) => {
                let reply = format_blocks_for_display(&message.content);
                let tool_summary = extract_tool_summary(&message.content);
                let assistant_message = if message.content.is_empty() {
                    ApiMessage::text(Role::Assistant, reply.clone())
                } else {
                    ApiMessage {
                        role: Role::Assistant,
                        content: message.content,
                    }
                };
                (reply, tool_summary, Some(assistant_message), false)
            }
            Err(err) => {
                log::debug!("Assistant turn failed for session {}: {}", id, err);
                (err.chat_notice(), String::new(), None, true)
            }
        };

        let reply = if reply.is_empty() {
            EMPTY_RESPONSE_NOTICE.to_string()
        } else {
            reply
        };
        let assistant_message =
            assistant_message.unwrap_or_else(|| ApiMessage::text(Role::Assistant, reply.clone()));

        session.messages.push(ChatMessage {
            role: Role::Assistant,
            content: reply.clone(),
        });
        session.api_messages.push(assistant_message);
        session.last_tool_summary = tool_summary.clone();
        session.touch();
        self.repository.update(session).await?;

        Ok(ChatReplyDto {
            sources: render_sources(&tool_summary),
            reply,
            tool_summary,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::InMemorySessionRepository,
        services::llm_client::{AssistantMessage, MockChatCompletionClient},
        test_utils::fixtures::{researched_response_blocks, test_dataset},
    };
    use futures::StreamExt;
    use serde_json::json;

    fn service_with(client: MockChatCompletionClient, stream_upstream: bool) -> SessionService {
        let mut settings = ChatSettings::from_config(&Config::test_config());
        settings.stream_upstream = stream_upstream;
        SessionService::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(PersonaService::builtin()),
            Arc::new(client),
            Arc::new(test_dataset()),
            settings,
        )
    }

    fn text_reply(text: &str) -> AssistantMessage {
        AssistantMessage {
            id: "msg_test".into(),
            model: "claude-sonnet-4-5".into(),
            content: vec![json!({ "type": "text", "text": text })],
            stop_reason: Some("end_turn".into()),
            usage: None,
        }
    }

    #[tokio::test]
    async fn test_delete_session() {
        let service = service_with(MockChatCompletionClient::new(), false);
        let session = service.create_session(None).await.unwrap();

        service.delete_session(&session.id).await.unwrap();

        assert!(matches!(
            service.get_session(&session.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_session(&session.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_prune_idle_sessions_keeps_active_ones() {
        let service = service_with(MockChatCompletionClient::new(), false);
        let session = service.create_session(None).await.unwrap();

        let removed = service
            .prune_idle_sessions(chrono::Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(removed, 0);
        assert!(service.get_session(&session.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_session_rejects_unknown_persona() {
        let service = service_with(MockChatCompletionClient::new(), false);
        let result = service.create_session(Some("ghost".into())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_turn_builds_persona_request_and_records_transcript() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .withf(|req: &MessageRequest| {
                let system = req.system.as_deref().unwrap_or("");
                let user_blocks = &req.messages[0].content;
                req.messages.len() == 1
                    && system.contains("Persona: Priya Sharma")
                    && req.tools.len() == 2
                    && req.beta.as_deref() == Some("web-fetch-2025-09-10")
                    && req.thinking.is_none()
                    && user_blocks.len() == 3
                    && user_blocks[2]["text"] == "Any complaints about Honda suspension?"
            })
            .times(1)
            .returning(|_| Ok(text_reply("I have heard the ride is stiff.")));

        let service = service_with(client, false);
        let session = service
            .create_session(Some("priya-sharma".into()))
            .await
            .unwrap();

        let reply = service
            .send_message(&session.id, "Any complaints about Honda suspension?", None)
            .await
            .unwrap();

        assert_eq!(reply.reply, "I have heard the ride is stiff.");
        assert!(!reply.failed);
        assert_eq!(reply.sources, "No live sources referenced yet.");

        let stored = service.get_session(&session.id).await.unwrap();
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.api_messages.len(), 2);
        assert_eq!(stored.api_messages[1].content[0]["text"], "I have heard the ride is stiff.");
        assert!(stored.suggestions_hidden);
    }

    #[tokio::test]
    async fn test_second_turn_replays_history() {
        let mut client = MockChatCompletionClient::new();
        let mut seq = mockall::Sequence::new();
        client
            .expect_create_message()
            .withf(|req: &MessageRequest| req.messages.len() == 1)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(text_reply("first")));
        client
            .expect_create_message()
            .withf(|req: &MessageRequest| {
                req.messages.len() == 3
                    && req.messages[1].role == Role::Assistant
                    && req.messages[1].content[0]["text"] == "first"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(text_reply("second")));

        let service = service_with(client, false);
        let session = service.create_session(Some("rajesh-kumar".into())).await.unwrap();
        service.send_message(&session.id, "one", None).await.unwrap();
        let reply = service.send_message(&session.id, "two", None).await.unwrap();
        assert_eq!(reply.reply, "second");
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced_in_chat() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .returning(|_| Err(AppError::RateLimited("too many".into())));

        let service = service_with(client, false);
        let session = service.create_session(Some("neha-desai".into())).await.unwrap();
        let reply = service.send_message(&session.id, "EV or hybrid?", None).await.unwrap();

        assert!(reply.failed);
        assert_eq!(
            reply.reply,
            "⚠️ Rate limit reached. Please wait a moment before trying again."
        );

        let stored = service.get_session(&session.id).await.unwrap();
        assert_eq!(stored.api_messages.len(), 2);
        assert_eq!(stored.api_messages[1].content[0]["text"], reply.reply);
        assert!(stored.last_tool_summary.is_empty());
    }

    #[tokio::test]
    async fn test_empty_content_falls_back_to_text_block() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .returning(|_| Ok(AssistantMessage::default()));

        let service = service_with(client, false);
        let session = service.create_session(None).await.unwrap();
        let reply = service.send_message(&session.id, "hello", None).await.unwrap();

        assert_eq!(reply.reply, "_The assistant returned no readable content._");
        let stored = service.get_session(&session.id).await.unwrap();
        assert_eq!(stored.api_messages[1].content[0]["text"], reply.reply);
    }

    #[tokio::test]
    async fn test_analyst_mode_uses_base_prompt() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .withf(|req: &MessageRequest| {
                req.system.as_deref()
                    == Some(crate::constants::prompts::BASE_SYSTEM_PROMPT)
            })
            .returning(|_| Ok(text_reply("Market view")));

        let service = service_with(client, false);
        let session = service.create_session(None).await.unwrap();
        let reply = service.send_message(&session.id, "SUV trends?", None).await.unwrap();
        assert_eq!(reply.reply, "Market view");
    }

    #[tokio::test]
    async fn test_tool_summary_is_recorded() {
        let mut client = MockChatCompletionClient::new();
        client.expect_create_message().returning(|_| {
            Ok(AssistantMessage {
                content: researched_response_blocks(),
                ..Default::default()
            })
        });

        let service = service_with(client, false);
        let session = service.create_session(Some("vikram-reddy".into())).await.unwrap();
        let reply = service.send_message(&session.id, "Elevate hybrid?", None).await.unwrap();

        assert!(reply.tool_summary.starts_with("**Research actions**"));
        assert!(reply.sources.starts_with("**Key References (latest analysis)**"));

        let sources = service.sources(&session.id).await.unwrap();
        assert_eq!(sources.markdown, reply.sources);
    }

    #[tokio::test]
    async fn test_stream_message_forwards_deltas() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_stream_message()
            .returning(|_, sink| {
                sink.unbounded_send("Hel".to_string()).unwrap();
                sink.unbounded_send("lo".to_string()).unwrap();
                Ok(text_reply("Hello"))
            });

        let service = service_with(client, false);
        let session = service.create_session(Some("kabir-ahmed".into())).await.unwrap();

        let (tx, rx) = mpsc::unbounded();
        let reply = service
            .stream_message(&session.id, "Hi", None, tx)
            .await
            .unwrap();

        let chunks: Vec<String> = rx.collect().await;
        assert_eq!(chunks, vec!["Hel", "lo"]);
        assert_eq!(reply.reply, "Hello");
    }

    #[tokio::test]
    async fn test_send_message_uses_upstream_streaming_when_configured() {
        let mut client = MockChatCompletionClient::new();
        client.expect_create_message().never();
        client
            .expect_stream_message()
            .times(1)
            .returning(|_, _| Ok(text_reply("streamed")));

        let service = service_with(client, true);
        let session = service.create_session(None).await.unwrap();
        let reply = service.send_message(&session.id, "hi", None).await.unwrap();
        assert_eq!(reply.reply, "streamed");
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected_without_calling_provider() {
        let mut client = MockChatCompletionClient::new();
        client.expect_create_message().never();

        let service = service_with(client, false);
        let session = service.create_session(None).await.unwrap();
        let result = service.send_message(&session.id, "   ", None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_suggestion_lifecycle() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .returning(|_| Ok(text_reply("ok")));

        let service = service_with(client, false);
        let session = service.create_session(Some("meera-krishnan".into())).await.unwrap();

        let starters = service.suggestions(&session.id).await.unwrap();
        assert_eq!(starters.heading.as_deref(), Some("Interview starters"));
        assert_eq!(starters.prompts.len(), 5);

        service.send_message(&session.id, "hello", None).await.unwrap();
        let followups = service.suggestions(&session.id).await.unwrap();
        assert_eq!(followups.heading.as_deref(), Some("Suggested follow-ups"));
        assert_eq!(followups.prompts.len(), MAX_FOLLOWUP_PROMPTS);
        assert_eq!(
            followups.prompts[0],
            "Could you describe a recent situation related to age-related discrimination?"
        );

        service.clear_conversation(&session.id).await.unwrap();
        let again = service.suggestions(&session.id).await.unwrap();
        assert_eq!(again.heading.as_deref(), Some("Interview starters"));
    }

    #[tokio::test]
    async fn test_analyst_mode_suggestions() {
        let service = service_with(MockChatCompletionClient::new(), false);
        let session = service.create_session(None).await.unwrap();

        let suggestions = service.suggestions(&session.id).await.unwrap();
        assert_eq!(suggestions.heading.as_deref(), Some("Market questions"));
        assert_eq!(suggestions.prompts.len(), PREDEFINED_QUESTIONS.len());
    }

    #[tokio::test]
    async fn test_persona_switching_resets_conversation() {
        let mut client = MockChatCompletionClient::new();
        client
            .expect_create_message()
            .returning(|_| Ok(text_reply("ok")));

        let service = service_with(client, false);
        let session = service.create_session(Some("arjun-singh".into())).await.unwrap();
        service.send_message(&session.id, "hello", None).await.unwrap();

        let switched = service
            .select_persona(&session.id, "sunita-iyer")
            .await
            .unwrap();
        assert_eq!(switched.persona_id.as_deref(), Some("sunita-iyer"));
        assert!(switched.messages.is_empty());
        assert!(switched.api_messages.is_empty());

        let back = service.back_to_personas(&session.id).await.unwrap();
        assert!(back.persona_id.is_none());

        assert!(matches!(
            service.select_persona(&session.id, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let service = service_with(MockChatCompletionClient::new(), false);
        assert!(matches!(
            service.session_view("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
