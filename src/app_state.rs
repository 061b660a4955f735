use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::InMemorySessionRepository,
    services::{
        dataset_service::load_internal_dataset,
        llm_client::{AnthropicClient, ChatCompletionClient},
        persona_service::PersonaService,
        session_service::{ChatSettings, SessionService},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub persona_service: Arc<PersonaService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = Arc::new(AnthropicClient::from_config(&config)?);
        Self::with_client(config, client)
    }

    /// Builds the state around an already constructed provider client.
    pub fn with_client(config: Config, client: Arc<dyn ChatCompletionClient>) -> AppResult<Self> {
        let persona_service = Arc::new(match &config.personas_path {
            Some(path) => PersonaService::from_path(path)?,
            None => PersonaService::builtin(),
        });

        let dataset = Arc::new(load_internal_dataset(&config.dataset_path));
        log::info!(
            "Loaded {} personas and {} dataset rows",
            persona_service.len(),
            dataset.len()
        );

        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::clone(&persona_service),
            client,
            dataset,
            ChatSettings::from_config(&config),
        ));

        Ok(Self {
            session_service,
            persona_service,
            config: Arc::new(config),
        })
    }
}
