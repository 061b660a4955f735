use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MODEL_NAME: &str = "claude-sonnet-4-5";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub anthropic_api_key: Option<SecretString>,
    pub anthropic_base_url: String,
    pub model_name: String,
    pub max_tokens: u32,
    pub thinking_budget_tokens: u32,
    pub enable_web_search: bool,
    pub enable_web_fetch: bool,
    pub web_search_max_uses: u32,
    pub web_fetch_max_uses: u32,
    pub stream_responses: bool,
    pub dataset_path: PathBuf,
    pub personas_path: Option<PathBuf>,
    pub max_context_rows: usize,
    pub request_timeout_secs: u64,
    /// Sessions idle longer than this are swept. 0 disables the sweep.
    pub session_idle_ttl_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(|k| SecretString::from(k.trim().to_string())),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string()),
            max_tokens: parse_env("MAX_TOKENS", 20000),
            thinking_budget_tokens: parse_env("THINKING_BUDGET_TOKENS", 12000),
            enable_web_search: parse_flag("ENABLE_WEB_SEARCH", true),
            enable_web_fetch: parse_flag("ENABLE_WEB_FETCH", true),
            web_search_max_uses: parse_env("WEB_SEARCH_MAX_USES", 10),
            web_fetch_max_uses: parse_env("WEB_FETCH_MAX_USES", 10),
            stream_responses: parse_flag("STREAM_RESPONSES", true),
            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("honda_data_sources.json")),
            personas_path: env::var("PERSONAS_PATH").ok().map(PathBuf::from),
            max_context_rows: parse_env("MAX_CONTEXT_ROWS", 4),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 300),
            session_idle_ttl_secs: parse_env("SESSION_IDLE_TTL_SECS", 86400),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT", 8080),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Returns the provider key, or a configuration error when none is set.
    pub fn require_api_key(&self) -> AppResult<SecretString> {
        match &self.anthropic_api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key.clone()),
            _ => Err(AppError::Configuration(
                "Anthropic API key missing. Set ANTHROPIC_API_KEY in the environment or `.env`."
                    .to_string(),
            )),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            anthropic_api_key: Some(SecretString::from("test-api-key".to_string())),
            anthropic_base_url: "http://127.0.0.1:9".to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            max_tokens: 1024,
            thinking_budget_tokens: 0,
            enable_web_search: true,
            enable_web_fetch: true,
            web_search_max_uses: 10,
            web_fetch_max_uses: 10,
            stream_responses: false,
            dataset_path: PathBuf::from("does-not-exist.json"),
            personas_path: None,
            max_context_rows: 4,
            request_timeout_secs: 5,
            session_idle_ttl_secs: 3600,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
