pub mod dataset_service;
pub mod llm_client;
pub mod persona_service;
pub mod prompt_builder;
pub mod response_formatter;
pub mod session_service;
pub mod stream_accumulator;
pub mod tools;
