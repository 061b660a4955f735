pub mod personas;
pub mod prompts;
