use std::{collections::HashSet, fs, path::Path};

use crate::{
    constants::{
        personas::{builtin_personas, PERSONA_STARTER_PROMPTS},
        prompts::DEFAULT_STARTER_PROMPTS,
    },
    errors::{AppError, AppResult},
    models::domain::Persona,
};

pub const GRID_COLUMNS: usize = 3;
pub const MAX_FOLLOWUP_PROMPTS: usize = 6;

/// Read-only set of personas available for interviews.
pub struct PersonaService {
    personas: Vec<Persona>,
}

impl PersonaService {
    pub fn new(personas: Vec<Persona>) -> AppResult<Self> {
        if personas.is_empty() {
            return Err(AppError::ValidationError(
                "persona catalog must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if !seen.insert(persona.id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "duplicate persona id '{}'",
                    persona.id
                )));
            }
        }

        Ok(Self { personas })
    }

    pub fn builtin() -> Self {
        Self {
            personas: builtin_personas(),
        }
    }

    /// Loads a JSON array of personas, replacing the built-in set.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "failed to read personas file {}: {}",
                path.display(),
                e
            ))
        })?;
        let personas: Vec<Persona> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!(
                "invalid personas file {}: {}",
                path.display(),
                e
            ))
        })?;

        log::info!("Loaded {} personas from {}", personas.len(), path.display());
        Self::new(personas)
    }

    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> AppResult<&Persona> {
        self.find(id)
            .ok_or_else(|| AppError::NotFound(format!("Persona with id '{}' not found", id)))
    }

    /// Personas chunked into rows for the selection grid.
    pub fn grid(&self, columns: usize) -> Vec<Vec<&Persona>> {
        self.personas
            .chunks(columns.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }

    pub fn starter_prompts(&self, persona_id: &str) -> Vec<String> {
        PERSONA_STARTER_PROMPTS
            .iter()
            .find(|(id, _)| *id == persona_id)
            .map(|(_, prompts)| prompts.iter().map(|s| s.to_string()).collect())
            .unwrap_or_else(|| DEFAULT_STARTER_PROMPTS.iter().map(|s| s.to_string()).collect())
    }
}
