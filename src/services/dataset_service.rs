use std::{collections::HashSet, fs, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::DatasetRecord;

pub const MAX_INTERNAL_CONTEXT_ROWS: usize = 4;

static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\b").expect("WORD_REGEX is a valid regex pattern"));

/// Loads the internal dataset. Any problem yields an empty dataset.
pub fn load_internal_dataset(path: &Path) -> Vec<DatasetRecord> {
    if !path.exists() {
        log::warn!(
            "Internal dataset {} not found; continuing without it",
            path.display()
        );
        return Vec::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Failed to read internal dataset {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<DatasetRecord>>(&raw) {
        Ok(records) => {
            log::info!(
                "Loaded {} internal dataset rows from {}",
                records.len(),
                path.display()
            );
            records
        }
        Err(e) => {
            log::warn!(
                "Internal dataset {} is not a JSON array of records: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Lowercase word tokens for keyword matching.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Selects the dataset rows sharing the most keywords with `query` and
/// renders them as a bullet list. Returns an empty string when nothing fits.
pub fn build_dataset_context(query: &str, dataset: &[DatasetRecord], limit: usize) -> String {
    if dataset.is_empty() {
        return String::new();
    }

    let query_terms: HashSet<String> = tokenize(query).into_iter().collect();

    let mut scored: Vec<(usize, &DatasetRecord)> = Vec::new();
    for record in dataset {
        let haystack_terms: HashSet<String> = tokenize(&record.haystack()).into_iter().collect();
        let score = query_terms
            .iter()
            .filter(|term| haystack_terms.contains(*term))
            .count();
        if score > 0 || query_terms.is_empty() {
            scored.push((score, record));
        }
    }

    if scored.is_empty() {
        return String::new();
    }

    // stable: ties keep dataset order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut top: Vec<&DatasetRecord> = scored
        .iter()
        .filter(|(score, _)| *score > 0)
        .map(|(_, record)| *record)
        .take(limit)
        .collect();
    if top.is_empty() {
        top.push(scored[0].1);
    }

    top.iter()
        .map(|record| record.summary())
        .filter(|summary| !summary.is_empty())
        .map(|summary| format!("- {}", summary))
        .collect::<Vec<_>>()
        .join("\n")
}
