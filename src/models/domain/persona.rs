use serde::{Deserialize, Serialize};

/// One demographic attribute. Order is kept as authored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Demographic {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub label: String,
    pub demographics: Vec<Demographic>,
    pub background: String,
    pub key_concerns: Vec<String>,
    pub purchase_behavior: Vec<String>,
    pub communication_style: Vec<String>,
    pub pain_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Persona {
    pub fn demographic(&self, key: &str) -> Option<&str> {
        self.demographics
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.as_str())
    }

    /// "Age 28 | Bangalore, Karnataka | Software Engineer", skipping absent parts.
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(age) = self.demographic("Age") {
            parts.push(format!("Age {}", age));
        }
        if let Some(location) = self.demographic("Location") {
            parts.push(location.to_string());
        }
        if let Some(occupation) = self.demographic("Occupation") {
            parts.push(occupation.to_string());
        }
        parts.join(" | ")
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Follow-up questions derived from the persona's pain points and concerns.
    pub fn followup_prompts(&self, max_prompts: usize) -> Vec<String> {
        let mut prompts: Vec<String> = Vec::new();
        for pain_point in self.pain_points.iter().take(3) {
            prompts.push(format!(
                "Could you describe a recent situation related to {}?",
                pain_point.to_lowercase()
            ));
        }
        for concern in self.key_concerns.iter().take(3) {
            prompts.push(format!(
                "How does {} influence your selection and budget?",
                concern.to_lowercase()
            ));
        }
        prompts.extend(
            [
                "Are there any deal-breakers we haven't discussed?",
                "What trade-offs would you be willing to make?",
                "Which two features matter most and why?",
            ]
            .iter()
            .map(|s| s.to_string()),
        );

        let mut deduped: Vec<String> = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            if !deduped.contains(&prompt) {
                deduped.push(prompt);
            }
        }
        deduped.truncate(max_prompts);
        deduped
    }
}
