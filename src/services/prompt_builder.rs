use chrono::{DateTime, TimeZone};
use serde_json::{json, Value};

use crate::{
    constants::prompts::{
        BASE_SYSTEM_PROMPT, DATASET_CONTEXT_FOOTER, DATASET_CONTEXT_HEADER,
        PERSONA_INTERVIEW_PREAMBLE, ROLEPLAY_GUARDRAILS, TIME_CONTEXT_FOOTER, TIME_CONTEXT_HEADER,
    },
    models::domain::{DatasetRecord, Persona},
    services::dataset_service::build_dataset_context,
};

fn bullets(items: impl IntoIterator<Item = String>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Role-play instructions that put the model in the persona's shoes.
pub fn build_persona_prompt(persona: &Persona) -> String {
    let demographics = bullets(
        persona
            .demographics
            .iter()
            .map(|d| format!("{}: {}", d.key, d.value)),
    );

    format!(
        "{preamble}Persona: {name} — {label}\n\n\
         Demographics:\n{demographics}\n\n\
         Background:\n{background}\n\n\
         Key Concerns & Motivations:\n{concerns}\n\n\
         Purchase Behavior:\n{purchase}\n\n\
         Communication Style:\n{style}\n\n\
         Pain Points:\n{pain}",
        preamble = PERSONA_INTERVIEW_PREAMBLE,
        name = persona.name,
        label = persona.label,
        demographics = demographics,
        background = persona.background,
        concerns = bullets(persona.key_concerns.iter().cloned()),
        purchase = bullets(persona.purchase_behavior.iter().cloned()),
        style = bullets(persona.communication_style.iter().cloned()),
        pain = bullets(persona.pain_points.iter().cloned()),
    )
}

/// Persona role-play when a persona is active, analyst mode otherwise.
pub fn system_prompt(persona: Option<&Persona>) -> String {
    match persona {
        Some(persona) => format!("{}\n\n{}", build_persona_prompt(persona), ROLEPLAY_GUARDRAILS),
        None => BASE_SYSTEM_PROMPT.to_string(),
    }
}

pub fn time_context<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let display = now.format("%A, %d %B %Y %H:%M %Z (UTC%z)").to_string();
    // Offsets carry no zone name, so the offset itself is the label.
    let tz_label = now.format("UTC%:z").to_string();
    format!(
        "User local datetime: {} | Additional context: {}",
        display, tz_label
    )
}

fn text_block(text: String) -> Value {
    json!({ "type": "text", "text": text })
}

/// Content blocks for one user turn: time context, dataset excerpt, then the prompt.
pub fn build_user_content(
    prompt: &str,
    dataset: &[DatasetRecord],
    limit: usize,
    datetime_context: Option<&str>,
) -> Vec<Value> {
    let mut blocks = Vec::with_capacity(3);

    if let Some(ctx) = datetime_context.filter(|c| !c.is_empty()) {
        blocks.push(text_block(format!(
            "{}\n{}\n{}",
            TIME_CONTEXT_HEADER, ctx, TIME_CONTEXT_FOOTER
        )));
    }

    let context = build_dataset_context(prompt, dataset, limit);
    if !context.is_empty() {
        blocks.push(text_block(format!(
            "{}\n{}\n{}",
            DATASET_CONTEXT_HEADER, context, DATASET_CONTEXT_FOOTER
        )));
    }

    blocks.push(text_block(prompt.to_string()));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{test_dataset, test_persona};
    use chrono::FixedOffset;

    #[test]
    fn test_persona_prompt_sections() {
        let prompt = build_persona_prompt(&test_persona());

        assert!(prompt.starts_with("You are participating in a simulated user research interview"));
        assert!(prompt.contains("Persona: Tara Menon — Weekend Road-Tripper\n\n"));
        assert!(prompt.contains("Demographics:\n- Age: 30\n- Location: Pune, Maharashtra\n"));
        assert!(prompt.contains("Background:\nPlans long drives"));
        assert!(prompt.contains("Key Concerns & Motivations:\n- Design quality\n"));
        assert!(prompt.ends_with("Pain Points:\n- Parking in tight lanes\n- Service wait times\n- Toll costs\n- Highway fatigue"));
    }

    #[test]
    fn test_system_prompt_modes() {
        let persona = test_persona();
        let persona_mode = system_prompt(Some(&persona));
        assert!(persona_mode.ends_with(ROLEPLAY_GUARDRAILS));
        assert!(persona_mode.contains("Tara Menon"));

        assert_eq!(system_prompt(None), BASE_SYSTEM_PROMPT);
    }

    #[test]
    fn test_time_context_format() {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = offset.with_ymd_and_hms(2025, 3, 7, 18, 5, 0).unwrap();

        let ctx = time_context(&now);
        assert!(ctx.starts_with("User local datetime: Friday, 07 March 2025 18:05"));
        assert!(ctx.contains("18:05 +05:30 (UTC+0530)"));
        assert!(ctx.ends_with("| Additional context: UTC+05:30"));
    }

    #[test]
    fn test_user_content_block_order() {
        let dataset = test_dataset();
        let blocks = build_user_content(
            "Any complaints about Honda suspension?",
            &dataset,
            4,
            Some("User local datetime: now"),
        );

        assert_eq!(blocks.len(), 3);
        let texts: Vec<&str> = blocks.iter().map(|b| b["text"].as_str().unwrap()).collect();
        assert!(texts[0].starts_with("User time context:\nUser local datetime: now\n"));
        assert!(texts[1].starts_with("Internal dataset excerpts (Honda Data Sources workbook):\n- Team-BHP"));
        assert!(texts[1].ends_with("Use this structured context when forming your answer."));
        assert_eq!(texts[2], "Any complaints about Honda suspension?");
    }

    #[test]
    fn test_user_content_without_context() {
        let blocks = build_user_content("zebra", &[], 4, None);
        assert_eq!(blocks, vec![json!({ "type": "text", "text": "zebra" })]);
    }
}
