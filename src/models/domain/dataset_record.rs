use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A row of the internal market-research dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_insights: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remark: Option<String>,
}

// Spreadsheet exports mix numbers and booleans into text columns.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl DatasetRecord {
    /// Text the keyword matcher searches, in column order.
    pub fn haystack(&self) -> String {
        [
            &self.source,
            &self.category,
            &self.details,
            &self.customer_insights,
            &self.remark,
        ]
        .iter()
        .map(|f| f.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Compact one-line rendering used in the prompt excerpt.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(source) = non_empty(&self.source) {
            match non_empty(&self.category) {
                Some(category) => parts.push(format!("{} [{}]", source, category)),
                None => parts.push(source.to_string()),
            }
        }
        if let Some(insight) = non_empty(&self.customer_insights) {
            parts.push(format!("Key insight: {}", insight));
        }
        if let Some(remark) = non_empty(&self.remark) {
            parts.push(format!("Notes: {}", remark));
        }
        if let Some(details) = non_empty(&self.details) {
            parts.push(format!("Details: {}", details));
        }
        parts.join(" | ")
    }
}
