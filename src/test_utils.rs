#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::domain::{DatasetRecord, Demographic, Persona};

    fn demographic(key: &str, value: &str) -> Demographic {
        Demographic {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Creates a standard test persona outside the built-in catalog
    pub fn test_persona() -> Persona {
        Persona {
            id: "tara-menon".to_string(),
            name: "Tara Menon".to_string(),
            label: "Weekend Road-Tripper".to_string(),
            demographics: vec![
                demographic("Age", "30"),
                demographic("Location", "Pune, Maharashtra"),
                demographic("Occupation", "Product Designer"),
                demographic("Income", "₹18 lakhs/year"),
            ],
            background: "Plans long drives to the Western Ghats most weekends and cares about how a car feels on the highway.".to_string(),
            key_concerns: strings(&["Design quality", "Highway comfort", "Boot space"]),
            purchase_behavior: strings(&["Reads long-term ownership reviews", "Test drives on the highway"]),
            communication_style: strings(&["Visual", "Asks about trade-offs"]),
            pain_points: strings(&[
                "Parking in tight lanes",
                "Service wait times",
                "Toll costs",
                "Highway fatigue",
            ]),
            image: Some("tara.png".to_string()),
        }
    }

    /// Creates a small internal dataset with distinct vocabularies per row
    pub fn test_dataset() -> Vec<DatasetRecord> {
        vec![
            DatasetRecord {
                source: Some("Team-BHP".into()),
                category: Some("Forum".into()),
                details: Some("Owner threads on Honda City suspension".into()),
                customer_insights: Some("Repeated complaints about stiff ride".into()),
                remark: Some("High signal".into()),
            },
            DatasetRecord {
                source: Some("PlugShare".into()),
                category: Some("EV App".into()),
                details: Some("Charging station reviews".into()),
                customer_insights: Some("EV owners report broken chargers and app complaints".into()),
                remark: None,
            },
            DatasetRecord {
                source: Some("Statista".into()),
                category: Some("Market Data".into()),
                details: Some("Passenger vehicle sales by segment".into()),
                customer_insights: Some("Hybrid share rising".into()),
                remark: Some("Annual".into()),
            },
        ]
    }

    /// Content blocks of a turn that searched, fetched and cited
    pub fn researched_response_blocks() -> Vec<Value> {
        vec![
            json!({ "type": "thinking", "thinking": "Look up the Elevate.", "signature": "sig" }),
            json!({
                "type": "server_tool_use",
                "id": "srvtoolu_1",
                "name": "web_search",
                "input": { "query": "Honda Elevate hybrid India" }
            }),
            json!({
                "type": "web_search_tool_result",
                "tool_use_id": "srvtoolu_1",
                "content": [
                    { "type": "web_search_result", "title": "Elevate review", "url": "https://example.com/review" },
                    { "type": "web_search_result", "title": "" }
                ]
            }),
            json!({
                "type": "server_tool_use",
                "id": "srvtoolu_2",
                "name": "web_fetch",
                "input": { "url": "https://example.com/elevate" }
            }),
            json!({
                "type": "web_fetch_tool_result",
                "tool_use_id": "srvtoolu_2",
                "content": {
                    "type": "web_fetch_result",
                    "url": "https://example.com/elevate",
                    "content": { "type": "document", "title": "Elevate launch" }
                }
            }),
            json!({
                "type": "text",
                "text": "A hybrid Elevate would find buyers in metro cities.",
                "citations": [{
                    "type": "web_search_result_location",
                    "url": "https://example.com/review",
                    "title": "Elevate review",
                    "cited_text": "Buyers asked for a hybrid"
                }]
            }),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_persona() {
        let persona = test_persona();
        assert_eq!(persona.id, "tara-menon");
        assert_eq!(persona.demographic("Location"), Some("Pune, Maharashtra"));
    }

    #[test]
    fn test_fixtures_test_dataset() {
        let dataset = test_dataset();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0].source.as_deref(), Some("Team-BHP"));
        assert!(dataset[1].remark.is_none());
    }

    #[test]
    fn test_fixtures_researched_blocks() {
        let blocks = researched_response_blocks();
        assert_eq!(blocks.last().unwrap()["type"], "text");
    }
}
