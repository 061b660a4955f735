use serde_json::{json, Value};

pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
pub const WEB_FETCH_TOOL_TYPE: &str = "web_fetch_20250910";
pub const WEB_FETCH_BETA_HEADER: &str = "web-fetch-2025-09-10";
pub const DEFAULT_WEB_SEARCH_MAX_USES: u32 = 10;
pub const DEFAULT_WEB_FETCH_MAX_USES: u32 = 10;

/// Server-side tools to attach to each request.
pub fn build_tool_config(
    enable_web_search: bool,
    enable_web_fetch: bool,
    web_search_max_uses: u32,
    web_fetch_max_uses: u32,
) -> Vec<Value> {
    let mut tools = Vec::new();
    if enable_web_search {
        tools.push(json!({
            "type": WEB_SEARCH_TOOL_TYPE,
            "name": "web_search",
            "max_uses": web_search_max_uses,
        }));
    }
    if enable_web_fetch {
        tools.push(json!({
            "type": WEB_FETCH_TOOL_TYPE,
            "name": "web_fetch",
            "max_uses": web_fetch_max_uses,
            "citations": { "enabled": true },
        }));
    }
    tools
}

/// The `anthropic-beta` value the tools need, if any.
pub fn beta_header(tools: &[Value]) -> Option<String> {
    tools
        .iter()
        .any(|tool| tool.get("type").and_then(Value::as_str) == Some(WEB_FETCH_TOOL_TYPE))
        .then(|| WEB_FETCH_BETA_HEADER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_tools() {
        let tools = build_tool_config(true, true, 10, 3);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["type"], WEB_SEARCH_TOOL_TYPE);
        assert_eq!(tools[0]["name"], "web_search");
        assert_eq!(tools[0]["max_uses"], 10);
        assert_eq!(tools[1]["type"], WEB_FETCH_TOOL_TYPE);
        assert_eq!(tools[1]["max_uses"], 3);
        assert_eq!(tools[1]["citations"]["enabled"], true);
        assert_eq!(beta_header(&tools).as_deref(), Some(WEB_FETCH_BETA_HEADER));
    }

    #[test]
    fn test_search_only_has_no_beta_header() {
        let tools = build_tool_config(true, false, 10, 10);
        assert_eq!(tools.len(), 1);
        assert_eq!(beta_header(&tools), None);
    }

    #[test]
    fn test_no_tools() {
        let tools = build_tool_config(false, false, 10, 10);
        assert!(tools.is_empty());
        assert_eq!(beta_header(&tools), None);
    }
}
