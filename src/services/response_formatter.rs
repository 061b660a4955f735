use std::io;

use serde::Serialize;
use serde_json::{ser::Formatter, Serializer, Value};

use crate::constants::prompts::{NO_SOURCES_NOTICE, SOURCES_HEADER, UNREADABLE_RESPONSE_NOTICE};

const MAX_SEARCH_HITS_PER_BLOCK: usize = 5;
const MAX_FETCHED_DOCS_PER_BLOCK: usize = 3;

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Fetch results arrive either as one object or as a list of objects.
fn fetch_entries(content: Option<&Value>) -> Vec<&Value> {
    match content {
        Some(Value::Object(_)) => content.into_iter().collect(),
        Some(Value::Array(items)) => items.iter().filter(|i| i.is_object()).collect(),
        _ => Vec::new(),
    }
}

fn is_fetch_error(entry: &Value) -> bool {
    match entry.get("type").and_then(Value::as_str) {
        Some("web_fetch_tool_result_error") | Some("web_fetch_tool_error") => true,
        None => entry.get("error_code").is_some(),
        Some(_) => false,
    }
}

fn error_code(entry: &Value) -> String {
    match entry.get("error_code") {
        Some(Value::String(code)) => code.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => "unknown error".to_string(),
    }
}

/// Compact JSON with `", "` between items and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Label for a block the chat pane has no renderer for.
fn unknown_type_label(block: &Value) -> String {
    match block.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        None | Some(Value::Null) => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

fn link(title: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("- [{}]({})", title, url),
        None => format!("- {}", title),
    }
}

fn render_text_block(block: &Value) -> String {
    let text = block.get("text").and_then(Value::as_str).unwrap_or("");
    let citations = block
        .get("citations")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    if citations.is_empty() {
        return text.trim().to_string();
    }

    let lines: Vec<String> = citations
        .iter()
        .map(|citation| {
            let url = str_field(citation, "url");
            let title = str_field(citation, "title").or(url).unwrap_or("Source");
            let mut line = link(title, url);
            if let Some(cited) = str_field(citation, "cited_text") {
                line.push_str(" — ");
                line.push_str(cited);
            }
            line
        })
        .collect();

    format!("{}\n\n**Citations:**\n{}", text, lines.join("\n"))
        .trim()
        .to_string()
}

/// Renders provider content blocks as Markdown for the chat pane.
pub fn format_blocks_for_display(blocks: &[Value]) -> String {
    let mut segments: Vec<String> = Vec::new();

    for block in blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("thinking" | "redacted_thinking" | "server_tool_use") => {}
            Some("text") => segments.push(render_text_block(block)),
            Some("web_search_tool_result") => {
                let content = block.get("content");
                if let Some(err) = content.filter(|c| {
                    c.get("type").and_then(Value::as_str) == Some("web_search_tool_result_error")
                }) {
                    segments.push(format!("⚠️ Web search error: {}", error_code(err)));
                }
            }
            Some("web_fetch_tool_result") => {
                for entry in fetch_entries(block.get("content")) {
                    if is_fetch_error(entry) {
                        segments.push(format!("⚠️ Web fetch error: {}", error_code(entry)));
                    }
                }
            }
            _ => segments.push(format!(
                "_{}: {}_",
                unknown_type_label(block),
                spaced_json(block)
            )),
        }
    }

    let formatted = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string();

    if formatted.is_empty() {
        UNREADABLE_RESPONSE_NOTICE.to_string()
    } else {
        formatted
    }
}

/// Markdown summary of research actions, search hits and fetched documents.
pub fn extract_tool_summary(blocks: &[Value]) -> String {
    let mut actions: Vec<String> = Vec::new();
    let mut search_hits: Vec<String> = Vec::new();
    let mut fetched: Vec<String> = Vec::new();

    for block in blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("server_tool_use") => {
                let input = block.get("input");
                match block.get("name").and_then(Value::as_str) {
                    Some("web_search") => {
                        if let Some(query) = input.and_then(|i| str_field(i, "query")) {
                            actions.push(format!("Web search: {}", query));
                        }
                    }
                    Some("web_fetch") => {
                        if let Some(url) = input.and_then(|i| str_field(i, "url")) {
                            actions.push(format!("Web fetch: {}", url));
                        }
                    }
                    _ => {}
                }
            }
            Some("web_search_tool_result") => {
                if let Some(items) = block.get("content").and_then(Value::as_array) {
                    for item in items.iter().take(MAX_SEARCH_HITS_PER_BLOCK) {
                        if item.get("type").and_then(Value::as_str) == Some("web_search_result") {
                            let title = str_field(item, "title").unwrap_or("Search result");
                            search_hits.push(link(title, str_field(item, "url")));
                        }
                    }
                }
            }
            Some("web_fetch_tool_result") => {
                for entry in fetch_entries(block.get("content"))
                    .into_iter()
                    .take(MAX_FETCHED_DOCS_PER_BLOCK)
                {
                    let title = entry
                        .get("content")
                        .filter(|c| c.is_object())
                        .and_then(|c| str_field(c, "title"))
                        .unwrap_or("Fetched document");
                    fetched.push(link(title, str_field(entry, "url")));
                }
            }
            _ => {}
        }
    }

    let mut lines: Vec<String> = Vec::new();
    if !actions.is_empty() {
        lines.push("**Research actions**".to_string());
        lines.extend(actions.into_iter().map(|a| format!("- {}", a)));
    }
    if !search_hits.is_empty() {
        lines.push("**Search hits**".to_string());
        lines.extend(search_hits);
    }
    if !fetched.is_empty() {
        lines.push("**Fetched docs**".to_string());
        lines.extend(fetched);
    }
    lines.join("\n")
}

/// Sidebar text for the latest turn's sources.
pub fn render_sources(tool_summary: &str) -> String {
    if tool_summary.is_empty() {
        return NO_SOURCES_NOTICE.to_string();
    }
    let mut content = vec![SOURCES_HEADER];
    content.extend(tool_summary.lines());
    content.join("\n")
}
