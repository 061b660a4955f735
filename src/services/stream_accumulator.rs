//! Folds the Messages API server-sent event stream back into a complete
//! message, shaped exactly like a non-streamed response.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    services::llm_client::AssistantMessage,
};

/// One `event:`/`data:` frame of a server-sent event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

/// Splits raw bytes into SSE frames. Frames may straddle chunk boundaries.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer
            .extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.windows(2).position(|w| w == b"\n\n") {
            let frame: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(event) = parse_frame(&frame[..pos]) {
                events.push(event);
            }
        }
        events
    }

    /// Flushes a trailing frame that was not terminated by a blank line.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let frame = std::mem::take(&mut self.buffer);
        parse_frame(&frame)
    }
}

fn parse_frame(frame: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(frame);
    let mut event = None;
    let mut data: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => event = Some(value.to_string()),
            "data" => data.push(value),
            _ => {}
        }
    }

    if event.is_none() && data.is_empty() {
        return None;
    }
    Some(SseEvent {
        event,
        data: data.join("\n"),
    })
}

#[derive(Debug, Default)]
pub struct StreamAccumulator {
    message: Option<AssistantMessage>,
    blocks: Vec<Value>,
    partial_json: HashMap<usize, String>,
    stopped: bool,
}

fn append_str(block: &mut Value, key: &str, piece: &str) {
    if let Some(obj) = block.as_object_mut() {
        let entry = obj
            .entry(key.to_string())
            .or_insert_with(|| Value::String(String::new()));
        match entry {
            Value::String(existing) => existing.push_str(piece),
            other => *other = Value::String(piece.to_string()),
        }
    }
}

fn index_of(event: &Value) -> AppResult<usize> {
    event
        .get("index")
        .and_then(Value::as_u64)
        .map(|i| i as usize)
        .ok_or_else(|| AppError::Decode("stream event is missing a block index".to_string()))
}

/// Maps an in-stream `error` event onto the same errors HTTP failures produce.
pub fn stream_error(error: Option<&Value>) -> AppError {
    let kind = error
        .and_then(|e| e.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("api_error");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("stream error")
        .to_string();

    match kind {
        "rate_limit_error" => AppError::RateLimited(message),
        "overloaded_error" => AppError::Upstream {
            status: 529,
            message,
        },
        "invalid_request_error" => AppError::Upstream {
            status: 400,
            message,
        },
        _ => AppError::Upstream {
            status: 500,
            message,
        },
    }
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn block_mut(&mut self, index: usize) -> AppResult<&mut Value> {
        self.blocks.get_mut(index).ok_or_else(|| {
            AppError::Decode(format!("delta for unknown content block {}", index))
        })
    }

    /// Applies one decoded event. Returns the text delta, if the event carried one.
    pub fn apply(&mut self, event: &Value) -> AppResult<Option<String>> {
        let kind = event.get("type").and_then(Value::as_str).unwrap_or("");
        match kind {
            "message_start" => {
                let message = event
                    .get("message")
                    .cloned()
                    .ok_or_else(|| AppError::Decode("message_start without message".to_string()))?;
                let mut message: AssistantMessage = serde_json::from_value(message)?;
                self.blocks = std::mem::take(&mut message.content);
                self.message = Some(message);
            }
            "content_block_start" => {
                let index = index_of(event)?;
                let block = event
                    .get("content_block")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));
                if self.blocks.len() <= index {
                    self.blocks.resize(index + 1, Value::Null);
                }
                self.blocks[index] = block;
            }
            "content_block_delta" => {
                let index = index_of(event)?;
                let delta = event.get("delta").cloned().unwrap_or(Value::Null);
                return self.apply_delta(index, &delta);
            }
            "content_block_stop" => {
                let index = index_of(event)?;
                if let Some(raw) = self.partial_json.remove(&index) {
                    if !raw.trim().is_empty() {
                        let input: Value = serde_json::from_str(&raw)?;
                        if let Some(obj) = self.block_mut(index)?.as_object_mut() {
                            obj.insert("input".to_string(), input);
                        }
                    }
                }
            }
            "message_delta" => {
                if let Some(message) = self.message.as_mut() {
                    if let Some(reason) = event
                        .get("delta")
                        .and_then(|d| d.get("stop_reason"))
                        .and_then(Value::as_str)
                    {
                        message.stop_reason = Some(reason.to_string());
                    }
                    if let Some(Value::Object(update)) = event.get("usage") {
                        let usage = message
                            .usage
                            .get_or_insert_with(|| Value::Object(Map::new()));
                        if let Some(usage) = usage.as_object_mut() {
                            for (key, value) in update {
                                usage.insert(key.clone(), value.clone());
                            }
                        }
                    }
                }
            }
            "message_stop" => self.stopped = true,
            "ping" => {}
            "error" => return Err(stream_error(event.get("error"))),
            other => log::debug!("Ignoring unknown stream event '{}'", other),
        }
        Ok(None)
    }

    fn apply_delta(&mut self, index: usize, delta: &Value) -> AppResult<Option<String>> {
        let kind = delta.get("type").and_then(Value::as_str).unwrap_or("");
        match kind {
            "text_delta" => {
                let text = delta.get("text").and_then(Value::as_str).unwrap_or("");
                append_str(self.block_mut(index)?, "text", text);
                if !text.is_empty() {
                    return Ok(Some(text.to_string()));
                }
            }
            "thinking_delta" => {
                let thinking = delta.get("thinking").and_then(Value::as_str).unwrap_or("");
                append_str(self.block_mut(index)?, "thinking", thinking);
            }
            "signature_delta" => {
                let signature = delta.get("signature").cloned().unwrap_or(Value::Null);
                if let Some(obj) = self.block_mut(index)?.as_object_mut() {
                    obj.insert("signature".to_string(), signature);
                }
            }
            "input_json_delta" => {
                let partial = delta
                    .get("partial_json")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                self.partial_json
                    .entry(index)
                    .or_default()
                    .push_str(partial);
            }
            "citations_delta" => {
                let citation = delta.get("citation").cloned().unwrap_or(Value::Null);
                if let Some(obj) = self.block_mut(index)?.as_object_mut() {
                    let citations = obj
                        .entry("citations".to_string())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    match citations {
                        Value::Array(list) => list.push(citation),
                        other => *other = Value::Array(vec![citation]),
                    }
                }
            }
            other => log::debug!("Ignoring unknown delta type '{}'", other),
        }
        Ok(None)
    }

    pub fn finish(mut self) -> AppResult<AssistantMessage> {
        let mut message = self.message.take().ok_or_else(|| {
            AppError::Decode("stream ended before message_start".to_string())
        })?;
        message.content = self.blocks.into_iter().filter(|b| !b.is_null()).collect();
        Ok(message)
    }
}
