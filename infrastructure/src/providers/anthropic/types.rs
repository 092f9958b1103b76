//! Wire types for the Messages API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body: a single user turn carrying the whole prompt.
///
/// The credential is not a field here; it travels in a header.
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> MessagesRequest<'a> {
    pub fn user(model: &'a str, max_tokens: u32, prompt: &'a str) -> Self {
        Self {
            model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first content item, if it has any
    pub fn into_first_text(self) -> Option<String> {
        self.content.into_iter().next().and_then(|item| item.text)
    }
}

/// Pull a human-readable message out of an error envelope.
///
/// Checks `error.message` first, then a top-level `message`. Returns `None`
/// for bodies that are not JSON or carry neither field.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .map(str::to_string)
}
