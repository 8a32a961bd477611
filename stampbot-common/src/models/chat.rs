// File: stampbot-common/src/models/chat.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw `send_date` value as the host stores it.
///
/// Hosts have written epoch milliseconds, ISO strings and a couple of
/// human-readable layouts over time, so this stays untyped until a
/// `DateFormatter` tries to parse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendDate {
    Millis(i64),
    Text(String),
    Other(Value),
}

impl From<i64> for SendDate {
    fn from(ms: i64) -> Self {
        SendDate::Millis(ms)
    }
}

impl From<&str> for SendDate {
    fn from(s: &str) -> Self {
        SendDate::Text(s.to_string())
    }
}

impl From<String> for SendDate {
    fn from(s: String) -> Self {
        SendDate::Text(s)
    }
}

/// The `extra` bag attached to a message. Only `tool_invocations` is read here;
/// everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_invocations: Option<Value>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One turn of chat owned by the host's conversation history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message text. Kept as a raw value since hosts occasionally leave it
    /// null or put something other than a string here.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub mes: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_date: Option<SendDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<MessageExtra>,

    /// Remaining host fields (`name`, `is_user`, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, send_date: impl Into<SendDate>) -> Self {
        Self {
            mes: Value::String(text.into()),
            send_date: Some(send_date.into()),
            extra: None,
            fields: Map::new(),
        }
    }

    pub fn with_tool_invocations(mut self, invocations: Vec<Value>) -> Self {
        self.extra
            .get_or_insert_with(MessageExtra::default)
            .tool_invocations = Some(Value::Array(invocations));
        self
    }

    /// Returns the message text if it is a non-empty string.
    pub fn text(&self) -> Option<&str> {
        match self.mes.as_str() {
            Some(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn set_text(&mut self, text: String) {
        self.mes = Value::String(text);
    }

    /// True when the message carries a non-empty list of tool invocations.
    pub fn has_tool_invocations(&self) -> bool {
        self.extra
            .as_ref()
            .and_then(|e| e.tool_invocations.as_ref())
            .and_then(Value::as_array)
            .is_some_and(|list| !list.is_empty())
    }
}
