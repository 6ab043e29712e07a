use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

pub const UID_LEN: usize = 8;

/// A player identifier that passed the length check.
///
/// Holding a `Uid` is the proof that the identifier may be sent to the
/// server; raw input stays a `String` in [`crate::SessionState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn parse(raw: &str) -> Result<Uid, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() != UID_LEN {
            return Err(ValidationError::InvalidUid);
        }
        Ok(Uid(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of `/liste-joueurs`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "equipe", deserialize_with = "deserialize_label")]
    pub team: String,
    #[serde(rename = "lastModificationPixel", deserialize_with = "deserialize_timestamp")]
    pub last_modification: Option<DateTime<Utc>>,
    pub banned: bool,
    #[serde(rename = "nbPixelsModifies")]
    pub pixels_modified: u64,
}

impl PlayerRecord {
    /// Timestamp text used when no locale formatter is at hand.
    pub fn last_modification_label(&self) -> String {
        match self.last_modification {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::from("Invalid Date"),
        }
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_timestamp(&Value::deserialize(deserializer)?))
}

/// Accepts RFC 3339 text or epoch milliseconds, like `new Date(x)` would.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Text color of the status paragraph.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Error => "red",
        }
    }
}

/// The status line under the grid. Each outcome overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    pub text: String,
    pub severity: Severity,
}

impl ServerMessage {
    pub fn success(text: impl Into<String>) -> Self {
        ServerMessage {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        ServerMessage {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}
