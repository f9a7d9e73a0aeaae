use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::NO_TIME;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::GET,
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            other => anyhow::bail!("Unsupported method: {}", other),
        }
    }
}

/// One row of the header editor
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderEntry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Which half of a header row an edit targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Key,
    Value,
}

/// The request under construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
}

impl Default for DraftRequest {
    fn default() -> Self {
        DraftRequest {
            method: HttpMethod::GET,
            url: String::new(),
            headers: vec![HeaderEntry::default()],
            body: String::new(),
        }
    }
}

/// Wire form of a draft, as posted to the execution backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Target status reported by the backend, or the error sentinel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Code(u16),
    Error,
}

const ERROR_SENTINEL: &str = "ERROR";

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Status::Code(code) => serializer.serialize_u16(*code),
            Status::Error => serializer.serialize_str(ERROR_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .map(Status::Code)
                .ok_or_else(|| de::Error::custom(format!("invalid status code: {}", n))),
            serde_json::Value::String(s) if s == ERROR_SENTINEL => Ok(Status::Error),
            other => Err(de::Error::custom(format!("invalid status: {}", other))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{}", code),
            Status::Error => f.write_str(ERROR_SENTINEL),
        }
    }
}

/// Response from the execution backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub status: Status,
    pub time: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ResponseResult {
    /// Synthesized result shown when a dispatch fails before a target status exists
    pub fn error(message: impl Into<String>) -> Self {
        ResponseResult {
            status: Status::Error,
            time: NO_TIME.to_string(),
            headers: HashMap::new(),
            body: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// A named, persisted request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTemplate {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
}

impl SavedTemplate {
    /// Snapshot a draft. Rows with an empty key are not persisted.
    pub fn from_draft(id: impl Into<String>, name: impl Into<String>, draft: &DraftRequest) -> Self {
        SavedTemplate {
            id: id.into(),
            name: name.into(),
            method: draft.method,
            url: draft.url.clone(),
            headers: draft
                .headers
                .iter()
                .filter(|h| !h.key.is_empty())
                .cloned()
                .collect(),
            body: draft.body.clone(),
        }
    }
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Fresh template id: creation time in milliseconds plus a sequence number
pub fn generate_template_id() -> String {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}
