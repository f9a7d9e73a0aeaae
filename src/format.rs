//! Display helpers for responses

use std::collections::{BTreeMap, HashMap};

use crate::models::Status;

/// Coarse outcome bucket used to color a status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    Warn,
    Error,
}

impl StatusClass {
    pub fn as_str(&self) -> &str {
        match self {
            StatusClass::Ok => "ok",
            StatusClass::Warn => "warn",
            StatusClass::Error => "error",
        }
    }
}

/// Status class: 2xx ok, 4xx warn, anything else (3xx, 5xx, ERROR) error
pub fn classify_status(status: &Status) -> StatusClass {
    match status {
        Status::Code(200..=299) => StatusClass::Ok,
        Status::Code(400..=499) => StatusClass::Warn,
        _ => StatusClass::Error,
    }
}

pub fn is_json_body(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Pretty print JSON, returning anything else verbatim
pub fn pretty_print_if_json(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

/// Header map as indented JSON with sorted keys
pub fn format_headers(headers: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&String, &String> = headers.iter().collect();
    serde_json::to_string_pretty(&sorted).unwrap_or_default()
}
