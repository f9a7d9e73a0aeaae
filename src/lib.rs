//! # devbox checker
//!
//! Compose an HTTP request, hand it to a pass-through execution backend,
//! inspect the structured result, and keep named request templates on disk.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Editable header rows and raw body
//! - Automatic JSON content type for body-carrying methods
//! - Status classification and JSON pretty printing
//! - Local template store (save, list, load, delete)
//!
//! ## Architecture
//! Actor-based with channels:
//! - Shell - line-oriented stdin loop
//! - App Layer (State machine, template store access)
//! - Network Layer (Tokio runtime, execution backend client)

pub mod constants;
pub mod config;
pub mod models;
pub mod composer;
pub mod format;
pub mod storage;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{
    DispatchPayload, DraftRequest, HeaderEntry, HeaderField, HttpMethod, ResponseResult,
    SavedTemplate, Status,
};
pub use config::Config;
pub use format::{classify_status, is_json_body, pretty_print_if_json, StatusClass};
pub use storage::TemplateStore;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState, ExecutionPhase};
pub use network::{ExecutionClient, NetworkActor, TransportError};
