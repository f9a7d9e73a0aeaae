//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default execution backend endpoint
pub const DEFAULT_CHECK_ENDPOINT: &str = "http://localhost:5000/api/check";

/// Directory under the home directory holding all persisted data
pub const DATA_DIR_NAME: &str = ".devbox";

/// Name of the template collection inside the data directory
pub const TEMPLATE_COLLECTION: &str = "api_requests";

/// Log file written inside the data directory
pub const LOG_FILE_NAME: &str = "devbox.log";

/// Outbound timeout, matches the backend's own timeout for the target call
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Header injected for body-carrying methods
pub const CONTENT_TYPE: &str = "Content-Type";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Placeholder time shown for synthesized error results
pub const NO_TIME: &str = "-";

/// Fallback message when the backend rejects a dispatch without details
pub const FALLBACK_ERROR: &str = "Request failed";

/// Application name
pub const APP_NAME: &str = "devbox checker";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
