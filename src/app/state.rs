//! App state - pure data structure with no I/O logic

use crate::messages::RenderState;
use crate::models::{DraftRequest, ResponseResult, SavedTemplate};

/// Dispatch lifecycle. `Succeeded` and `Failed` are resting states that keep
/// the last result on screen; only `Sending` counts as loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl ExecutionPhase {
    pub fn is_loading(&self) -> bool {
        *self == ExecutionPhase::Sending
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExecutionPhase::Idle => "idle",
            ExecutionPhase::Sending => "sending",
            ExecutionPhase::Succeeded => "succeeded",
            ExecutionPhase::Failed => "failed",
        }
    }
}

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    // Composer
    pub draft: DraftRequest,

    // Execution
    pub phase: ExecutionPhase,
    pub response: Option<ResponseResult>,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Cached copy of the template store
    pub templates: Vec<SavedTemplate>,

    pub notice: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            next_request_id: 1,
            ..Default::default()
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Convert state to RenderState for the shell
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            draft: self.draft.clone(),
            phase: self.phase,
            response: self.response.clone(),
            templates: self.templates.clone(),
            notice: self.notice.clone(),
        }
    }
}
