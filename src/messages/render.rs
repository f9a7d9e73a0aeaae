//! Render state - data structure sent from App layer to the shell for display

use crate::app::state::ExecutionPhase;
use crate::models::{DraftRequest, ResponseResult, SavedTemplate};

/// Complete state needed by the shell to display
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub draft: DraftRequest,

    // Execution
    pub phase: ExecutionPhase,
    pub response: Option<ResponseResult>,

    // Templates
    pub templates: Vec<SavedTemplate>,

    /// One-shot message about the last action (validation, storage errors)
    pub notice: Option<String>,
}

impl RenderState {
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }
}
