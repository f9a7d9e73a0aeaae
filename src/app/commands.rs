//! Command handlers - business logic for processing UI events

use crate::app::state::{AppState, ExecutionPhase};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{generate_template_id, HeaderField, HttpMethod, ResponseResult, SavedTemplate};

impl AppState {
    // ========================
    // Draft editing
    // ========================

    pub fn set_method(&mut self, method: HttpMethod) {
        self.draft.set_method(method);
    }

    pub fn cycle_method(&mut self) {
        let next = self.draft.method.next();
        self.draft.set_method(next);
    }

    pub fn set_url(&mut self, url: String) {
        self.draft.set_url(url);
    }

    pub fn set_body(&mut self, body: String) {
        self.draft.set_body(body);
    }

    // ========================
    // Headers
    // ========================

    pub fn add_header(&mut self) {
        self.draft.add_header();
    }

    pub fn remove_header(&mut self, index: usize) {
        if index < self.draft.headers.len() {
            self.draft.remove_header(index);
        } else {
            tracing::debug!(index, "Ignoring header removal out of range");
            self.notice = Some(format!("No header row {}", index));
        }
    }

    pub fn update_header(&mut self, index: usize, field: HeaderField, value: String) {
        if index < self.draft.headers.len() {
            self.draft.update_header(index, field, value);
        } else {
            tracing::debug!(index, "Ignoring header edit out of range");
            self.notice = Some(format!("No header row {}", index));
        }
    }

    // ========================
    // Request sending
    // ========================

    /// Move to `Sending` and build the dispatch command, unless a dispatch is
    /// already in flight or the URL is empty
    pub fn prepare_dispatch(&mut self) -> Option<NetworkCommand> {
        if self.is_loading() {
            tracing::debug!("Send ignored, dispatch already in flight");
            return None;
        }
        if !self.draft.can_dispatch() {
            self.notice = Some(String::from("Enter a URL before sending"));
            return None;
        }

        self.phase = ExecutionPhase::Sending;
        self.response = None;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::Dispatch {
            id,
            payload: self.draft.dispatch_payload(),
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Dropping response for stale dispatch");
            return;
        }

        match response {
            NetworkResponse::Success { result, .. } => {
                self.response = Some(result);
                self.phase = ExecutionPhase::Succeeded;
            }
            NetworkResponse::Error { message, .. } => {
                self.response = Some(ResponseResult::error(message));
                self.phase = ExecutionPhase::Failed;
            }
        }
        self.pending_request_id = None;
    }

    // ========================
    // Templates
    // ========================

    /// Snapshot the draft as a new template. Needs a name and a URL.
    pub fn template_from_draft(&mut self, name: &str) -> Option<SavedTemplate> {
        let name = name.trim();
        if name.is_empty() {
            self.notice = Some(String::from("Template name is required"));
            return None;
        }
        if self.draft.url.is_empty() {
            self.notice = Some(String::from("Enter a URL before saving"));
            return None;
        }
        Some(SavedTemplate::from_draft(generate_template_id(), name, &self.draft))
    }

    pub fn set_templates(&mut self, templates: Vec<SavedTemplate>) {
        self.templates = templates;
    }

    /// Copy a cached template into the draft. Returns false if the id is unknown.
    pub fn load_template(&mut self, id: &str) -> bool {
        match self.templates.iter().find(|t| t.id == id) {
            Some(template) => {
                self.draft.load_from_template(template);
                true
            }
            None => {
                self.notice = Some(format!("No template with id {}", id));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderEntry, Status};
    use std::collections::HashMap;

    fn ready_state() -> AppState {
        let mut state = AppState::new();
        state.set_url("https://api.example.com/ping".to_string());
        state
    }

    fn dispatched_id(cmd: Option<NetworkCommand>) -> u64 {
        match cmd {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("expected dispatch, got {:?}", other),
        }
    }

    fn ok_result(code: u16) -> ResponseResult {
        ResponseResult {
            status: Status::Code(code),
            time: "8 ms".to_string(),
            headers: HashMap::new(),
            body: "pong".to_string(),
        }
    }

    #[test]
    fn test_empty_url_never_dispatches() {
        for method in [HttpMethod::GET, HttpMethod::POST, HttpMethod::DELETE] {
            let mut state = AppState::new();
            state.set_method(method);
            state.set_body("{}".to_string());
            state.update_header(0, HeaderField::Key, "X-A".to_string());
            assert!(state.prepare_dispatch().is_none());
            assert_eq!(state.phase, ExecutionPhase::Idle);
            assert!(state.notice.is_some());
        }
    }

    #[test]
    fn test_dispatch_clears_previous_result() {
        let mut state = ready_state();
        let id = dispatched_id(state.prepare_dispatch());
        state.handle_response(NetworkResponse::Success { id, result: ok_result(200) });
        assert!(state.response.is_some());

        let cmd = state.prepare_dispatch();
        assert!(cmd.is_some());
        assert!(state.is_loading());
        assert!(state.response.is_none());
    }

    #[test]
    fn test_single_dispatch_in_flight() {
        let mut state = ready_state();
        assert!(state.prepare_dispatch().is_some());
        assert!(state.prepare_dispatch().is_none());
    }

    #[test]
    fn test_success_transition() {
        let mut state = ready_state();
        let id = dispatched_id(state.prepare_dispatch());
        state.handle_response(NetworkResponse::Success { id, result: ok_result(404) });

        assert_eq!(state.phase, ExecutionPhase::Succeeded);
        assert!(!state.is_loading());
        assert_eq!(state.response.as_ref().unwrap().status, Status::Code(404));
    }

    #[test]
    fn test_failure_becomes_error_result() {
        let mut state = ready_state();
        let id = dispatched_id(state.prepare_dispatch());
        state.handle_response(NetworkResponse::Error {
            id,
            message: "Connection failed".to_string(),
        });

        assert_eq!(state.phase, ExecutionPhase::Failed);
        assert_eq!(state.response, Some(ResponseResult::error("Connection failed")));
        assert_eq!(state.draft.url, "https://api.example.com/ping");
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = ready_state();
        let id = dispatched_id(state.prepare_dispatch());
        state.handle_response(NetworkResponse::Success { id: id + 100, result: ok_result(200) });
        assert!(state.is_loading());
        assert!(state.response.is_none());
    }

    #[test]
    fn test_out_of_range_header_edits_are_ignored() {
        let mut state = AppState::new();
        state.update_header(5, HeaderField::Value, "x".to_string());
        state.remove_header(5);
        assert_eq!(state.draft.headers, vec![HeaderEntry::default()]);
    }

    #[test]
    fn test_template_requires_name_and_url() {
        let mut state = AppState::new();
        assert!(state.template_from_draft("ping").is_none());

        state.set_url("https://api.example.com/ping".to_string());
        assert!(state.template_from_draft("   ").is_none());

        let template = state.template_from_draft(" ping ").unwrap();
        assert_eq!(template.name, "ping");
        assert!(template.headers.is_empty());
    }

    #[test]
    fn test_save_then_reload_scenario() {
        let mut state = ready_state();
        let id = dispatched_id(state.prepare_dispatch());
        state.handle_response(NetworkResponse::Success { id, result: ok_result(200) });
        assert!(matches!(state.response.as_ref().unwrap().status, Status::Code(_)));

        let template = state.template_from_draft("ping").unwrap();
        let template_id = template.id.clone();
        state.set_templates(vec![template]);

        state.set_url("https://elsewhere.example.com".to_string());
        assert!(state.load_template(&template_id));
        assert_eq!(state.draft.url, "https://api.example.com/ping");
        assert_eq!(state.draft.headers, vec![HeaderEntry::default()]);
    }

    #[test]
    fn test_load_unknown_template() {
        let mut state = ready_state();
        assert!(!state.load_template("nope"));
        assert_eq!(state.draft.url, "https://api.example.com/ping");
    }
}
