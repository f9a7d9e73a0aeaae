//! Request composer - editing operations on the draft and payload derivation

use std::collections::HashMap;

use crate::constants::{CONTENT_TYPE, DEFAULT_CONTENT_TYPE};
use crate::models::{DispatchPayload, DraftRequest, HeaderEntry, HeaderField, HttpMethod, SavedTemplate};

impl DraftRequest {
    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Replace the key or value of the header row at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds. Callers check bounds first.
    pub fn update_header(&mut self, index: usize, field: HeaderField, value: impl Into<String>) {
        let entry = &mut self.headers[index];
        match field {
            HeaderField::Key => entry.key = value.into(),
            HeaderField::Value => entry.value = value.into(),
        }
    }

    pub fn add_header(&mut self) {
        self.headers.push(HeaderEntry::default());
    }

    /// Remove the header row at `index`. The list may become empty.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn remove_header(&mut self, index: usize) {
        self.headers.remove(index);
    }

    pub fn can_dispatch(&self) -> bool {
        !self.url.is_empty()
    }

    /// Derive the wire payload without touching the draft.
    ///
    /// Rows with an empty key are skipped, later duplicates overwrite earlier
    /// ones, and body-carrying methods get a JSON content type unless one is
    /// already set.
    pub fn dispatch_payload(&self) -> DispatchPayload {
        let mut headers: HashMap<String, String> = self
            .headers
            .iter()
            .filter(|h| !h.key.is_empty())
            .map(|h| (h.key.clone(), h.value.clone()))
            .collect();

        if self.method.has_body() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE.to_string(), DEFAULT_CONTENT_TYPE.to_string());
        }

        DispatchPayload {
            method: self.method,
            url: self.url.clone(),
            headers,
            body: self.body.clone(),
        }
    }

    /// Copy a template into the draft, leaving one blank header row to type into
    pub fn load_from_template(&mut self, template: &SavedTemplate) {
        self.method = template.method;
        self.url = template.url.clone();
        self.body = template.body.clone();
        self.headers = template.headers.clone();
        self.headers.push(HeaderEntry::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(method: HttpMethod, headers: Vec<HeaderEntry>) -> DraftRequest {
        DraftRequest {
            method,
            url: "https://api.example.com/items".into(),
            headers,
            body: r#"{"a":1}"#.into(),
        }
    }

    fn template(headers: Vec<HeaderEntry>) -> SavedTemplate {
        SavedTemplate {
            id: "42".into(),
            name: "items".into(),
            method: HttpMethod::PUT,
            url: "https://api.example.com/items/1".into(),
            headers,
            body: "{}".into(),
        }
    }

    #[test]
    fn test_update_header_fields() {
        let mut d = DraftRequest::default();
        d.update_header(0, HeaderField::Key, "Accept");
        d.update_header(0, HeaderField::Value, "text/plain");
        assert_eq!(d.headers, vec![HeaderEntry::new("Accept", "text/plain")]);
    }

    #[test]
    #[should_panic]
    fn test_update_header_out_of_bounds_panics() {
        let mut d = DraftRequest::default();
        d.update_header(3, HeaderField::Key, "X");
    }

    #[test]
    fn test_remove_last_header_leaves_empty() {
        let mut d = DraftRequest::default();
        d.add_header();
        assert_eq!(d.headers.len(), 2);
        d.remove_header(1);
        d.remove_header(0);
        assert!(d.headers.is_empty());
    }

    #[test]
    fn test_empty_url_cannot_dispatch() {
        let mut d = draft(HttpMethod::POST, vec![]);
        assert!(d.can_dispatch());
        d.set_url("");
        assert!(!d.can_dispatch());
    }

    #[test]
    fn test_payload_skips_empty_keys_and_keeps_draft() {
        let d = draft(
            HttpMethod::GET,
            vec![
                HeaderEntry::new("X-One", "1"),
                HeaderEntry::new("", "ignored"),
                HeaderEntry::new("X-Two", "2"),
            ],
        );
        let before = d.clone();
        let payload = d.dispatch_payload();

        assert_eq!(payload.headers.len(), 2);
        assert_eq!(payload.headers["X-One"], "1");
        assert_eq!(payload.headers["X-Two"], "2");
        assert_eq!(d, before);
    }

    #[test]
    fn test_payload_last_duplicate_wins() {
        let d = draft(
            HttpMethod::GET,
            vec![HeaderEntry::new("X-Id", "first"), HeaderEntry::new("X-Id", "second")],
        );
        assert_eq!(d.dispatch_payload().headers["X-Id"], "second");
        assert_eq!(d.headers.len(), 2);
    }

    #[test]
    fn test_content_type_injected_for_body_methods() {
        for method in [HttpMethod::POST, HttpMethod::PUT, HttpMethod::PATCH] {
            let d = draft(method, vec![HeaderEntry::default()]);
            let payload = d.dispatch_payload();
            assert_eq!(payload.headers["Content-Type"], "application/json");
            assert_eq!(d.headers, vec![HeaderEntry::default()]);
        }
    }

    #[test]
    fn test_content_type_not_injected_for_get_delete() {
        for method in [HttpMethod::GET, HttpMethod::DELETE] {
            let payload = draft(method, vec![]).dispatch_payload();
            assert!(!payload.headers.contains_key("Content-Type"));
        }
    }

    #[test]
    fn test_explicit_content_type_kept() {
        let d = draft(HttpMethod::POST, vec![HeaderEntry::new("Content-Type", "text/xml")]);
        assert_eq!(d.dispatch_payload().headers["Content-Type"], "text/xml");
    }

    #[test]
    fn test_content_type_match_is_case_sensitive() {
        let d = draft(HttpMethod::PATCH, vec![HeaderEntry::new("content-type", "text/xml")]);
        let payload = d.dispatch_payload();
        assert_eq!(payload.headers["content-type"], "text/xml");
        assert_eq!(payload.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_load_template_without_headers() {
        let mut d = draft(HttpMethod::GET, vec![HeaderEntry::new("Old", "x")]);
        d.load_from_template(&template(vec![]));
        assert_eq!(d.method, HttpMethod::PUT);
        assert_eq!(d.url, "https://api.example.com/items/1");
        assert_eq!(d.body, "{}");
        assert_eq!(d.headers, vec![HeaderEntry::default()]);
    }

    #[test]
    fn test_load_template_appends_blank_row() {
        let mut d = DraftRequest::default();
        let headers = vec![HeaderEntry::new("A", "1"), HeaderEntry::new("B", "2")];
        d.load_from_template(&template(headers.clone()));
        assert_eq!(d.headers.len(), 3);
        assert_eq!(&d.headers[..2], &headers[..]);
        assert_eq!(d.headers[2], HeaderEntry::default());
    }
}
