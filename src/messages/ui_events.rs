//! UI events - messages from the shell to the App layer

use crate::models::{HeaderField, HttpMethod};

/// Events generated from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Draft editing
    SetMethod(HttpMethod),
    CycleMethod,
    SetUrl(String),
    SetBody(String),

    // Headers
    AddHeader,
    RemoveHeader(usize),
    UpdateHeader {
        index: usize,
        field: HeaderField,
        value: String,
    },

    // Request actions
    SendRequest,

    // Templates
    SaveTemplate { name: String },
    LoadTemplate { id: String },
    DeleteTemplate { id: String },
    RefreshTemplates,

    // System
    Quit,
}

/// Result of parsing one shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Event(UiEvent),
    Show,
    Help,
    Invalid(String),
}

/// Convert one line of shell input into an event
pub fn parse_command(line: &str) -> Option<ShellInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim_start()),
        None => (line, ""),
    };

    let input = match cmd {
        "method" | "m" => {
            if rest.is_empty() {
                ShellInput::Event(UiEvent::CycleMethod)
            } else {
                match rest.parse::<HttpMethod>() {
                    Ok(method) => ShellInput::Event(UiEvent::SetMethod(method)),
                    Err(e) => ShellInput::Invalid(e.to_string()),
                }
            }
        }
        "url" | "u" => ShellInput::Event(UiEvent::SetUrl(rest.to_string())),
        "body" | "b" => ShellInput::Event(UiEvent::SetBody(rest.to_string())),
        "header" | "h" => parse_header_command(rest),
        "send" | "s" => ShellInput::Event(UiEvent::SendRequest),
        "save" => ShellInput::Event(UiEvent::SaveTemplate { name: rest.to_string() }),
        "load" => required_arg(rest, "load <id>", |id| UiEvent::LoadTemplate { id }),
        "delete" | "rm" => required_arg(rest, "delete <id>", |id| UiEvent::DeleteTemplate { id }),
        "list" | "ls" => ShellInput::Event(UiEvent::RefreshTemplates),
        "show" => ShellInput::Show,
        "help" | "?" => ShellInput::Help,
        "quit" | "q" | "exit" => ShellInput::Event(UiEvent::Quit),
        other => ShellInput::Invalid(format!("Unknown command: {}", other)),
    };

    Some(input)
}

fn required_arg(rest: &str, usage: &str, make: impl FnOnce(String) -> UiEvent) -> ShellInput {
    if rest.is_empty() {
        ShellInput::Invalid(format!("Usage: {}", usage))
    } else {
        ShellInput::Event(make(rest.to_string()))
    }
}

/// `header add`, `header rm <i>`, `header <i> key|value <text>`
fn parse_header_command(rest: &str) -> ShellInput {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let first = parts.next().unwrap_or_default();

    match first {
        "add" => ShellInput::Event(UiEvent::AddHeader),
        "rm" => match parts.next().and_then(|i| i.parse::<usize>().ok()) {
            Some(index) => ShellInput::Event(UiEvent::RemoveHeader(index)),
            None => ShellInput::Invalid("Usage: header rm <index>".to_string()),
        },
        index => {
            let index = match index.parse::<usize>() {
                Ok(index) => index,
                Err(_) => {
                    return ShellInput::Invalid(
                        "Usage: header add | header rm <i> | header <i> key|value <text>".to_string(),
                    )
                }
            };
            let field = match parts.next() {
                Some("key" | "k") => HeaderField::Key,
                Some("value" | "v") => HeaderField::Value,
                _ => return ShellInput::Invalid("Expected 'key' or 'value'".to_string()),
            };
            let value = parts.next().unwrap_or_default().to_string();
            ShellInput::Event(UiEvent::UpdateHeader { index, field, value })
        }
    }
}
