//! devbox checker - actor-based HTTP request checker
//!
//! Architecture:
//! - Shell - reads commands from stdin, prints render state
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async dispatch to the execution backend

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use devbox_checker::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use devbox_checker::format::{classify_status, format_headers, is_json_body, pretty_print_if_json};
use devbox_checker::messages::{parse_command, ShellInput};
use devbox_checker::{
    AppActor, Config, ExecutionClient, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    TemplateStore, UiEvent,
};

const HELP: &str = r#"
 COMPOSE
   method [GET|POST|PUT|PATCH|DELETE]   Set method (no argument cycles)
   url <url>                            Set URL
   body <text>                          Set raw body
   header add                           Append an empty header row
   header rm <i>                        Remove header row i
   header <i> key|value <text>          Edit header row i

 RUN
   send                                 Dispatch the draft
   show                                 Print draft and last response

 TEMPLATES
   save <name>                          Save the draft as a template
   list                                 List saved templates
   load <id>                            Load a template into the draft
   delete <id>                          Delete a template

 GENERAL
   help                                 Show this help
   quit                                 Exit
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.data_dir, LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(endpoint = %config.check_endpoint, data_dir = %config.data_dir.display(), "Starting");
    let store = TemplateStore::open(config.template_dir()).await?;
    let client = ExecutionClient::new(config.check_endpoint.clone(), config.request_timeout);

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(store, net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    println!("{} {} - backend {}", APP_NAME, APP_VERSION, config.check_endpoint);
    println!("Type 'help' for commands.");

    run_shell(ui_tx, &mut render_rx).await?;
    let _ = app_handle.await;

    Ok(())
}

/// Read commands until quit or end of input
async fn run_shell(
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = render_rx.recv().await.unwrap_or_default();
    if let Some(notice) = &current_state.notice {
        println!("* {}", notice);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                let _ = ui_tx.send(UiEvent::Quit);
                break;
            }
        };

        let event = match parse_command(&line) {
            None => continue,
            Some(ShellInput::Help) => {
                println!("{}", HELP);
                continue;
            }
            Some(ShellInput::Show) => {
                print_draft(&current_state);
                print_response(&current_state);
                continue;
            }
            Some(ShellInput::Invalid(msg)) => {
                println!("! {}", msg);
                continue;
            }
            Some(ShellInput::Event(event)) => event,
        };

        if matches!(event, UiEvent::Quit) {
            let _ = ui_tx.send(event);
            break;
        }

        let is_send = matches!(event, UiEvent::SendRequest);
        let is_list = matches!(
            event,
            UiEvent::RefreshTemplates | UiEvent::SaveTemplate { .. } | UiEvent::DeleteTemplate { .. }
        );
        let is_load = matches!(event, UiEvent::LoadTemplate { .. });

        if ui_tx.send(event).is_err() {
            break;
        }
        match render_rx.recv().await {
            Some(state) => current_state = state,
            None => break,
        }
        if let Some(notice) = &current_state.notice {
            println!("* {}", notice);
        }

        if is_send && current_state.is_loading() {
            println!("Sending...");
            // Wait for the dispatch to resolve
            while current_state.is_loading() {
                match render_rx.recv().await {
                    Some(state) => current_state = state,
                    None => return Ok(()),
                }
            }
            print_response(&current_state);
        } else if is_list {
            print_templates(&current_state);
        } else if is_load {
            print_draft(&current_state);
        }
    }

    Ok(())
}

fn print_draft(state: &RenderState) {
    let draft = &state.draft;
    println!("{} {}", draft.method, if draft.url.is_empty() { "<no url>" } else { draft.url.as_str() });
    for (i, h) in draft.headers.iter().enumerate() {
        println!("  [{}] {}: {}", i, h.key, h.value);
    }
    if !draft.body.is_empty() {
        println!("{}", draft.body);
    }
}

fn print_response(state: &RenderState) {
    match &state.response {
        Some(response) => {
            let class = classify_status(&response.status);
            println!("Status: {} ({})", response.status, class.as_str());
            println!("Time: {}", response.time);
            println!("Headers:\n{}", format_headers(&response.headers));
            let kind = if is_json_body(&response.body) { " (json)" } else { "" };
            println!("Body{}:\n{}", kind, pretty_print_if_json(&response.body));
        }
        None => println!("No response yet."),
    }
}

fn print_templates(state: &RenderState) {
    if state.templates.is_empty() {
        println!("No saved templates.");
        return;
    }
    for t in &state.templates {
        println!("  {}  {:6} {}  ({})", t.id, t.method.as_str(), t.url, t.name);
    }
}
