//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::storage::TemplateStore;

/// App actor that processes UI events and network responses.
///
/// Store calls are awaited inline, so writes reach the store in the order the
/// events arrived.
pub struct AppActor {
    state: AppState,
    store: TemplateStore,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        store: TemplateStore,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            store,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        self.refresh_templates().await;
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event).await {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    async fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        self.state.notice = None;

        match event {
            // Draft
            UiEvent::SetMethod(method) => self.state.set_method(method),
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::SetUrl(url) => self.state.set_url(url),
            UiEvent::SetBody(body) => self.state.set_body(body),

            // Headers
            UiEvent::AddHeader => self.state.add_header(),
            UiEvent::RemoveHeader(index) => self.state.remove_header(index),
            UiEvent::UpdateHeader { index, field, value } => {
                self.state.update_header(index, field, value)
            }

            // Request
            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.prepare_dispatch() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Templates
            UiEvent::SaveTemplate { name } => {
                if let Some(template) = self.state.template_from_draft(&name) {
                    match self.store.save(&template).await {
                        Ok(()) => {
                            self.state.notice = Some(format!("Saved '{}' as {}", template.name, template.id));
                            self.refresh_templates().await;
                        }
                        Err(e) => self.storage_failed("save", e),
                    }
                }
            }
            UiEvent::LoadTemplate { id } => {
                self.state.load_template(&id);
            }
            UiEvent::DeleteTemplate { id } => match self.store.delete_by_id(&id).await {
                Ok(()) => self.refresh_templates().await,
                Err(e) => self.storage_failed("delete", e),
            },
            UiEvent::RefreshTemplates => self.refresh_templates().await,

            UiEvent::Quit => return true,
        }

        false
    }

    async fn refresh_templates(&mut self) {
        match self.store.list_all().await {
            Ok(templates) => self.state.set_templates(templates),
            Err(e) => self.storage_failed("list", e),
        }
    }

    fn storage_failed(&mut self, op: &str, e: anyhow::Error) {
        tracing::error!(op, error = %format!("{:#}", e), "Template store operation failed");
        self.state.notice = Some(format!("Storage error: {:#}", e));
    }
}
