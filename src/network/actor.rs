//! Network actor - runs dispatches in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ExecutionClient;

/// Network actor that processes dispatch commands
pub struct NetworkActor {
    client: ExecutionClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ExecutionClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Dispatch { id, payload }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %payload.url, method = %payload.method, "Dispatching request");
                                let response = match client.dispatch(&payload).await {
                                    Ok(result) => {
                                        tracing::info!(id, status = %result.status, time = %result.time, "Dispatch completed");
                                        NetworkResponse::Success { id, result }
                                    }
                                    Err(e) => {
                                        tracing::warn!(id, error = %e, "Dispatch failed");
                                        NetworkResponse::Error { id, message: e.0 }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
