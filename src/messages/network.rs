//! Network messages - communication between App and Network layers

use crate::models::{DispatchPayload, ResponseResult};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Post a payload to the execution backend
    Dispatch {
        id: u64,
        payload: DispatchPayload,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Backend returned a decoded result (any target status)
    Success {
        id: u64,
        result: ResponseResult,
    },
    /// Transport, backend or decoding failure
    Error {
        id: u64,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the dispatch ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
