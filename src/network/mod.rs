//! Network layer - dispatch to the execution backend
//!
//! The Network actor receives dispatch commands and sends back results.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ExecutionClient, TransportError};
