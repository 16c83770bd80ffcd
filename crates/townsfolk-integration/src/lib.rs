//! Townsfolk Integration - dialogue endpoint client
//!
//! Provides the request/response contract of the external dialogue service,
//! an HTTP backend for it, and a non-blocking client that runs requests on a
//! background runtime so the frame loop never stalls.

pub mod client;
pub mod dialogue_api;
pub mod error;
pub mod types;

pub use client::{DialogueBackend, IntegrationClient, PendingRequest};
pub use dialogue_api::{interpret_response, DialogueConfig, HttpDialogueApi};
pub use error::IntegrationError;
pub use types::*;
