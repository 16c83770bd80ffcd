use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::DialogueBackend;
use crate::error::IntegrationError;
use crate::types::{DialogueReply, DialogueRequest, ErrorBody};

/// Where the dialogue service lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Full URL of the chat endpoint
    pub endpoint: String,
    /// Request timeout in seconds (0 = wait forever)
    pub timeout_secs: u64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/chat".to_string(),
            timeout_secs: 30,
        }
    }
}

impl DialogueConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Turn a raw HTTP status and body into a reply or an error.
///
/// A success status with no usable `text` yields the fallback greeting; a
/// success status with an unparseable body is a serialization error. A
/// failure status surfaces the body's `error` field when present.
pub fn interpret_response(status: u16, body: &str) -> Result<String, IntegrationError> {
    if (200..300).contains(&status) {
        let reply: DialogueReply = serde_json::from_str(body)?;
        return Ok(reply.into_text());
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("Server error: {}", status));
    Err(IntegrationError::ServerError { status, message })
}

/// Dialogue backend talking to the HTTP chat endpoint
pub struct HttpDialogueApi {
    client: Client,
    endpoint: String,
}

impl HttpDialogueApi {
    pub fn new(config: &DialogueConfig) -> Result<Self, IntegrationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| IntegrationError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DialogueBackend for HttpDialogueApi {
    fn complete(
        &self,
        request: DialogueRequest,
    ) -> impl Future<Output = Result<String, IntegrationError>> + Send {
        let client = self.client.clone();
        let url = self.endpoint.clone();

        async move {
            debug!("POST {} for {}", url, request.npc_name);
            let response = client.post(&url).json(&request).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            interpret_response(status, &body)
        }
    }
}
