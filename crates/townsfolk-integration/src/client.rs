use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use tracing::debug;

use crate::dialogue_api::{DialogueConfig, HttpDialogueApi};
use crate::error::IntegrationError;
use crate::types::DialogueRequest;

/// Something that can turn a dialogue request into a line of text.
///
/// The HTTP endpoint is the production implementation; tests plug in
/// scripted backends.
pub trait DialogueBackend: Send + Sync + 'static {
    fn complete(
        &self,
        request: DialogueRequest,
    ) -> impl Future<Output = Result<String, IntegrationError>> + Send;
}

/// A non-blocking handle to an in-flight async request.
/// Call `try_recv()` each frame to check for results without blocking the game loop.
pub struct PendingRequest<T> {
    receiver: mpsc::Receiver<Result<T, IntegrationError>>,
}

impl<T> PendingRequest<T> {
    /// Non-blocking check for the result. Returns `None` if still pending.
    ///
    /// A worker that vanished without answering reports
    /// [`IntegrationError::Disconnected`] so callers never wait forever on a
    /// dead channel.
    pub fn try_recv(&self) -> Option<Result<T, IntegrationError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(IntegrationError::Disconnected)),
        }
    }

    /// Blocking wait for the result. Only use outside the frame loop.
    pub fn wait(self) -> Result<T, IntegrationError> {
        self.receiver.recv().map_err(|_| IntegrationError::Disconnected)?
    }
}

/// Facade for dialogue service interactions.
/// Owns a background tokio runtime and dispatches async work via channels.
pub struct IntegrationClient<B: DialogueBackend = HttpDialogueApi> {
    runtime: tokio::runtime::Runtime,
    backend: Arc<B>,
    online: Arc<AtomicBool>,
}

impl IntegrationClient<HttpDialogueApi> {
    /// Create a client talking to the configured HTTP endpoint.
    pub fn new(config: &DialogueConfig) -> Result<Self, IntegrationError> {
        Self::with_backend(HttpDialogueApi::new(config)?)
    }
}

impl<B: DialogueBackend> IntegrationClient<B> {
    /// Create a client with a background runtime around any backend.
    pub fn with_backend(backend: B) -> Result<Self, IntegrationError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("townsfolk-dialogue")
            .enable_all()
            .build()
            .map_err(|e| IntegrationError::Runtime(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            runtime,
            backend: Arc::new(backend),
            online: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Send a dialogue request. Returns immediately; poll the handle each frame.
    pub fn send_dialogue(&self, request: DialogueRequest) -> PendingRequest<String> {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(&self.backend);
        let online = Arc::clone(&self.online);

        self.runtime.spawn(async move {
            let result = backend.complete(request).await;
            match &result {
                Ok(_) => online.store(true, Ordering::Relaxed),
                Err(IntegrationError::Offline) => online.store(false, Ordering::Relaxed),
                _ => {}
            }
            if tx.send(result).is_err() {
                debug!("Dialogue result dropped: receiver gone");
            }
        });

        PendingRequest { receiver: rx }
    }

    /// Whether the service appears to be online (based on last request result).
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
