use std::sync::{mpsc, Arc};
use std::thread;

use chatbox_logging::{chatbox_debug, chatbox_info, chatbox_warn};
use thiserror::Error;

use crate::client::{BackendClient, BackendSettings, ReqwestBackendClient};
use crate::{BackendError, EngineEvent, RequestId, UploadFile};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build backend client: {0}")]
    Client(#[from] BackendError),
}

enum EngineCommand {
    Ask { request_id: RequestId, question: String },
    Upload { request_id: RequestId, file: UploadFile },
}

/// Submits backend requests to a background runtime. Every request runs to completion.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side for request completions, in arrival order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<(Self, EngineEvents), EngineError> {
        chatbox_info!("Backend at {}", settings.base_url);
        let client = ReqwestBackendClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(
        client: Arc<dyn BackendClient>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            chatbox_debug!("Engine command channel closed");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Ask {
            request_id,
            question: question.into(),
        });
    }

    pub fn upload(&self, request_id: RequestId, file: UploadFile) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { request_id, file });
    }
}

impl EngineEvents {
    /// Blocks until the next completion; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    client: &dyn BackendClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Ask {
            request_id,
            question,
        } => {
            chatbox_debug!("ask #{} question_len={}", request_id, question.len());
            let result = client.ask(&question).await;
            log_completion(request_id, "ask", result.as_ref().err());
            EngineEvent::AskCompleted { request_id, result }
        }
        EngineCommand::Upload { request_id, file } => {
            chatbox_debug!("upload #{} file={}", request_id, file.name);
            let result = client.upload(file).await;
            log_completion(request_id, "upload", result.as_ref().err());
            EngineEvent::UploadCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}

/// Runs between awaits, so the thread-local id cannot leak to another task.
fn log_completion(request_id: RequestId, operation: &str, error: Option<&BackendError>) {
    chatbox_logging::set_request_id(request_id);
    match error {
        Some(err) => chatbox_warn!("{} failed: {}", operation, err),
        None => chatbox_debug!("{} #{} completed", operation, request_id),
    }
    chatbox_logging::clear_request_id();
}
