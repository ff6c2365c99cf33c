//! Chatbox engine: backend client and background request execution.
mod client;
mod engine;
mod types;
mod upload;
mod wire;

pub use client::{BackendClient, BackendSettings, ReqwestBackendClient};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use types::{
    AskReply, BackendError, EngineEvent, FailureKind, RequestId, SourceRef, UploadReply,
};
pub use upload::UploadFile;
