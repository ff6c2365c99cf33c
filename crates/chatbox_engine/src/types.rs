use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

/// A citation as sent by the backend: either a bare label or a document/chunk pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    Label(String),
    Chunk { source: String, chunk: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskReply {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReply {
    pub chunks_inserted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AskCompleted {
        request_id: RequestId,
        result: Result<AskReply, BackendError>,
    },
    UploadCompleted {
        request_id: RequestId,
        result: Result<UploadReply, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Io,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
    /// The backend answered 2xx but reported an error in the body.
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Rejected => write!(f, "rejected by backend"),
        }
    }
}
