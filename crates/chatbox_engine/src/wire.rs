use serde::Deserialize;

use crate::{AskReply, BackendError, FailureKind, SourceRef, UploadReply};

#[derive(Debug, Deserialize)]
struct AskBody {
    answer: String,
    #[serde(default)]
    sources: Option<Vec<WireSource>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireSource {
    Label(String),
    Chunk { source: String, chunk: u64 },
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    chunks_inserted: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

pub(crate) fn decode_ask(body: &[u8]) -> Result<AskReply, BackendError> {
    let parsed: AskBody = serde_json::from_slice(body)
        .map_err(|err| BackendError::new(FailureKind::MalformedBody, err.to_string()))?;

    let sources = parsed
        .sources
        .unwrap_or_default()
        .into_iter()
        .map(|source| match source {
            WireSource::Label(label) => SourceRef::Label(label),
            WireSource::Chunk { source, chunk } => SourceRef::Chunk { source, chunk },
        })
        .collect();

    Ok(AskReply {
        answer: parsed.answer,
        sources,
    })
}

pub(crate) fn decode_upload(body: &[u8]) -> Result<UploadReply, BackendError> {
    let parsed: UploadBody = serde_json::from_slice(body)
        .map_err(|err| BackendError::new(FailureKind::MalformedBody, err.to_string()))?;

    if parsed.status.as_deref() == Some("error") {
        return Err(BackendError::new(
            FailureKind::Rejected,
            parsed
                .message
                .unwrap_or_else(|| "backend reported an error".to_string()),
        ));
    }

    match parsed.chunks_inserted {
        Some(chunks_inserted) => Ok(UploadReply { chunks_inserted }),
        None => Err(BackendError::new(
            FailureKind::MalformedBody,
            "missing field `chunks_inserted`",
        )),
    }
}
