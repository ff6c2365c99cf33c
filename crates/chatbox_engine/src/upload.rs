use std::path::{Path, PathBuf};

use reqwest::multipart::Part;
use tokio_util::io::ReaderStream;

use crate::{BackendError, FailureKind};

/// A local file to send to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub path: PathBuf,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn mime_type(&self) -> String {
        mime_guess::from_path(Path::new(&self.name))
            .first_or_octet_stream()
            .to_string()
    }

    /// Streams the file from disk into a multipart part.
    pub(crate) async fn into_part(self) -> Result<Part, BackendError> {
        let mime_type = self.mime_type();
        let file = tokio::fs::File::open(&self.path).await.map_err(|err| {
            BackendError::new(FailureKind::Io, format!("{}: {err}", self.path.display()))
        })?;
        let len = file
            .metadata()
            .await
            .map_err(|err| BackendError::new(FailureKind::Io, err.to_string()))?
            .len();

        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        Part::stream_with_length(body, len)
            .file_name(self.name)
            .mime_str(&mime_type)
            .map_err(|err| BackendError::new(FailureKind::Io, err.to_string()))
    }
}
