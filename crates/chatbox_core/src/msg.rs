use std::path::PathBuf;

use crate::{RequestId, Source};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked the floating launcher button.
    LauncherClicked,
    /// User clicked the panel's close control.
    CloseClicked,
    /// User clicked the panel's minimize control.
    MinimizeClicked,
    /// User clicked the panel body, outside the close/minimize controls.
    PanelClicked,
    /// Escape pressed anywhere on the page.
    EscapePressed,
    /// User edited the text input.
    InputChanged(String),
    /// Send button activated or Enter pressed in the text input.
    SendRequested,
    /// User clicked the attach button.
    FileButtonClicked,
    /// Files picked through the file input or dropped onto the panel.
    FilesChosen {
        files: Vec<PickedFile>,
        origin: FileOrigin,
    },
    /// Backend answered (or failed to answer) a question.
    AskCompleted {
        request_id: RequestId,
        outcome: AskOutcome,
    },
    /// Backend finished (or failed) an upload.
    UploadCompleted {
        request_id: RequestId,
        outcome: UploadOutcome,
    },
    /// Fallback for gestures with no widget meaning.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
}

impl PickedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    Picker,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Answered { answer: String, sources: Vec<Source> },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { chunks_inserted: u64 },
    Failed,
}
