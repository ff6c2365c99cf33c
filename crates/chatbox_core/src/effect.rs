use crate::{PickedFile, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Ask { request_id: RequestId, question: String },
    Upload { request_id: RequestId, file: PickedFile },
    ScrollToBottom(ScrollBehavior),
    FocusInput,
    OpenFilePicker,
    ClearFilePicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}
