use std::collections::BTreeSet;

use crate::view_model::{MessageView, WidgetViewModel};
use crate::{Message, PanelState, Transcript};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    panel: PanelState,
    transcript: Transcript,
    input: String,
    pending_question: Option<RequestId>,
    pending_uploads: BTreeSet<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            panel: PanelState::default(),
            transcript: Transcript::default(),
            input: String::new(),
            pending_question: None,
            pending_uploads: BTreeSet::new(),
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WidgetViewModel {
        WidgetViewModel {
            panel: self.panel,
            launcher_visible: self.panel.launcher_visible(),
            minimized_label_visible: self.panel.minimized_label_visible(),
            input: self.input.clone(),
            send_enabled: self.pending_question.is_none(),
            typing: self.transcript.is_typing(),
            uploads_in_flight: self.pending_uploads.len(),
            messages: self
                .transcript
                .messages()
                .iter()
                .map(MessageView::from)
                .collect(),
        }
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn question_in_flight(&self) -> bool {
        self.pending_question.is_some()
    }

    pub fn uploads_in_flight(&self) -> usize {
        self.pending_uploads.len()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_panel(&mut self, panel: PanelState) {
        if self.panel != panel {
            self.panel = panel;
            self.dirty = true;
        }
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    pub(crate) fn append_message(&mut self, message: Message) {
        self.transcript.append(message);
        self.dirty = true;
    }

    pub(crate) fn show_typing(&mut self) -> bool {
        let shown = self.transcript.show_typing();
        self.dirty |= shown;
        shown
    }

    pub(crate) fn hide_typing(&mut self) -> bool {
        let hidden = self.transcript.hide_typing();
        self.dirty |= hidden;
        hidden
    }

    pub(crate) fn begin_question(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_question = Some(request_id);
        self.dirty = true;
        request_id
    }

    /// Clears the pending question if `request_id` is the one in flight.
    pub(crate) fn finish_question(&mut self, request_id: RequestId) -> bool {
        if self.pending_question == Some(request_id) {
            self.pending_question = None;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_uploads.insert(request_id);
        self.dirty = true;
        request_id
    }

    pub(crate) fn finish_upload(&mut self, request_id: RequestId) -> bool {
        let removed = self.pending_uploads.remove(&request_id);
        self.dirty |= removed;
        removed
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }
}
