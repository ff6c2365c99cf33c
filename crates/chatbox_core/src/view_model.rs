use crate::{Citation, Message, PanelState, Sender};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetViewModel {
    pub panel: PanelState,
    pub launcher_visible: bool,
    pub minimized_label_visible: bool,
    pub input: String,
    pub send_enabled: bool,
    pub typing: bool,
    pub uploads_in_flight: usize,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub sender: Sender,
    pub text: String,
    pub citations: Vec<Citation>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender(),
            text: message.text().to_string(),
            citations: message.sources().iter().map(|source| source.citation()).collect(),
        }
    }
}
