//! Element ids of the widget markup.

pub const CHAT_BUTTON: &str = "chat-button";
pub const CHAT_WINDOW: &str = "chat-window";
pub const CLOSE_CHAT: &str = "close-chat";
pub const MINIMIZE_CHAT: &str = "minimize-chat";
pub const SEND_BUTTON: &str = "send-button";
pub const CHAT_INPUT: &str = "chat-input";
pub const CHAT_MESSAGES: &str = "chat-messages";
pub const FILE_INPUT: &str = "file-input";
pub const FILE_BUTTON: &str = "file-button";
pub const TYPING_INDICATOR: &str = "typing-indicator";
pub const MINIMIZED_LABEL_CLASS: &str = "minimized-label";

/// Elements nested inside the panel; clicks on them bubble up to `chat-window`.
pub const PANEL_CHILDREN: &[&str] = &[
    CLOSE_CHAT,
    MINIMIZE_CHAT,
    SEND_BUTTON,
    CHAT_INPUT,
    CHAT_MESSAGES,
    FILE_INPUT,
    FILE_BUTTON,
    TYPING_INDICATOR,
    MINIMIZED_LABEL_CLASS,
];
