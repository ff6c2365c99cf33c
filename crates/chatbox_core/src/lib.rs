//! Chatbox core: pure widget state machine, transcript model and view-model helpers.
mod effect;
mod msg;
pub mod notices;
mod panel;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::{Effect, ScrollBehavior};
pub use msg::{AskOutcome, FileOrigin, Msg, PickedFile, UploadOutcome};
pub use panel::PanelState;
pub use state::{RequestId, WidgetState};
pub use transcript::{is_absolute_http_url, Citation, Message, Sender, Source, Transcript};
pub use update::update;
pub use view_model::{MessageView, WidgetViewModel};
