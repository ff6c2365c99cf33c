use crate::notices;
use crate::{
    AskOutcome, Effect, FileOrigin, Message, Msg, PickedFile, ScrollBehavior, Sender,
    UploadOutcome, WidgetState,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::LauncherClicked => {
            let next = state.panel().launcher_clicked();
            state.set_panel(next);
            Vec::new()
        }
        Msg::CloseClicked => {
            let next = state.panel().close_clicked();
            state.set_panel(next);
            Vec::new()
        }
        Msg::EscapePressed => {
            let next = state.panel().escape_pressed();
            state.set_panel(next);
            Vec::new()
        }
        Msg::MinimizeClicked => {
            let next = state.panel().minimize_clicked();
            state.set_panel(next);
            Vec::new()
        }
        Msg::PanelClicked => {
            let next = state.panel().body_clicked();
            state.set_panel(next);
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendRequested => submit_question(&mut state),
        Msg::FileButtonClicked => vec![Effect::OpenFilePicker],
        Msg::FilesChosen { files, origin } => submit_upload(&mut state, files, origin),
        Msg::AskCompleted {
            request_id,
            outcome,
        } => {
            if state.finish_question(request_id) {
                state.hide_typing();
            }
            let reply = match outcome {
                AskOutcome::Answered { answer, sources } => {
                    Message::new(answer, Sender::Bot, sources)
                }
                AskOutcome::Failed => Message::bot(notices::CANNOT_REACH_SERVER),
            };
            state.append_message(reply);
            vec![Effect::ScrollToBottom(ScrollBehavior::Smooth)]
        }
        Msg::UploadCompleted {
            request_id,
            outcome,
        } => {
            state.finish_upload(request_id);
            let reply = match outcome {
                UploadOutcome::Uploaded { chunks_inserted } => {
                    Message::bot(notices::uploaded(chunks_inserted))
                }
                UploadOutcome::Failed => Message::bot(notices::CANNOT_UPLOAD_FILE),
            };
            state.append_message(reply);
            vec![Effect::ScrollToBottom(ScrollBehavior::Smooth)]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_question(state: &mut WidgetState) -> Vec<Effect> {
    // The send control stays disabled until the pending answer arrives; Enter obeys it too.
    if state.question_in_flight() {
        return Vec::new();
    }
    let question = state.input().trim().to_owned();
    if question.is_empty() {
        return Vec::new();
    }

    state.append_message(Message::user(question.clone()));
    state.set_input(String::new());
    let request_id = state.begin_question();

    let mut effects = vec![
        Effect::ScrollToBottom(ScrollBehavior::Smooth),
        Effect::FocusInput,
    ];
    if state.show_typing() {
        effects.push(Effect::ScrollToBottom(ScrollBehavior::Instant));
    }
    effects.push(Effect::Ask {
        request_id,
        question,
    });
    effects
}

fn submit_upload(
    state: &mut WidgetState,
    files: Vec<PickedFile>,
    origin: FileOrigin,
) -> Vec<Effect> {
    let Some(file) = files.into_iter().next() else {
        return Vec::new();
    };

    state.append_message(Message::bot(notices::uploading(&file.name)));
    let request_id = state.begin_upload();

    let mut effects = vec![Effect::ScrollToBottom(ScrollBehavior::Smooth)];
    if origin == FileOrigin::Picker {
        effects.push(Effect::ClearFilePicker);
    }
    effects.push(Effect::Upload { request_id, file });
    effects
}
