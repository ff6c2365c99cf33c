//! Console gestures and their routing to widget messages.

use std::path::PathBuf;

use chatbox_core::{FileOrigin, Msg, PanelState, PickedFile};

use super::constants::*;

/// A DOM-level event produced by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click { target: String },
    KeyDown { target: Option<String>, key: String },
    InputText(String),
    FilesPicked(Vec<PathBuf>),
    FilesDropped(Vec<PathBuf>),
    DumpMarkup,
    Help,
    Quit,
}

pub const HELP: &str = "\
:open | :close | :min       click launcher / close / minimize
:click <element-id>         click any widget element
:key <Key>                  press a key (Escape, Enter)
:attach                     click the attach button
:pick <path>...             choose files in the file picker
:drop <path>...             drop files onto the panel
:html                       print the widget markup
:quit                       exit
anything else               type it and press Enter (prefix '::' to send a leading ':')";

pub fn parse_line(line: &str) -> Vec<UiEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Vec::new();
    }
    if let Some(text) = line.strip_prefix("::") {
        return typed(format!(":{text}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return typed(line.to_string());
    };

    let mut words = command.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let event = match (verb, args.as_slice()) {
        ("open", []) => click(CHAT_BUTTON),
        ("close", []) => click(CLOSE_CHAT),
        ("min", []) => click(MINIMIZE_CHAT),
        ("attach", []) => click(FILE_BUTTON),
        ("click", [target]) => click(target),
        ("key", [key]) => UiEvent::KeyDown {
            target: (*key == "Enter").then(|| CHAT_INPUT.to_string()),
            key: key.to_string(),
        },
        ("pick", paths) if !paths.is_empty() => UiEvent::FilesPicked(to_paths(paths)),
        ("drop", paths) if !paths.is_empty() => UiEvent::FilesDropped(to_paths(paths)),
        ("html", []) => UiEvent::DumpMarkup,
        ("quit", []) | ("q", []) => UiEvent::Quit,
        _ => UiEvent::Help,
    };
    vec![event]
}

/// Maps a DOM event to widget messages, in bubbling order.
///
/// Elements of a hidden panel are not rendered, so they receive nothing.
pub fn route(event: &UiEvent, panel: PanelState) -> Vec<Msg> {
    match event {
        UiEvent::Click { target } => route_click(target, panel),
        UiEvent::KeyDown { target, key } => match key.as_str() {
            "Escape" => vec![Msg::EscapePressed],
            "Enter" if target.as_deref() == Some(CHAT_INPUT) && panel.is_visible() => {
                vec![Msg::SendRequested]
            }
            _ => Vec::new(),
        },
        UiEvent::InputText(text) if panel.is_visible() => vec![Msg::InputChanged(text.clone())],
        UiEvent::FilesPicked(paths) => vec![files_chosen(paths, FileOrigin::Picker)],
        UiEvent::FilesDropped(paths) if panel.is_visible() => {
            vec![files_chosen(paths, FileOrigin::Drop)]
        }
        _ => Vec::new(),
    }
}

fn route_click(target: &str, panel: PanelState) -> Vec<Msg> {
    if target == CHAT_BUTTON {
        return if panel.launcher_visible() {
            vec![Msg::LauncherClicked]
        } else {
            Vec::new()
        };
    }
    if !panel.is_visible() {
        return Vec::new();
    }

    match target {
        // Close and minimize stop propagation.
        CLOSE_CHAT => vec![Msg::CloseClicked],
        MINIMIZE_CHAT => vec![Msg::MinimizeClicked],
        CHAT_WINDOW => vec![Msg::PanelClicked],
        SEND_BUTTON => vec![Msg::SendRequested, Msg::PanelClicked],
        FILE_BUTTON => vec![Msg::FileButtonClicked, Msg::PanelClicked],
        other if PANEL_CHILDREN.contains(&other) => vec![Msg::PanelClicked],
        _ => Vec::new(),
    }
}

fn typed(text: String) -> Vec<UiEvent> {
    vec![
        UiEvent::InputText(text),
        UiEvent::KeyDown {
            target: Some(CHAT_INPUT.to_string()),
            key: "Enter".to_string(),
        },
    ]
}

fn click(target: &str) -> UiEvent {
    UiEvent::Click {
        target: target.to_string(),
    }
}

fn to_paths(args: &[&str]) -> Vec<PathBuf> {
    args.iter().map(|arg| PathBuf::from(*arg)).collect()
}

fn files_chosen(paths: &[PathBuf], origin: FileOrigin) -> Msg {
    Msg::FilesChosen {
        files: paths.iter().map(|path| PickedFile::from_path(path.clone())).collect(),
        origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_typed_then_submitted() {
        let events = parse_line("Do you ship abroad?\n");
        assert_eq!(
            events,
            vec![
                UiEvent::InputText("Do you ship abroad?".to_string()),
                UiEvent::KeyDown {
                    target: Some(CHAT_INPUT.to_string()),
                    key: "Enter".to_string()
                },
            ]
        );
    }

    #[test]
    fn double_colon_escapes_commands() {
        let events = parse_line("::open");
        assert_eq!(events[0], UiEvent::InputText(":open".to_string()));
    }

    #[test]
    fn commands_map_to_clicks_and_files() {
        assert_eq!(parse_line(":min"), vec![click(MINIMIZE_CHAT)]);
        assert_eq!(parse_line(":click chat-messages"), vec![click(CHAT_MESSAGES)]);
        assert_eq!(
            parse_line(":drop a.pdf b.pdf"),
            vec![UiEvent::FilesDropped(vec![
                PathBuf::from("a.pdf"),
                PathBuf::from("b.pdf")
            ])]
        );
        assert_eq!(parse_line(":pick"), vec![UiEvent::Help]);
        assert_eq!(parse_line("   "), Vec::<UiEvent>::new());
    }

    #[test]
    fn close_and_minimize_do_not_bubble_to_panel() {
        assert_eq!(
            route(&click(CLOSE_CHAT), PanelState::Minimized),
            vec![Msg::CloseClicked]
        );
        assert_eq!(
            route(&click(MINIMIZE_CHAT), PanelState::Minimized),
            vec![Msg::MinimizeClicked]
        );
    }

    #[test]
    fn clicks_inside_panel_bubble() {
        assert_eq!(
            route(&click(CHAT_MESSAGES), PanelState::Minimized),
            vec![Msg::PanelClicked]
        );
        assert_eq!(
            route(&click(SEND_BUTTON), PanelState::Open),
            vec![Msg::SendRequested, Msg::PanelClicked]
        );
        assert_eq!(
            route(&click(FILE_BUTTON), PanelState::Open),
            vec![Msg::FileButtonClicked, Msg::PanelClicked]
        );
    }

    #[test]
    fn hidden_panel_only_reacts_to_launcher_and_escape() {
        let hidden = PanelState::Hidden;
        assert_eq!(route(&click(CHAT_BUTTON), hidden), vec![Msg::LauncherClicked]);
        assert!(route(&click(SEND_BUTTON), hidden).is_empty());
        assert!(route(&UiEvent::InputText("hi".to_string()), hidden).is_empty());
        assert!(route(&UiEvent::FilesDropped(vec![PathBuf::from("a")]), hidden).is_empty());
        assert_eq!(
            route(
                &UiEvent::KeyDown {
                    target: None,
                    key: "Escape".to_string()
                },
                hidden
            ),
            vec![Msg::EscapePressed]
        );
    }

    #[test]
    fn enter_submits_only_from_a_visible_input() {
        let enter = |target: Option<&str>| UiEvent::KeyDown {
            target: target.map(str::to_string),
            key: "Enter".to_string(),
        };
        assert_eq!(
            route(&enter(Some(CHAT_INPUT)), PanelState::Open),
            vec![Msg::SendRequested]
        );
        assert_eq!(
            route(&enter(Some(CHAT_INPUT)), PanelState::Minimized),
            vec![Msg::SendRequested]
        );
        assert!(route(&enter(Some(CHAT_INPUT)), PanelState::Hidden).is_empty());
        assert!(route(&enter(Some(SEND_BUTTON)), PanelState::Open).is_empty());
        assert!(route(&enter(None), PanelState::Open).is_empty());
        assert_eq!(parse_line(":key Enter"), vec![enter(Some(CHAT_INPUT))]);
    }

    #[test]
    fn launcher_is_not_clickable_while_open() {
        assert!(route(&click(CHAT_BUTTON), PanelState::Open).is_empty());
    }

    #[test]
    fn picked_files_keep_their_names() {
        let msgs = route(
            &UiEvent::FilesPicked(vec![PathBuf::from("/docs/faq.pdf")]),
            PanelState::Open,
        );
        assert_eq!(
            msgs,
            vec![Msg::FilesChosen {
                files: vec![PickedFile {
                    name: "faq.pdf".to_string(),
                    path: PathBuf::from("/docs/faq.pdf"),
                }],
                origin: FileOrigin::Picker,
            }]
        );
    }
}
