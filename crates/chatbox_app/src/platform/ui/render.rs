use std::fmt::Write;

use chatbox_core::{Citation, MessageView, PanelState, Sender, WidgetViewModel};

use super::constants::*;

/// Renders the whole widget as the markup the page stylesheet expects.
pub fn render_html(view: &WidgetViewModel) -> String {
    let mut out = String::new();
    let launcher_display = if view.launcher_visible { "block" } else { "none" };
    let window_display = if view.panel.is_visible() { "block" } else { "none" };
    let window_class = if view.panel == PanelState::Minimized {
        "chat-window minimized"
    } else {
        "chat-window"
    };
    let label_class = if view.minimized_label_visible {
        MINIMIZED_LABEL_CLASS.to_string()
    } else {
        format!("{MINIMIZED_LABEL_CLASS} hidden")
    };

    let _ = writeln!(
        out,
        r#"<button id="{CHAT_BUTTON}" style="display: {launcher_display}">💬</button>"#
    );
    let _ = writeln!(
        out,
        r#"<div id="{CHAT_WINDOW}" class="{window_class}" style="display: {window_display}">"#
    );
    let _ = writeln!(
        out,
        r#"  <div class="chat-header"><span>Chat</span><button id="{MINIMIZE_CHAT}">–</button><button id="{CLOSE_CHAT}">×</button></div>"#
    );
    let _ = writeln!(
        out,
        r#"  <div class="{label_class}">Chat minimized, click to restore</div>"#
    );
    let _ = writeln!(out, r#"  <div id="{CHAT_MESSAGES}">"#);
    for message in &view.messages {
        let _ = writeln!(out, "    {}", render_message_html(message));
    }
    if view.typing {
        let _ = writeln!(
            out,
            r#"    <div class="typing" id="{TYPING_INDICATOR}"><span></span><span></span><span></span></div>"#
        );
    }
    let _ = writeln!(out, "  </div>");
    let disabled = if view.send_enabled { "" } else { " disabled" };
    let _ = writeln!(
        out,
        r#"  <div class="chat-input"><input id="{CHAT_INPUT}" type="text" value="{}"><button id="{FILE_BUTTON}">📎</button><input id="{FILE_INPUT}" type="file" hidden><button id="{SEND_BUTTON}"{disabled}>Send</button></div>"#,
        escape_html(&view.input)
    );
    let _ = writeln!(out, "</div>");
    out
}

pub fn render_message_html(message: &MessageView) -> String {
    let mut out = format!(
        r#"<div class="message {}"><div class="text">{}</div>"#,
        message.sender.as_str(),
        escape_html(&message.text)
    );
    if !message.citations.is_empty() {
        out.push_str(r#"<div class="sources"><strong>Sources:</strong><br>"#);
        for citation in &message.citations {
            out.push_str("- ");
            out.push_str(&render_citation_html(citation));
            out.push_str("<br>");
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

fn render_citation_html(citation: &Citation) -> String {
    match citation {
        Citation::Link { url, chunk } => {
            let url = escape_html(url);
            format!(r#"<a href="{url}" target="_blank">{url}</a> (chunk {chunk})"#)
        }
        Citation::Plain { .. } | Citation::Label(_) => escape_html(&citation.to_string()),
    }
}

/// Console lines for one transcript entry.
pub fn render_message_lines(message: &MessageView) -> Vec<String> {
    let speaker = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    let mut lines: Vec<String> = message
        .text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{speaker}> {line}")
            } else {
                format!("     {line}")
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(format!("{speaker}>"));
    }
    if !message.citations.is_empty() {
        lines.push("     Sources:".to_string());
        lines.extend(
            message
                .citations
                .iter()
                .map(|citation| format!("     - {citation}")),
        );
    }
    lines
}

pub fn panel_label(panel: PanelState) -> &'static str {
    match panel {
        PanelState::Hidden => "chat closed (:open to start)",
        PanelState::Open => "chat open",
        PanelState::Minimized => "chat minimized (click the panel to restore)",
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot_reply(citations: Vec<Citation>) -> MessageView {
        MessageView {
            sender: Sender::Bot,
            text: "A".to_string(),
            citations,
        }
    }

    #[test]
    fn url_sources_render_as_links_with_chunk() {
        let html = render_message_html(&bot_reply(vec![Citation::Link {
            url: "http://x".to_string(),
            chunk: 2,
        }]));
        assert!(html.contains(r#"<a href="http://x" target="_blank">http://x</a> (chunk 2)"#));
        assert!(html.contains("<strong>Sources:</strong>"));
    }

    #[test]
    fn plain_sources_are_not_links() {
        let html = render_message_html(&bot_reply(vec![Citation::Plain {
            source: "policy.pdf".to_string(),
            chunk: 4,
        }]));
        assert!(html.contains("- policy.pdf (chunk 4)<br>"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn message_without_sources_has_no_block() {
        let html = render_message_html(&bot_reply(Vec::new()));
        assert_eq!(html, r#"<div class="message bot"><div class="text">A</div></div>"#);
    }

    #[test]
    fn text_and_labels_are_escaped() {
        let message = MessageView {
            sender: Sender::User,
            text: "<script>alert('x')</script>".to_string(),
            citations: vec![Citation::Label("a & b".to_string())],
        };
        let html = render_message_html(&message);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("- a &amp; b<br>"));
        assert!(html.starts_with(r#"<div class="message user">"#));
    }

    #[test]
    fn widget_markup_tracks_panel_and_typing() {
        let hidden = render_html(&WidgetViewModel {
            launcher_visible: true,
            send_enabled: true,
            ..WidgetViewModel::default()
        });
        assert!(hidden.contains(r#"<button id="chat-button" style="display: block">"#));
        assert!(hidden.contains(r#"class="chat-window" style="display: none""#));
        assert!(hidden.contains(r#"class="minimized-label hidden""#));
        assert!(!hidden.contains("typing-indicator"));

        let busy = render_html(&WidgetViewModel {
            panel: PanelState::Minimized,
            minimized_label_visible: true,
            typing: true,
            send_enabled: false,
            ..WidgetViewModel::default()
        });
        assert!(busy.contains(r#"class="chat-window minimized" style="display: block""#));
        assert!(busy.contains(r#"<div class="minimized-label">"#));
        assert!(busy.contains(r#"id="typing-indicator""#));
        assert!(busy.contains(r#"<button id="send-button" disabled>"#));
    }

    #[test]
    fn console_lines_list_citations() {
        let lines = render_message_lines(&bot_reply(vec![
            Citation::Link {
                url: "https://x.example".to_string(),
                chunk: 1,
            },
            Citation::Label("faq".to_string()),
        ]));
        assert_eq!(
            lines,
            vec![
                "bot> A".to_string(),
                "     Sources:".to_string(),
                "     - https://x.example (chunk 1)".to_string(),
                "     - faq".to_string(),
            ]
        );
    }
}
