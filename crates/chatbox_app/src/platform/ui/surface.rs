use std::io::{self, Write};

use chatbox_core::{Effect, PanelState, WidgetViewModel};
use chatbox_logging::{chatbox_debug, chatbox_trace};

use super::gesture::HELP;
use super::render::{panel_label, render_html, render_message_lines};

/// Console stand-in for the page: prints what changed since the last render.
pub struct ConsoleSurface<W: Write> {
    out: W,
    rendered_messages: usize,
    panel: PanelState,
    typing: bool,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rendered_messages: 0,
            panel: PanelState::default(),
            typing: false,
        }
    }

    pub fn render(&mut self, view: &WidgetViewModel) -> io::Result<()> {
        if view.panel != self.panel {
            self.panel = view.panel;
            writeln!(self.out, "[{}]", panel_label(view.panel))?;
        }

        // The transcript only grows.
        for message in view.messages.iter().skip(self.rendered_messages) {
            for line in render_message_lines(message) {
                writeln!(self.out, "{line}")?;
            }
        }
        self.rendered_messages = view.messages.len();

        if view.typing && !self.typing {
            writeln!(self.out, "bot is typing...")?;
        }
        self.typing = view.typing;
        self.out.flush()
    }

    /// Applies an effect aimed at the page rather than the backend.
    pub fn apply(&mut self, effect: &Effect) -> io::Result<()> {
        match effect {
            Effect::ScrollToBottom(behavior) => {
                chatbox_trace!("scroll {:?} to message {}", behavior, self.rendered_messages);
            }
            Effect::FocusInput => chatbox_trace!("input focused"),
            Effect::OpenFilePicker => {
                writeln!(self.out, "[choose a file with :pick <path>]")?;
            }
            Effect::ClearFilePicker => chatbox_debug!("file picker selection cleared"),
            Effect::Ask { .. } | Effect::Upload { .. } => {}
        }
        self.out.flush()
    }

    pub fn print_markup(&mut self, view: &WidgetViewModel) -> io::Result<()> {
        self.out.write_all(render_html(view).as_bytes())?;
        self.out.flush()
    }

    pub fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        self.out.flush()
    }

    pub fn print_notice(&mut self, notice: &str) -> io::Result<()> {
        writeln!(self.out, "[{notice}]")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}
