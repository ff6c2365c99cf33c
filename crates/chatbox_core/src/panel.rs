/// Visibility of the chat panel.
///
/// The launcher button is shown only while the panel is `Hidden`. There is no
/// way to go from `Hidden` straight to `Minimized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Open,
    Minimized,
}

impl PanelState {
    pub fn launcher_clicked(self) -> Self {
        PanelState::Open
    }

    pub fn close_clicked(self) -> Self {
        PanelState::Hidden
    }

    pub fn escape_pressed(self) -> Self {
        PanelState::Hidden
    }

    /// Toggles between open and minimized; ignored while hidden.
    pub fn minimize_clicked(self) -> Self {
        match self {
            PanelState::Hidden => PanelState::Hidden,
            PanelState::Open => PanelState::Minimized,
            PanelState::Minimized => PanelState::Open,
        }
    }

    /// A click on the panel body outside the close/minimize controls.
    pub fn body_clicked(self) -> Self {
        match self {
            PanelState::Minimized => PanelState::Open,
            other => other,
        }
    }

    pub fn is_visible(self) -> bool {
        self != PanelState::Hidden
    }

    pub fn launcher_visible(self) -> bool {
        self == PanelState::Hidden
    }

    pub fn minimized_label_visible(self) -> bool {
        self == PanelState::Minimized
    }
}
