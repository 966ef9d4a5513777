use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub prompt: Style,
    pub placeholder: Style,
    pub row_highlight: Style,
    pub highlight: Style,
    pub empty: Style,
    pub error: Style,
    pub toast: Style,
    pub selection: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            placeholder: Style::new().fg(Color::DarkGray),
            row_highlight: Style::new().bg(Color::Indexed(237)),
            highlight: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            empty: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            error: Style::new().fg(Color::Red),
            toast: Style::new().fg(Color::White).bg(Color::Red),
            selection: Style::new().fg(Color::Green),
        }
    }
}

impl Theme {
    #[must_use]
    pub fn prompt_style(&self) -> Style {
        self.prompt
    }

    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        self.placeholder
    }

    #[must_use]
    pub fn row_highlight_style(&self) -> Style {
        self.row_highlight
    }

    #[must_use]
    pub fn highlight_style(&self) -> Style {
        self.highlight
    }

    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }

    #[must_use]
    pub fn toast_style(&self) -> Style {
        self.toast
    }

    #[must_use]
    pub fn selection_style(&self) -> Style {
        self.selection
    }
}
