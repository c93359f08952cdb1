use ratatui::style::{Color, Modifier, Style};

/// Colors used to draw the dialog
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,
    pub background: Color,
    pub background_alt: Color,
    pub border: Color,
    pub backdrop: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(147, 51, 234),      // Purple
            text: Color::Rgb(248, 250, 252),        // Slate-50
            text_dim: Color::Rgb(148, 163, 184),    // Slate-400
            text_bright: Color::Rgb(255, 255, 255), // White
            background: Color::Rgb(15, 23, 42),     // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800
            border: Color::Rgb(71, 85, 105),        // Slate-600
            backdrop: Color::Rgb(2, 6, 23),         // Slate-950
        }
    }

    /// Dimmed page behind the dialog
    pub fn backdrop_style(&self) -> Style {
        Style::default().bg(self.backdrop)
    }

    /// Dialog box and body text
    pub fn dialog_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.primary)
                .fg(self.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.background_alt).fg(self.text)
        }
    }

    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::DIM)
    }
}
