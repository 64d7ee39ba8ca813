//! Color theme and styling for the reader

use ratatui::style::{Color, Modifier, Style};

/// Reader color theme
#[derive(Debug, Clone)]
pub struct ReaderTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Text colors
    pub story_text: Color,
    pub accent: Color,
    pub system_text: Color,

    // Feedback colors
    pub error: Color,
    pub success: Color,
}

impl Default for ReaderTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            story_text: Color::White,
            accent: Color::Cyan,
            system_text: Color::DarkGray,

            error: Color::LightRed,
            success: Color::Green,
        }
    }
}

impl ReaderTheme {
    /// Get style for story paragraphs
    pub fn story_style(&self) -> Style {
        Style::default().fg(self.story_text)
    }

    /// Get style for titles and the story number
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for hints and secondary text
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for a key hint; disabled hints are dimmed
    pub fn hotkey_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.accent)
        } else {
            self.system_style()
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
