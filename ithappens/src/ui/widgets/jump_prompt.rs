//! "Jump to story" prompt widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::JumpPrompt;
use crate::ui::theme::ReaderTheme;

/// Popup with a single-line input and its live validation message
pub struct JumpPromptWidget<'a> {
    prompt: &'a JumpPrompt,
    theme: &'a ReaderTheme,
}

impl<'a> JumpPromptWidget<'a> {
    pub fn new(prompt: &'a JumpPrompt, theme: &'a ReaderTheme) -> Self {
        Self { prompt, theme }
    }

    fn input_line(&self) -> Line<'a> {
        let content = self.prompt.input();
        if content.is_empty() {
            return Line::from(vec![
                Span::styled("> ", self.theme.title_style()),
                Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                ),
                Span::styled("Story ID", self.theme.system_style()),
            ]);
        }

        // Use character-based slicing for unicode safety
        let cursor = self.prompt.cursor_position();
        let before_cursor: String = content.chars().take(cursor).collect();
        let at_cursor = content
            .chars()
            .nth(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after_cursor: String = content.chars().skip(cursor + 1).collect();

        Line::from(vec![
            Span::styled("> ", self.theme.title_style()),
            Span::raw(before_cursor),
            Span::styled(
                at_cursor,
                Style::default()
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                    .fg(self.theme.accent),
            ),
            Span::raw(after_cursor),
        ])
    }
}

impl Widget for JumpPromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let invalid = self.prompt.error().is_some();
        let block = Block::default()
            .title(" Go to story ")
            .borders(Borders::ALL)
            .border_style(if invalid {
                self.theme.error_style()
            } else {
                self.theme.border_style(true)
            });

        let feedback = match self.prompt.error() {
            Some(error) => Line::from(Span::styled(error.to_string(), self.theme.error_style())),
            None => Line::from(Span::styled(
                "Enter to go, Esc to cancel",
                self.theme.system_style(),
            )),
        };

        let lines = vec![self.input_line(), Line::from(""), feedback];
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
