//! Loading indicator

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::ReaderTheme;

/// Shown while the catalog loads
pub struct LoadingWidget<'a> {
    location: &'a str,
    theme: &'a ReaderTheme,
}

impl<'a> LoadingWidget<'a> {
    pub fn new(location: &'a str, theme: &'a ReaderTheme) -> Self {
        Self { location, theme }
    }
}

impl Widget for LoadingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Loading stories...",
                self.theme.title_style(),
            )),
            Line::from(Span::styled(self.location.to_string(), self.theme.system_style())),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
