//! Load failure panel

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use ithappens_core::ErrorReport;

use crate::ui::theme::ReaderTheme;

/// Shows the user message and the suggested solutions for a failed load
pub struct ErrorPanelWidget<'a> {
    report: &'a ErrorReport,
    failed_at: Option<DateTime<Local>>,
    theme: &'a ReaderTheme,
}

impl<'a> ErrorPanelWidget<'a> {
    pub fn new(report: &'a ErrorReport, theme: &'a ReaderTheme) -> Self {
        Self {
            report,
            failed_at: None,
            theme,
        }
    }

    pub fn failed_at(mut self, failed_at: Option<DateTime<Local>>) -> Self {
        self.failed_at = failed_at;
        self
    }
}

impl Widget for ErrorPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                " Could not load stories ",
                self.theme.error_style().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.error_style());

        let mut lines = vec![
            Line::from(Span::styled(
                self.report.user_message.clone(),
                self.theme.error_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if !self.report.solutions.is_empty() {
            lines.push(Line::from(Span::styled(
                "What you can do:",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
            for solution in &self.report.solutions {
                let mut spans = vec![
                    Span::raw("  • "),
                    Span::styled(solution.title, self.theme.title_style()),
                    Span::raw(format!(": {}", solution.description)),
                ];
                if solution.action.is_some() {
                    spans.push(Span::styled(" [r]", self.theme.hotkey_style(true)));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "{}: {}",
                self.report.kind.as_str(),
                self.report.technical_message
            ),
            self.theme.system_style(),
        )));
        if let Some(at) = self.failed_at {
            lines.push(Line::from(Span::styled(
                format!("Failed at {}", at.format("%H:%M:%S")),
                self.theme.system_style(),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

