//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::LoadState;
use crate::ui::theme::ReaderTheme;

/// Status bar showing load state, position and the last message
pub struct StatusBarWidget<'a> {
    load_state: &'a LoadState,
    position: Option<(usize, usize)>,
    theme: &'a ReaderTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(load_state: &'a LoadState, theme: &'a ReaderTheme) -> Self {
        Self {
            load_state,
            position: None,
            theme,
            message: None,
        }
    }

    pub fn position(mut self, position: Option<(usize, usize)>) -> Self {
        self.position = position;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (state_text, state_style) = match self.load_state {
            LoadState::Loading => (
                "LOADING",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            LoadState::Ready => (
                "READY",
                self.theme.success_style().add_modifier(Modifier::BOLD),
            ),
            LoadState::Failed(_) => (
                "ERROR",
                self.theme.error_style().add_modifier(Modifier::BOLD),
            ),
        };

        let mut spans = vec![Span::styled(format!("-- {state_text} --"), state_style)];

        if let Some((index, total)) = self.position {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{index} of {total}"),
                Style::default().fg(self.theme.foreground),
            ));
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar; hints for unavailable actions are dimmed
pub struct HotkeyBarWidget<'a> {
    hotkeys: Vec<(&'static str, bool)>,
    theme: &'a ReaderTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(theme: &'a ReaderTheme) -> Self {
        Self {
            hotkeys: Vec::new(),
            theme,
        }
    }

    pub fn hotkey(mut self, label: &'static str, enabled: bool) -> Self {
        self.hotkeys.push((label, enabled));
        self
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, (label, enabled)) in self.hotkeys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*label, self.theme.hotkey_style(*enabled)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
