//! Story display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use ithappens_core::{paragraphs, StoryId};

use crate::ui::theme::ReaderTheme;

/// Widget for displaying one story, paragraph by paragraph
pub struct StoryWidget<'a> {
    id: StoryId,
    text: &'a str,
    position: Option<(usize, usize)>,
    scroll: usize,
    theme: &'a ReaderTheme,
}

impl<'a> StoryWidget<'a> {
    pub fn new(id: StoryId, text: &'a str, theme: &'a ReaderTheme) -> Self {
        Self {
            id,
            text,
            position: None,
            scroll: 0,
            theme,
        }
    }

    pub fn position(mut self, position: Option<(usize, usize)>) -> Self {
        self.position = position;
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for StoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.position {
            Some((index, total)) => format!(" Story #{} ({index}/{total}) ", self.id),
            None => format!(" Story #{} ", self.id),
        };

        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        // Leave a column for the scrollbar
        let text_width = inner.width.saturating_sub(1).max(1) as usize;
        let lines = layout_paragraphs(self.text, text_width);

        let lines: Vec<Line> = if lines.is_empty() {
            vec![Line::from(Span::styled(
                "(this story is empty)",
                self.theme.system_style(),
            ))]
        } else {
            lines
                .into_iter()
                .map(|line| Line::from(Span::styled(line, self.theme.story_style())))
                .collect()
        };

        // Calculate scroll position
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(text_area, buf);

        if total_lines > visible_height && visible_height > 0 {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            if scroll < max_scroll {
                let hint = format!(" ↓{} more ", max_scroll - scroll);
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}

/// Word-wrap every paragraph to `width` columns, with a blank line between paragraphs
pub fn layout_paragraphs(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, paragraph) in paragraphs(text).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        for source_line in paragraph.lines() {
            wrap_line(source_line, width, &mut lines);
        }
    }
    lines
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        // Hard-split words longer than the line
        for ch in word.chars() {
            if current_len == width {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(ch);
            current_len += 1;
        }
    }

    out.push(current);
}
