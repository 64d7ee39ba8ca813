//! Layout calculations for the reader

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The main screen areas
pub struct ReaderLayout {
    pub title_area: Rect,
    pub story_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl ReaderLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(5),    // Story
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            story_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
        }
    }
}

/// Create a centered rect with fixed dimensions, clamped to `area`
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
