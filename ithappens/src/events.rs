//! Event handling for the reader

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use ithappens_core::StoryProvider;

use crate::app::App;
use crate::ui::Overlay;

/// Lines moved by PgUp/PgDn
const PAGE_LINES: usize = 10;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

impl EventResult {
    fn redraw_if(changed: bool) -> Self {
        if changed {
            Self::NeedsRedraw
        } else {
            Self::Continue
        }
    }
}

/// Handle a terminal event
pub fn handle_event<P: StoryProvider>(app: &mut App<P>, event: Event) -> EventResult {
    match event {
        // Ignore release/repeat reports from terminals that send them
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event<P: StoryProvider>(app: &mut App<P>, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event<P: StoryProvider>(app: &mut App<P>, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.overlay() {
        Some(Overlay::Jump(_)) => handle_jump_key(app, key),
        Some(Overlay::Help) => handle_help_key(app, key),
        None => handle_reader_key(app, key),
    }
}

/// Keys while reading
fn handle_reader_key<P: StoryProvider>(app: &mut App<P>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('r') => {
            app.request_reload();
            EventResult::NeedsRedraw
        }

        // Story navigation
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            EventResult::redraw_if(app.go_next())
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            EventResult::redraw_if(app.go_prev())
        }
        KeyCode::Home | KeyCode::Char('g') => EventResult::redraw_if(app.go_first()),
        KeyCode::End | KeyCode::Char('G') => EventResult::redraw_if(app.go_last()),
        KeyCode::Char('/') | KeyCode::Char(':') => {
            app.open_jump();
            EventResult::NeedsRedraw
        }

        // Scrolling
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            app.scroll_down(PAGE_LINES);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_LINES);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Keys while the jump prompt is open
fn handle_jump_key<P: StoryProvider>(app: &mut App<P>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => {
            app.submit_jump();
        }
        KeyCode::Backspace => app.edit_jump(|p| p.backspace()),
        KeyCode::Delete => app.edit_jump(|p| p.delete()),
        KeyCode::Left => app.edit_jump(|p| p.cursor_left()),
        KeyCode::Right => app.edit_jump(|p| p.cursor_right()),
        KeyCode::Home => app.edit_jump(|p| p.cursor_home()),
        KeyCode::End => app.edit_jump(|p| p.cursor_end()),
        KeyCode::Char(c) => app.edit_jump(|p| p.type_char(c)),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Keys while help is shown
fn handle_help_key<P: StoryProvider>(app: &mut App<P>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
