//! Render orchestration for the reader

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use ithappens_core::{RemedyAction, StoryProvider};

use crate::app::{App, JumpPrompt, LoadState};
use crate::ui::layout::{centered_rect_fixed, ReaderLayout};
use crate::ui::widgets::{
    ErrorPanelWidget, HotkeyBarWidget, JumpPromptWidget, LoadingWidget, StatusBarWidget,
    StoryWidget,
};

/// Overlay types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Jump(JumpPrompt),
}

/// Main render function
pub fn render<P: StoryProvider>(frame: &mut Frame, app: &App<P>) {
    let area = frame.area();
    let layout = ReaderLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_body(frame, app, layout.story_area);

    let status = StatusBarWidget::new(app.load_state(), &app.theme)
        .position(app.position())
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    render_hotkey_bar(frame, app, layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

fn render_title_bar<P: StoryProvider>(frame: &mut Frame, app: &App<P>, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" ithappens ", app.theme.title_style()),
        Span::styled(format!("| {} ", app.location()), app.theme.system_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_body<P: StoryProvider>(frame: &mut Frame, app: &App<P>, area: Rect) {
    match app.load_state() {
        LoadState::Loading => {
            frame.render_widget(LoadingWidget::new(app.location(), &app.theme), area);
        }
        LoadState::Failed(report) => {
            let widget = ErrorPanelWidget::new(report, &app.theme).failed_at(app.failed_at());
            frame.render_widget(widget, area);
        }
        LoadState::Ready => match (app.current_id(), app.current_story()) {
            (Some(id), Some(text)) => {
                let widget = StoryWidget::new(id, text, &app.theme)
                    .position(app.position())
                    .scroll(app.story_scroll);
                frame.render_widget(widget, area);
            }
            _ => render_empty(frame, app, area),
        },
    }
}

/// A feed that loaded but holds no stories
fn render_empty<P: StoryProvider>(frame: &mut Frame, app: &App<P>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "No stories available",
        app.theme.system_style(),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

fn render_hotkey_bar<P: StoryProvider>(frame: &mut Frame, app: &App<P>, area: Rect) {
    let bar = match app.overlay() {
        Some(Overlay::Jump(_)) => HotkeyBarWidget::new(&app.theme)
            .hotkey("Enter:go", true)
            .hotkey("Esc:cancel", true),
        Some(Overlay::Help) => HotkeyBarWidget::new(&app.theme).hotkey("Esc:close", true),
        None => {
            let can_reload = match app.load_state() {
                LoadState::Loading => false,
                LoadState::Ready => true,
                LoadState::Failed(report) => {
                    report.retryable || report.offers(RemedyAction::Reload)
                }
            };
            HotkeyBarWidget::new(&app.theme)
                .hotkey("←:prev", app.can_go_prev())
                .hotkey("→:next", app.can_go_next())
                .hotkey("/:go to", app.is_ready() && !app.available_ids().is_empty())
                .hotkey("r:reload", can_reload)
                .hotkey("?:help", true)
                .hotkey("q:quit", true)
        }
    };
    frame.render_widget(bar, area);
}

fn render_overlay<P: StoryProvider>(frame: &mut Frame, app: &App<P>, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Jump(prompt) => {
            let popup_area = centered_rect_fixed(44, 5, area);
            frame.render_widget(JumpPromptWidget::new(prompt, &app.theme), popup_area);
        }
    }
}

fn render_help_overlay<P: StoryProvider>(frame: &mut Frame, app: &App<P>, area: Rect) {
    let popup_area = centered_rect_fixed(46, 18, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled("Reading:", heading)),
        Line::from("  →/l/n          Next story"),
        Line::from("  ←/h/p          Previous story"),
        Line::from("  Home/g         First story"),
        Line::from("  End/G          Last story"),
        Line::from("  j/k or ↑/↓     Scroll"),
        Line::from("  PgUp/PgDn      Scroll by page"),
        Line::from(""),
        Line::from(Span::styled("Other:", heading)),
        Line::from("  / or :         Go to a story by number"),
        Line::from("  r              Reload stories"),
        Line::from("  q or Ctrl+C    Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{catalog_app, ready_app};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw<P: StoryProvider>(app: &App<P>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn test_renders_loading() {
        let app = catalog_app("{}");
        let screen = draw(&app, 60, 12);
        assert!(screen.contains("Loading stories..."));
        assert!(screen.contains("LOADING"));
    }

    #[tokio::test]
    async fn test_renders_current_story() {
        let app = ready_app().await;
        let screen = draw(&app, 60, 14);
        assert!(screen.contains("Story #1 (1/5)"));
        assert!(screen.contains("First story."));
        assert!(screen.contains("It has two paragraphs."));
        assert!(screen.contains("1 of 5"));
    }

    #[tokio::test]
    async fn test_renders_failure_panel() {
        let mut app = catalog_app("not json");
        app.load().await;
        let screen = draw(&app, 90, 16);
        assert!(screen.contains("Could not load stories"));
        assert!(screen.contains("The story data could not be processed."));
        assert!(screen.contains("Reload"));
        assert!(screen.contains("ERROR"));
        let failed_at = app.failed_at().unwrap().format("%H:%M:%S").to_string();
        assert!(screen.contains(&format!("Failed at {failed_at}")));
    }

    #[tokio::test]
    async fn test_empty_object_shows_failure() {
        let mut app = catalog_app("{}");
        app.load().await;
        // An empty object is rejected as bad data, so this is the failure panel
        let screen = draw(&app, 90, 16);
        assert!(screen.contains("Could not load stories"));
    }

    #[tokio::test]
    async fn test_renders_jump_prompt_error() {
        let mut app = ready_app().await;
        app.open_jump();
        app.edit_jump(|p| p.type_char('x'));
        let screen = draw(&app, 60, 14);
        assert!(screen.contains("Go to story"));
        assert!(screen.contains("ID must be a number"));
        assert!(screen.contains("Enter:go"));
    }

    #[test]
    fn test_renders_help() {
        let mut app = catalog_app("{}");
        app.toggle_help();
        let screen = draw(&app, 60, 24);
        assert!(screen.contains("Go to a story by number"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let mut app = catalog_app("{}");
        app.toggle_help();
        // Must not panic when overlays are larger than the screen
        let _ = draw(&app, 10, 4);
    }
}
