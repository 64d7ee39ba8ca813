//! ithappens - a terminal reader for short stories.
//!
//! Loads a JSON feed of numbered stories once and shows them one at a time.
//! Arrow keys move between stories (wrapping at either end) and `/` jumps to
//! a story by number.
//!
//! # Headless Mode
//!
//! For scripting and testing, run with `--headless`:
//! ```bash
//! ithappens --headless --url ./stories.json
//! ```

mod app;
mod config;
mod events;
mod headless;
mod logging;
mod ui;

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use ithappens_core::{source_for, StoryCatalog, StoryProvider};

use crate::app::App;
use crate::config::Cli;
use crate::events::{handle_event, EventResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.headless)?;

    tracing::info!(url = %cli.url, timeout_secs = cli.timeout_secs, "starting reader");

    let catalog = StoryCatalog::new(source_for(&cli.url)?);
    let mut app = App::new(catalog, cli.url.clone(), cli.timeout()).with_start(cli.start);

    if cli.headless {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        headless::run_headless(&mut app, stdin.lock(), &mut stdout).await?;
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

/// Main application loop
async fn run_app<B: Backend, P: StoryProvider>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
) -> io::Result<()> {
    loop {
        // Show the loading screen before blocking on the feed
        if app.pending_load {
            app.begin_load();
            terminal.draw(|f| ui::render::render(f, app))?;
            app.load().await;
        }

        terminal.draw(|f| ui::render::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            match handle_event(app, event) {
                EventResult::Quit => {
                    app.should_quit = true;
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
