//! Headless mode for the reader.
//!
//! This module provides a simple text-based interface for reading stories
//! without a TUI. It's designed for scripting and automated testing.

use std::io::{self, BufRead, Write};

use ithappens_core::{paragraphs, ErrorReport, StoryProvider};

use crate::app::{App, LoadState};

/// Run the reader in headless mode.
///
/// This provides a simple line-oriented protocol, one command per line:
/// - `next`, `prev`, `first`, `last` move between stories and print the result
/// - `jump <id>` validates the input and jumps
/// - `show`, `ids`, `reload`, `help`, `quit`
///
/// Stories are printed as a `[STORY n]` header, the paragraphs, and `[END]`.
/// Problems are reported on `[ERROR]` lines; nothing here is fatal except I/O.
pub async fn run_headless<P, R, W>(app: &mut App<P>, input: R, output: &mut W) -> io::Result<()>
where
    P: StoryProvider,
    R: BufRead,
    W: Write,
{
    writeln!(output, "=== ithappens headless mode ===")?;
    load_and_report(app, output).await?;
    writeln!(output, "[INFO] Type 'help' for commands")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" | "q" => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            "help" | "?" => print_help(output)?,
            "reload" | "r" => {
                if app.request_reload() {
                    load_and_report(app, output).await?
                } else {
                    writeln!(output, "[ERROR] {}", app.status_message().unwrap_or_default())?
                }
            }
            "show" => print_current(app, output)?,
            "ids" => print_ids(app, output)?,
            "next" | "n" => {
                let moved = app.go_next();
                print_move(app, moved, output)?
            }
            "prev" | "p" => {
                let moved = app.go_prev();
                print_move(app, moved, output)?
            }
            "first" => {
                let moved = app.go_first();
                print_move(app, moved, output)?
            }
            "last" => {
                let moved = app.go_last();
                print_move(app, moved, output)?
            }
            "jump" | "go" => match app.jump_to_input(argument) {
                Ok(_) => print_current(app, output)?,
                Err(e) => writeln!(output, "[ERROR] {e}")?,
            },
            other => writeln!(output, "[ERROR] Unknown command: {other}. Type 'help' for help.")?,
        }
        output.flush()?;
    }

    Ok(())
}

async fn load_and_report<P: StoryProvider, W: Write>(
    app: &mut App<P>,
    output: &mut W,
) -> io::Result<()> {
    app.load().await;

    match app.load_state() {
        LoadState::Ready => {
            writeln!(
                output,
                "[INFO] Loaded {} stories from {}",
                app.available_ids().len(),
                app.location()
            )?;
            print_current(app, output)
        }
        LoadState::Failed(report) => {
            print_failure(report, output)?;
            match app.failed_at() {
                Some(at) => writeln!(output, "[INFO] Failed at {}", at.format("%Y-%m-%d %H:%M:%S")),
                None => Ok(()),
            }
        }
        LoadState::Loading => Ok(()),
    }
}

fn print_move<P: StoryProvider, W: Write>(
    app: &App<P>,
    moved: bool,
    output: &mut W,
) -> io::Result<()> {
    if moved {
        return print_current(app, output);
    }
    match app.failure() {
        Some(report) => print_failure(report, output),
        None => writeln!(output, "[ERROR] No stories available"),
    }
}

fn print_current<P: StoryProvider, W: Write>(app: &App<P>, output: &mut W) -> io::Result<()> {
    let (Some(id), Some(text)) = (app.current_id(), app.current_story()) else {
        return writeln!(output, "[ERROR] No story selected");
    };

    match app.position() {
        Some((index, total)) => writeln!(output, "[STORY {id}] ({index}/{total})")?,
        None => writeln!(output, "[STORY {id}]")?,
    }
    for (i, paragraph) in paragraphs(text).enumerate() {
        if i > 0 {
            writeln!(output)?;
        }
        writeln!(output, "{paragraph}")?;
    }
    writeln!(output, "[END]")
}

fn print_ids<P: StoryProvider, W: Write>(app: &App<P>, output: &mut W) -> io::Result<()> {
    let ids = app.available_ids();
    if ids.is_empty() {
        return writeln!(output, "[ERROR] No stories available");
    }
    let list: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    writeln!(output, "[INFO] {} stories: {}", ids.len(), list.join(", "))
}

fn print_failure<W: Write>(report: &ErrorReport, output: &mut W) -> io::Result<()> {
    writeln!(output, "[ERROR] {}", report.user_message)?;
    writeln!(
        output,
        "[ERROR] {} (retryable: {}): {}",
        report.kind.as_str(),
        report.retryable,
        report.technical_message
    )?;
    for solution in &report.solutions {
        match solution.action {
            Some(action) => writeln!(
                output,
                "  - {}: {} [{}]",
                solution.title,
                solution.description,
                action.as_str()
            )?,
            None => writeln!(output, "  - {}: {}", solution.title, solution.description)?,
        }
    }
    Ok(())
}

fn print_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "[HELP]")?;
    writeln!(output, "  next | prev      - Move to the next/previous story (wraps)")?;
    writeln!(output, "  first | last     - Move to the first/last story")?;
    writeln!(output, "  jump <id>        - Go to a story by number")?;
    writeln!(output, "  show             - Print the current story")?;
    writeln!(output, "  ids              - List story numbers")?;
    writeln!(output, "  reload           - Load the stories again")?;
    writeln!(output, "  quit             - Exit")
}
