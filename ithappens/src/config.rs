//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use ithappens_core::{StoryId, DEFAULT_LOAD_TIMEOUT, DEFAULT_STORIES_URL};

/// Terminal reader for short stories
#[derive(Parser, Debug, Clone)]
#[command(name = "ithappens")]
#[command(about = "Read short stories one at a time", long_about = None)]
pub struct Cli {
    /// Story feed: an http(s) URL or a path to a JSON file
    #[arg(long, env = "ITHAPPENS_STORIES_URL", default_value = DEFAULT_STORIES_URL)]
    pub url: String,

    /// Seconds to wait for the feed before giving up
    #[arg(
        long,
        env = "ITHAPPENS_TIMEOUT_SECS",
        default_value_t = DEFAULT_LOAD_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Story to open first; the next existing story is used if it is missing
    #[arg(long, value_name = "ID")]
    pub start: Option<StoryId>,

    /// Line-oriented mode on stdin/stdout instead of the TUI
    #[arg(long)]
    pub headless: bool,

    /// Append logs to this file
    #[arg(long, env = "ITHAPPENS_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
