//! Story catalog and circular navigation for the ithappens reader.
//!
//! This crate provides:
//! - Pure navigation over sparse, unordered story identifiers (with wraparound)
//! - Validation of free-text "jump to story" input
//! - A story catalog that loads a JSON feed once and answers lookups
//! - A classified load-error taxonomy with user-facing reports
//!
//! # Quick Start
//!
//! ```ignore
//! use ithappens_core::{source_for, StoryCatalog, DEFAULT_LOAD_TIMEOUT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "https://example.com/stories.json";
//!     let mut catalog = StoryCatalog::new(source_for(url)?);
//!     catalog.load(url, DEFAULT_LOAD_TIMEOUT).await?;
//!
//!     if let Some(first) = catalog.get_first_id() {
//!         println!("{}", catalog.get_by_id(first).unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod constants;
pub mod error;
pub mod navigation;
pub mod provider;
pub mod source;
pub mod story;
pub mod validation;

// Primary public API
pub use catalog::StoryCatalog;
pub use constants::{DEFAULT_LOAD_TIMEOUT, DEFAULT_STORIES_URL};
pub use error::{ErrorKind, ErrorReport, LoadError, RemedyAction, Solution};
pub use provider::StoryProvider;
pub use source::{source_for, FileSource, HttpSource, StaticSource, StorySource};
pub use story::{paragraphs, StoryId};
pub use validation::{validate_jump_input, JumpError};
