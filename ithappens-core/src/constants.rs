//! Defaults shared by the catalog and the reader.

use std::time::Duration;

/// How long a catalog load may take before it is abandoned.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect timeout for the HTTP source. The overall deadline is enforced by the catalog.
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the reader looks for stories when nothing is configured.
pub const DEFAULT_STORIES_URL: &str = "http://localhost:8080/stories.json";
