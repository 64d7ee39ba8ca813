//! Load errors and the reports the reader shows for them.
//!
//! Only the catalog's load path produces these. Each variant maps, through
//! [`LoadError::report`], to a user-facing message, a retryable flag and a
//! list of suggested remedies.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while loading the story catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    #[error("Failed to parse stories: {message}")]
    Parse { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unexpected error: {message}")]
    Unknown { message: String },
}

impl LoadError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status for `resource`.
    ///
    /// 404 means the feed is not there; every other status is a network failure.
    pub fn from_status(status: u16, reason: Option<&str>, resource: &str) -> Self {
        if status == 404 {
            return Self::NotFound {
                resource: resource.to_string(),
            };
        }

        let message = match reason {
            Some(reason) => format!("Failed to load stories: {status} {reason}"),
            None => format!("Failed to load stories: {status}"),
        };
        Self::Network {
            message,
            status: Some(status),
        }
    }

    /// The kind of failure, without its details.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network { .. } => ErrorKind::Network,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Whether trying the same load again may succeed.
    ///
    /// Bad data and missing resources stay bad until something changes upstream.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Timeout | ErrorKind::Network | ErrorKind::Unknown
        )
    }

    /// Build the report the presentation layer renders for this error.
    pub fn report(&self) -> ErrorReport {
        let (user_message, solutions) = match self {
            Self::Timeout { timeout } => (
                format!(
                    "The request timed out ({}s). Please try again.",
                    timeout.as_secs_f64()
                ),
                vec![
                    Solution::new(
                        "Check your connection speed",
                        "A slow connection can cause timeouts",
                    ),
                    Solution::new("Try again", "The server may have been briefly overloaded")
                        .with_action(RemedyAction::Retry),
                ],
            ),
            Self::Network { status, .. } => {
                let user_message = match status {
                    Some(code) => {
                        format!("Network error ({code}). Check your internet connection.")
                    }
                    None => "Network error. Check your internet connection.".to_string(),
                };
                let mut solutions = vec![
                    Solution::new(
                        "Check your internet connection",
                        "Make sure this device is online",
                    ),
                    Solution::new("Try again", "This may be a temporary problem")
                        .with_action(RemedyAction::Retry),
                ];
                if status.is_some_and(|code| code >= 500) {
                    solutions.push(Solution::new(
                        "Server problem",
                        "The server is temporarily unavailable. Try again later.",
                    ));
                }
                (user_message, solutions)
            }
            Self::Parse { .. } => (
                "The story data could not be processed. Try reloading.".to_string(),
                vec![
                    Solution::new("Reload", "The data may have been damaged in transit")
                        .with_action(RemedyAction::Reload),
                    Solution::new("Clear the cache", "A cached copy may be corrupted"),
                ],
            ),
            Self::NotFound { .. } => (
                "The requested stories could not be found.".to_string(),
                vec![
                    Solution::new("Check the address", "Make sure the URL is correct"),
                    Solution::new(
                        "Contact the maintainers",
                        "If the problem persists, report it",
                    ),
                ],
            ),
            Self::Unknown { .. } => (
                "An unexpected error occurred.".to_string(),
                vec![
                    Solution::new("Reload", "This may fix a temporary problem")
                        .with_action(RemedyAction::Reload),
                    Solution::new(
                        "Report the problem",
                        "Describe what you were doing when the error happened",
                    ),
                ],
            ),
        };

        ErrorReport {
            kind: self.kind(),
            technical_message: self.to_string(),
            user_message,
            retryable: self.is_retryable(),
            solutions,
        }
    }
}

/// Kind of load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    NotFound,
    Timeout,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Parse => "PARSE",
            Self::NotFound => "NOT_FOUND",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Something the reader can offer as a button or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemedyAction {
    Retry,
    Reload,
}

impl RemedyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retry => "retry",
            Self::Reload => "reload",
        }
    }
}

/// A suggested way out of a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub title: &'static str,
    pub description: &'static str,
    pub action: Option<RemedyAction>,
}

impl Solution {
    fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            action: None,
        }
    }

    fn with_action(mut self, action: RemedyAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Everything the presentation layer needs to render a load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    /// Diagnostic text, not meant for readers.
    pub technical_message: String,
    pub user_message: String,
    pub retryable: bool,
    pub solutions: Vec<Solution>,
}

impl ErrorReport {
    /// Actions attached to the solutions, in order.
    pub fn actions(&self) -> Vec<RemedyAction> {
        self.solutions.iter().filter_map(|s| s.action).collect()
    }

    pub fn offers(&self, action: RemedyAction) -> bool {
        self.solutions.iter().any(|s| s.action == Some(action))
    }
}
