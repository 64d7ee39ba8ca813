//! Validation of free-text "jump to story" input.

use thiserror::Error;

use crate::story::StoryId;

/// Why a jump target was rejected.
///
/// The display strings are shown to readers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JumpError {
    #[error("ID cannot be empty")]
    Empty,

    #[error("No stories available")]
    NoStories,

    #[error("ID must be positive")]
    NotPositive,

    #[error("ID must be a whole number")]
    NotWholeNumber,

    #[error("ID must be a number")]
    NotANumber,

    /// `id` is the decimal rendering of the requested identifier.
    #[error("Story with ID {id} does not exist")]
    DoesNotExist { id: String },
}

/// Validate user input naming a story to jump to.
///
/// Checks run in a fixed order and the first failure wins:
/// empty input, no stories, leading minus, non-digit input (decimal or
/// otherwise), zero, and finally membership in `ids`. Surrounding whitespace
/// is ignored. Membership is a direct containment check on `ids`.
pub fn validate_jump_input(input: &str, ids: &[StoryId]) -> Result<StoryId, JumpError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(JumpError::Empty);
    }

    if ids.is_empty() {
        return Err(JumpError::NoStories);
    }

    // Negative numbers are reported as such, not as a format problem
    if trimmed.starts_with('-') {
        return Err(JumpError::NotPositive);
    }

    if !is_digits(trimmed) {
        return Err(if is_decimal(trimmed) {
            JumpError::NotWholeNumber
        } else {
            JumpError::NotANumber
        });
    }

    let id = match trimmed.parse::<StoryId>() {
        Ok(0) => return Err(JumpError::NotPositive),
        Ok(id) => id,
        // Too large to be any story's identifier
        Err(_) => {
            return Err(JumpError::DoesNotExist {
                id: trimmed.trim_start_matches('0').to_string(),
            })
        }
    };

    if !ids.contains(&id) {
        return Err(JumpError::DoesNotExist { id: id.to_string() });
    }

    Ok(id)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `digits* "." digits+`, e.g. `3.5` or `.5`.
fn is_decimal(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, fraction)) => whole.bytes().all(|b| b.is_ascii_digit()) && is_digits(fraction),
        None => false,
    }
}
