//! Circular navigation over story identifiers.
//!
//! Every function takes the candidate identifiers explicitly and works on a
//! normalized copy (deduplicated, ascending), so callers may pass unsorted
//! lists with repeats. The caller's slice is never modified and nothing is
//! cached between calls.
//!
//! Absence is not an error here: `None` / `false` simply means the question
//! does not apply (no identifiers, or `current` is not one of them).

use crate::story::StoryId;

/// Deduplicated, ascending copy of `ids`.
fn normalized(ids: &[StoryId]) -> Vec<StoryId> {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

/// The identifier after `current`, wrapping from the maximum to the minimum.
///
/// Returns `None` if `ids` is empty or does not contain `current`.
pub fn next_id(current: StoryId, ids: &[StoryId]) -> Option<StoryId> {
    let sorted = normalized(ids);
    let index = sorted.binary_search(&current).ok()?;
    sorted.get(index + 1).or_else(|| sorted.first()).copied()
}

/// The identifier before `current`, wrapping from the minimum to the maximum.
///
/// Returns `None` if `ids` is empty or does not contain `current`.
pub fn prev_id(current: StoryId, ids: &[StoryId]) -> Option<StoryId> {
    let sorted = normalized(ids);
    let index = sorted.binary_search(&current).ok()?;
    match index.checked_sub(1) {
        Some(before) => sorted.get(before).copied(),
        None => sorted.last().copied(),
    }
}

/// Whether [`next_id`] has an answer. Always true for a member of a non-empty list.
pub fn can_go_next(current: StoryId, ids: &[StoryId]) -> bool {
    next_id(current, ids).is_some()
}

/// Whether [`prev_id`] has an answer. Always true for a member of a non-empty list.
pub fn can_go_prev(current: StoryId, ids: &[StoryId]) -> bool {
    prev_id(current, ids).is_some()
}

/// Resolve `target` to an existing identifier.
///
/// An exact match wins. Otherwise the smallest identifier above `target` is
/// returned, falling back to the maximum when `target` is above every
/// identifier. This never wraps to the minimum.
pub fn closest_id(target: StoryId, ids: &[StoryId]) -> Option<StoryId> {
    let sorted = normalized(ids);
    match sorted.binary_search(&target) {
        Ok(_) => Some(target),
        Err(insert_at) => sorted.get(insert_at).or_else(|| sorted.last()).copied(),
    }
}

/// Smallest identifier, if any.
pub fn first_id(ids: &[StoryId]) -> Option<StoryId> {
    ids.iter().min().copied()
}

/// Largest identifier, if any.
pub fn last_id(ids: &[StoryId]) -> Option<StoryId> {
    ids.iter().max().copied()
}

/// 1-based position of `current` in the normalized list, with the list length.
pub fn position(current: StoryId, ids: &[StoryId]) -> Option<(usize, usize)> {
    let sorted = normalized(ids);
    let index = sorted.binary_search(&current).ok()?;
    Some((index + 1, sorted.len()))
}
