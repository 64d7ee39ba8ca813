//! The capability the reader needs from a story catalog.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::story::StoryId;

/// Load-once story lookups with circular navigation.
///
/// [`crate::StoryCatalog`] is the real implementation; tests can provide
/// their own without touching the network.
#[async_trait]
pub trait StoryProvider: Send {
    /// Replace the current stories with the feed at `location`.
    ///
    /// On failure the provider must be left unloaded and empty.
    async fn load(&mut self, location: &str, timeout: Duration) -> Result<(), LoadError>;

    fn get_by_id(&self, id: StoryId) -> Option<&str>;

    fn get_next_id(&self, id: StoryId) -> Option<StoryId>;

    fn get_prev_id(&self, id: StoryId) -> Option<StoryId>;

    fn get_first_id(&self) -> Option<StoryId>;

    fn get_last_id(&self) -> Option<StoryId>;

    /// Ascending identifiers, owned by the caller. Empty when unloaded.
    fn get_all_ids(&self) -> Vec<StoryId>;

    fn is_loaded(&self) -> bool;
}
