//! The story catalog: one feed, loaded at once, looked up by identifier.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::DEFAULT_LOAD_TIMEOUT;
use crate::error::LoadError;
use crate::navigation;
use crate::provider::StoryProvider;
use crate::source::StorySource;
use crate::story::StoryId;

/// Stories keyed by identifier, plus their navigation order.
///
/// Every lookup answers `None` (or empty) until a load succeeds. A load
/// replaces everything; a failed load leaves the catalog empty.
pub struct StoryCatalog<S> {
    source: S,
    entries: BTreeMap<StoryId, String>,
    /// Strictly ascending, derived from `entries` at load time.
    ordered_ids: Vec<StoryId>,
    loaded: bool,
}

impl<S: StorySource> StoryCatalog<S> {
    /// Create an empty, unloaded catalog reading from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: BTreeMap::new(),
            ordered_ids: Vec::new(),
            loaded: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the feed at `location`, giving up after `timeout`.
    ///
    /// State is cleared before the fetch starts, so a reader never sees the
    /// previous feed while this one is in flight, and a timed-out or failed
    /// load leaves nothing behind.
    #[tracing::instrument(skip(self), fields(timeout_ms = timeout.as_millis() as u64))]
    pub async fn load(&mut self, location: &str, timeout: Duration) -> Result<(), LoadError> {
        self.reset();

        match self.fetch_entries(location, timeout).await {
            Ok(entries) => {
                self.ordered_ids = entries.keys().copied().collect();
                self.entries = entries;
                self.loaded = true;
                tracing::info!(count = self.ordered_ids.len(), "stories loaded");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(kind = error.kind().as_str(), %error, "story load failed");
                Err(error)
            }
        }
    }

    /// [`load`](Self::load) with [`DEFAULT_LOAD_TIMEOUT`].
    pub async fn load_default(&mut self, location: &str) -> Result<(), LoadError> {
        self.load(location, DEFAULT_LOAD_TIMEOUT).await
    }

    async fn fetch_entries(
        &self,
        location: &str,
        timeout: Duration,
    ) -> Result<BTreeMap<StoryId, String>, LoadError> {
        // Dropping the fetch future on expiry cancels the request
        let body = tokio::time::timeout(timeout, self.source.fetch(location))
            .await
            .map_err(|_| LoadError::Timeout { timeout })??;
        parse_stories(&body)
    }

    fn reset(&mut self) {
        self.loaded = false;
        self.entries.clear();
        self.ordered_ids.clear();
    }

    pub fn get_by_id(&self, id: StoryId) -> Option<&str> {
        if !self.loaded {
            return None;
        }
        self.entries.get(&id).map(String::as_str)
    }

    pub fn get_next_id(&self, id: StoryId) -> Option<StoryId> {
        if !self.loaded {
            return None;
        }
        navigation::next_id(id, &self.ordered_ids)
    }

    pub fn get_prev_id(&self, id: StoryId) -> Option<StoryId> {
        if !self.loaded {
            return None;
        }
        navigation::prev_id(id, &self.ordered_ids)
    }

    pub fn get_first_id(&self) -> Option<StoryId> {
        if !self.loaded {
            return None;
        }
        self.ordered_ids.first().copied()
    }

    pub fn get_last_id(&self) -> Option<StoryId> {
        if !self.loaded {
            return None;
        }
        self.ordered_ids.last().copied()
    }

    /// A copy of the ascending identifiers; empty when unloaded.
    pub fn get_all_ids(&self) -> Vec<StoryId> {
        if !self.loaded {
            return Vec::new();
        }
        self.ordered_ids.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of stories available.
    pub fn len(&self) -> usize {
        if self.loaded {
            self.ordered_ids.len()
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<S: StorySource> StoryProvider for StoryCatalog<S> {
    async fn load(&mut self, location: &str, timeout: Duration) -> Result<(), LoadError> {
        StoryCatalog::load(self, location, timeout).await
    }

    fn get_by_id(&self, id: StoryId) -> Option<&str> {
        StoryCatalog::get_by_id(self, id)
    }

    fn get_next_id(&self, id: StoryId) -> Option<StoryId> {
        StoryCatalog::get_next_id(self, id)
    }

    fn get_prev_id(&self, id: StoryId) -> Option<StoryId> {
        StoryCatalog::get_prev_id(self, id)
    }

    fn get_first_id(&self) -> Option<StoryId> {
        StoryCatalog::get_first_id(self)
    }

    fn get_last_id(&self) -> Option<StoryId> {
        StoryCatalog::get_last_id(self)
    }

    fn get_all_ids(&self) -> Vec<StoryId> {
        StoryCatalog::get_all_ids(self)
    }

    fn is_loaded(&self) -> bool {
        StoryCatalog::is_loaded(self)
    }
}

/// Parse a feed body into stories.
///
/// The body must be a non-empty JSON object whose keys are positive decimal
/// integers and whose values are non-empty strings. Keys that collide after
/// parsing (`"5"` and `"05"`) resolve to the one appearing last in the document.
pub fn parse_stories(body: &str) -> Result<BTreeMap<StoryId, String>, LoadError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LoadError::parse(format!("Response is not valid JSON: {e}")))?;

    let Value::Object(map) = value else {
        return Err(LoadError::parse("Expected a JSON object of stories"));
    };

    if map.is_empty() {
        return Err(LoadError::parse("Story collection is empty"));
    }

    let mut entries = BTreeMap::new();
    for (key, value) in map {
        let id = parse_story_key(&key).ok_or_else(|| {
            LoadError::parse(format!("Story key {key:?} is not a positive integer"))
        })?;
        let Value::String(text) = value else {
            return Err(LoadError::parse(format!("Story {key:?} is not a string")));
        };
        if text.is_empty() {
            return Err(LoadError::parse(format!("Story {key:?} is empty")));
        }
        entries.insert(id, text);
    }

    Ok(entries)
}

fn parse_story_key(key: &str) -> Option<StoryId> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<StoryId>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::source::StaticSource;

    const FEED: &str = "mem://stories";

    fn catalog_with(body: &str) -> StoryCatalog<StaticSource> {
        StoryCatalog::new(StaticSource::new().with_body(FEED, body))
    }

    async fn loaded(body: &str) -> StoryCatalog<StaticSource> {
        let mut catalog = catalog_with(body);
        catalog.load_default(FEED).await.expect("feed should load");
        catalog
    }

    #[test]
    fn test_new_catalog_is_unloaded() {
        let catalog = StoryCatalog::new(StaticSource::new());
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.get_by_id(1), None);
        assert_eq!(catalog.get_first_id(), None);
        assert_eq!(catalog.get_last_id(), None);
        assert_eq!(catalog.get_next_id(1), None);
        assert_eq!(catalog.get_prev_id(1), None);
        assert!(catalog.get_all_ids().is_empty());
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_load_orders_ids() {
        let catalog = loaded(r#"{"10":"ten","1":"one","7":"seven","3":"three"}"#).await;
        assert!(catalog.is_loaded());
        assert_eq!(catalog.get_all_ids(), vec![1, 3, 7, 10]);
        assert_eq!(catalog.get_first_id(), Some(1));
        assert_eq!(catalog.get_last_id(), Some(10));
        assert_eq!(catalog.len(), 4);
    }

    #[tokio::test]
    async fn test_lookups_after_load() {
        let catalog = loaded(r#"{"1":"one","3":"three","5":"five"}"#).await;
        assert_eq!(catalog.get_by_id(3), Some("three"));
        assert_eq!(catalog.get_by_id(2), None);
        assert_eq!(catalog.get_next_id(3), Some(5));
        assert_eq!(catalog.get_next_id(5), Some(1));
        assert_eq!(catalog.get_prev_id(1), Some(5));
        assert_eq!(catalog.get_next_id(4), None);
    }

    #[tokio::test]
    async fn test_all_ids_is_a_copy() {
        let catalog = loaded(r#"{"1":"a","2":"b"}"#).await;
        let mut ids = catalog.get_all_ids();
        ids.clear();
        ids.push(99);
        assert_eq!(catalog.get_all_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_non_numeric_key_is_parse_error() {
        let mut catalog = catalog_with(r#"{"1":"a","x":"b"}"#);
        let error = catalog.load_default(FEED).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.get_by_id(1), None);
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_parse_errors() {
        for body in [
            "not json",
            "[1,2,3]",
            "\"story\"",
            "{}",
            r#"{"0":"zero"}"#,
            r#"{"-1":"negative"}"#,
            r#"{"1.5":"decimal"}"#,
            r#"{" 1":"padded"}"#,
            r#"{"+1":"signed"}"#,
            r#"{"1":42}"#,
        ] {
            let mut catalog = catalog_with(body);
            let error = catalog.load_default(FEED).await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Parse, "body {body}");
            assert!(!catalog.is_loaded());
        }
    }

    #[tokio::test]
    async fn test_empty_story_text_is_parse_error() {
        let mut catalog = catalog_with(r#"{"1":"","2":"b"}"#);
        let error = catalog.load_default(FEED).await.unwrap_err();
        assert_eq!(error, LoadError::parse("Story \"1\" is empty"));
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.get_by_id(1), None);
        assert_eq!(catalog.get_by_id(2), None);
    }

    #[tokio::test]
    async fn test_colliding_keys_last_wins() {
        let catalog = loaded(r#"{"5":"first","05":"second","2":"two"}"#).await;
        assert_eq!(catalog.get_all_ids(), vec![2, 5]);
        assert_eq!(catalog.get_by_id(5), Some("second"));
    }

    #[tokio::test]
    async fn test_failed_reload_clears_previous_stories() {
        let mut catalog = loaded(r#"{"1":"one"}"#).await;
        assert!(catalog.is_loaded());

        let error = catalog.load_default("mem://elsewhere").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.get_by_id(1), None);
        assert!(catalog.get_all_ids().is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_stories() {
        let mut source = StaticSource::new().with_body(FEED, r#"{"1":"one","2":"two"}"#);
        source.set_body("mem://second", r#"{"8":"eight"}"#);
        let mut catalog = StoryCatalog::new(source);

        catalog.load_default(FEED).await.unwrap();
        catalog.load_default("mem://second").await.unwrap();

        assert_eq!(catalog.get_all_ids(), vec![8]);
        assert_eq!(catalog.get_by_id(1), None);
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let source = StaticSource::new()
            .with_body(FEED, r#"{"1":"one"}"#)
            .with_delay(Duration::from_secs(5));
        let mut catalog = StoryCatalog::new(source);

        let error = catalog
            .load(FEED, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(
            error,
            LoadError::Timeout {
                timeout: Duration::from_millis(20)
            }
        );
        assert!(!catalog.is_loaded());
    }

    #[tokio::test]
    async fn test_source_errors_pass_through() {
        let source = StaticSource::new().with_error(FEED, LoadError::from_status(500, None, FEED));
        let mut catalog = StoryCatalog::new(source);
        let error = catalog.load_default(FEED).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(!catalog.is_loaded());
    }

    #[tokio::test]
    async fn test_usable_through_provider_trait() {
        let mut provider: Box<dyn StoryProvider> = Box::new(catalog_with(r#"{"4":"four"}"#));
        provider.load(FEED, DEFAULT_LOAD_TIMEOUT).await.unwrap();
        assert_eq!(provider.get_by_id(4), Some("four"));
        assert_eq!(provider.get_next_id(4), Some(4));
    }
}
