//! Main application state and logic

use std::time::Duration;

use chrono::{DateTime, Local};
use ithappens_core::navigation;
use ithappens_core::{
    validate_jump_input, ErrorReport, JumpError, RemedyAction, StoryId, StoryProvider,
};

use crate::ui::theme::ReaderTheme;
use crate::ui::Overlay;

/// Where the catalog is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A load is pending or in flight; navigation is disabled
    Loading,
    Ready,
    Failed(ErrorReport),
}

/// Text entry for the "jump to story" overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpPrompt {
    input: String,
    cursor_position: usize,
    error: Option<String>,
}

impl JumpPrompt {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Current validation message, if the input is invalid
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Insert a character at the cursor (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len());
        self.input.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input.char_indices().nth(self.cursor_position) {
                self.input.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Remove the character under the cursor (unicode-safe)
    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.input.char_indices().nth(self.cursor_position) {
            self.input.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    /// Re-run validation after an edit. Blank input shows no error.
    fn revalidate(&mut self, ids: &[StoryId]) {
        self.error = if self.input.trim().is_empty() {
            None
        } else {
            validate_jump_input(&self.input, ids)
                .err()
                .map(|e| e.to_string())
        };
    }
}

/// Main application state
pub struct App<P> {
    pub provider: P,
    location: String,
    timeout: Duration,
    /// Story to settle on after the next successful load
    start_target: Option<StoryId>,

    load_state: LoadState,
    failed_at: Option<DateTime<Local>>,
    pub pending_load: bool,
    current_id: Option<StoryId>,

    // UI state
    pub theme: ReaderTheme,
    overlay: Option<Overlay>,
    pub story_scroll: usize,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
}

impl<P: StoryProvider> App<P> {
    /// Create an app that will load `location` on its first loop iteration
    pub fn new(provider: P, location: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            location: location.into(),
            timeout,
            start_target: None,
            load_state: LoadState::Loading,
            failed_at: None,
            pending_load: true,
            current_id: None,
            theme: ReaderTheme::default(),
            overlay: None,
            story_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Open this story (or the next existing one) once loaded
    pub fn with_start(mut self, start: Option<StoryId>) -> Self {
        self.start_target = start;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load_state, LoadState::Ready)
    }

    /// The report for the last failed load
    pub fn failure(&self) -> Option<&ErrorReport> {
        match &self.load_state {
            LoadState::Failed(report) => Some(report),
            _ => None,
        }
    }

    /// When the last failed load gave up
    pub fn failed_at(&self) -> Option<DateTime<Local>> {
        self.failed_at
    }

    /// Switch to the loading state without touching the provider yet
    pub fn begin_load(&mut self) {
        // Come back to the same story after a reload
        if let Some(id) = self.current_id.take() {
            self.start_target = Some(id);
        }
        self.load_state = LoadState::Loading;
        self.failed_at = None;
        self.overlay = None;
        self.story_scroll = 0;
        self.set_status("Loading stories...");
    }

    /// Load (or reload) the catalog and settle on a story
    pub async fn load(&mut self) {
        self.pending_load = false;
        self.begin_load();

        match self.provider.load(&self.location, self.timeout).await {
            Ok(()) => {
                let ids = self.provider.get_all_ids();
                self.current_id = self
                    .start_target
                    .and_then(|target| navigation::closest_id(target, &ids))
                    .or_else(|| self.provider.get_first_id());
                self.load_state = LoadState::Ready;
                self.set_status(format!("Loaded {} stories", ids.len()));
            }
            Err(error) => {
                tracing::warn!(%error, location = %self.location, "reader could not load stories");
                let report = error.report();
                self.set_status(report.user_message.clone());
                self.load_state = LoadState::Failed(report);
                self.failed_at = Some(Local::now());
            }
        }
    }

    /// Ask for a reload on the next loop iteration
    ///
    /// Refused while a load is in flight, and for failures no reload can fix.
    pub fn request_reload(&mut self) -> bool {
        match &self.load_state {
            LoadState::Loading => false,
            LoadState::Failed(report)
                if !report.retryable && !report.offers(RemedyAction::Reload) =>
            {
                self.set_status("Reloading will not help; check the story feed location");
                false
            }
            _ => {
                self.pending_load = true;
                true
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn current_id(&self) -> Option<StoryId> {
        self.current_id
    }

    pub fn current_story(&self) -> Option<&str> {
        self.current_id.and_then(|id| self.provider.get_by_id(id))
    }

    pub fn available_ids(&self) -> Vec<StoryId> {
        self.provider.get_all_ids()
    }

    /// 1-based position of the current story and the number of stories
    pub fn position(&self) -> Option<(usize, usize)> {
        navigation::position(self.current_id?, &self.available_ids())
    }

    pub fn can_go_next(&self) -> bool {
        self.is_ready()
            && self
                .current_id
                .is_some_and(|id| navigation::can_go_next(id, &self.available_ids()))
    }

    pub fn can_go_prev(&self) -> bool {
        self.is_ready()
            && self
                .current_id
                .is_some_and(|id| navigation::can_go_prev(id, &self.available_ids()))
    }

    pub fn go_next(&mut self) -> bool {
        let target = self.navigable_current().and_then(|id| self.provider.get_next_id(id));
        self.show_if_some(target)
    }

    pub fn go_prev(&mut self) -> bool {
        let target = self.navigable_current().and_then(|id| self.provider.get_prev_id(id));
        self.show_if_some(target)
    }

    pub fn go_first(&mut self) -> bool {
        let target = self.is_ready().then(|| self.provider.get_first_id()).flatten();
        self.show_if_some(target)
    }

    pub fn go_last(&mut self) -> bool {
        let target = self.is_ready().then(|| self.provider.get_last_id()).flatten();
        self.show_if_some(target)
    }

    /// Validate `input` and move to the story it names
    pub fn jump_to_input(&mut self, input: &str) -> Result<StoryId, JumpError> {
        let id = validate_jump_input(input, &self.available_ids())?;
        self.show(id);
        Ok(id)
    }

    fn navigable_current(&self) -> Option<StoryId> {
        if self.is_ready() {
            self.current_id
        } else {
            None
        }
    }

    fn show_if_some(&mut self, id: Option<StoryId>) -> bool {
        match id {
            Some(id) => {
                self.show(id);
                true
            }
            None => false,
        }
    }

    fn show(&mut self, id: StoryId) {
        self.current_id = Some(id);
        self.story_scroll = 0;
        self.clear_status();
    }

    // =========================================================================
    // Jump prompt
    // =========================================================================

    /// Open the jump prompt (only once stories are available)
    pub fn open_jump(&mut self) {
        if self.is_ready() {
            self.overlay = Some(Overlay::Jump(JumpPrompt::default()));
        }
    }

    pub fn jump_prompt(&self) -> Option<&JumpPrompt> {
        match &self.overlay {
            Some(Overlay::Jump(prompt)) => Some(prompt),
            _ => None,
        }
    }

    /// Apply an edit to the open prompt and re-validate it
    pub fn edit_jump(&mut self, edit: impl FnOnce(&mut JumpPrompt)) {
        let ids = self.available_ids();
        if let Some(Overlay::Jump(prompt)) = &mut self.overlay {
            edit(prompt);
            prompt.revalidate(&ids);
        }
    }

    /// Submit the prompt. Closes it on success, shows the error otherwise.
    pub fn submit_jump(&mut self) -> bool {
        let Some(input) = self.jump_prompt().map(|p| p.input().to_string()) else {
            return false;
        };

        match self.jump_to_input(&input) {
            Ok(id) => {
                self.overlay = None;
                self.set_status(format!("Jumped to story {id}"));
                true
            }
            Err(error) => {
                if let Some(Overlay::Jump(prompt)) = &mut self.overlay {
                    prompt.error = Some(error.to_string());
                }
                false
            }
        }
    }

    // =========================================================================
    // Overlays, scrolling, status
    // =========================================================================

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Scroll the story up; the widget caps the offset when rendering
    pub fn scroll_up(&mut self, lines: usize) {
        self.story_scroll = self.story_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.story_scroll = self.story_scroll.saturating_add(lines);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use ithappens_core::{LoadError, StaticSource, StoryCatalog};
    use std::collections::BTreeMap;

    pub(crate) const FEED: &str = "mem://stories";

    pub(crate) const STORIES: &str = r#"{
        "1": "First story.\n\nIt has two paragraphs.",
        "3": "Third story.",
        "5": "Fifth story.",
        "7": "Seventh story.",
        "10": "Tenth story."
    }"#;

    /// App over a real catalog backed by an in-memory feed
    pub(crate) fn catalog_app(body: &str) -> App<StoryCatalog<StaticSource>> {
        let catalog = StoryCatalog::new(StaticSource::new().with_body(FEED, body));
        App::new(catalog, FEED, Duration::from_secs(1))
    }

    pub(crate) async fn ready_app() -> App<StoryCatalog<StaticSource>> {
        let mut app = catalog_app(STORIES);
        app.load().await;
        assert!(app.is_ready());
        app
    }

    /// Scripted provider: fails a set number of times, then serves fixed stories
    struct FlakyProvider {
        failures_left: usize,
        error: LoadError,
        stories: BTreeMap<StoryId, String>,
        loaded: bool,
        loads: usize,
    }

    impl FlakyProvider {
        fn new(failures: usize, error: LoadError) -> Self {
            Self {
                failures_left: failures,
                error,
                stories: [(2, "two"), (4, "four")]
                    .into_iter()
                    .map(|(id, text)| (id, text.to_string()))
                    .collect(),
                loaded: false,
                loads: 0,
            }
        }

        fn ids(&self) -> Vec<StoryId> {
            if self.loaded {
                self.stories.keys().copied().collect()
            } else {
                Vec::new()
            }
        }
    }

    #[async_trait]
    impl StoryProvider for FlakyProvider {
        async fn load(&mut self, _location: &str, _timeout: Duration) -> Result<(), LoadError> {
            self.loads += 1;
            self.loaded = false;
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(self.error.clone());
            }
            self.loaded = true;
            Ok(())
        }

        fn get_by_id(&self, id: StoryId) -> Option<&str> {
            if !self.loaded {
                return None;
            }
            self.stories.get(&id).map(String::as_str)
        }

        fn get_next_id(&self, id: StoryId) -> Option<StoryId> {
            navigation::next_id(id, &self.ids())
        }

        fn get_prev_id(&self, id: StoryId) -> Option<StoryId> {
            navigation::prev_id(id, &self.ids())
        }

        fn get_first_id(&self) -> Option<StoryId> {
            navigation::first_id(&self.ids())
        }

        fn get_last_id(&self) -> Option<StoryId> {
            navigation::last_id(&self.ids())
        }

        fn get_all_ids(&self) -> Vec<StoryId> {
            self.ids()
        }

        fn is_loaded(&self) -> bool {
            self.loaded
        }
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = catalog_app(STORIES);
        assert_eq!(app.load_state(), &LoadState::Loading);
        assert!(app.pending_load);
        assert_eq!(app.current_id(), None);
        assert!(!app.can_go_next());
    }

    #[tokio::test]
    async fn test_load_opens_first_story() {
        let app = ready_app().await;
        assert_eq!(app.current_id(), Some(1));
        assert!(!app.pending_load);
        assert_eq!(app.position(), Some((1, 5)));
        assert_eq!(app.status_message(), Some("Loaded 5 stories"));
        assert!(app.current_story().unwrap().starts_with("First story."));
    }

    #[tokio::test]
    async fn test_start_resolves_to_closest_story() {
        let mut app = catalog_app(STORIES).with_start(Some(6));
        app.load().await;
        assert_eq!(app.current_id(), Some(7));

        let mut app = catalog_app(STORIES).with_start(Some(50));
        app.load().await;
        assert_eq!(app.current_id(), Some(10));
    }

    #[tokio::test]
    async fn test_navigation_wraps() {
        let mut app = ready_app().await;
        assert!(app.can_go_prev());
        assert!(app.go_prev());
        assert_eq!(app.current_id(), Some(10));
        assert!(app.go_next());
        assert_eq!(app.current_id(), Some(1));
        assert!(app.go_next());
        assert_eq!(app.current_id(), Some(3));
    }

    #[tokio::test]
    async fn test_first_and_last() {
        let mut app = ready_app().await;
        assert!(app.go_last());
        assert_eq!(app.current_id(), Some(10));
        assert_eq!(app.position(), Some((5, 5)));
        assert!(app.go_first());
        assert_eq!(app.current_id(), Some(1));
    }

    #[tokio::test]
    async fn test_navigation_resets_scroll() {
        let mut app = ready_app().await;
        app.scroll_down(5);
        assert_eq!(app.story_scroll, 5);
        app.go_next();
        assert_eq!(app.story_scroll, 0);
    }

    #[tokio::test]
    async fn test_jump_to_input() {
        let mut app = ready_app().await;
        assert_eq!(app.jump_to_input(" 7 "), Ok(7));
        assert_eq!(app.current_id(), Some(7));
        assert_eq!(
            app.jump_to_input("4"),
            Err(JumpError::DoesNotExist { id: "4".into() })
        );
        assert_eq!(app.current_id(), Some(7));
    }

    #[tokio::test]
    async fn test_jump_prompt_live_validation() {
        let mut app = ready_app().await;
        app.open_jump();
        assert!(app.jump_prompt().is_some());

        app.edit_jump(|p| p.type_char('3'));
        assert_eq!(app.jump_prompt().unwrap().error(), None);

        app.edit_jump(|p| p.type_char('.'));
        assert_eq!(
            app.jump_prompt().unwrap().error(),
            Some("ID must be a number")
        );

        app.edit_jump(|p| p.type_char('5'));
        assert_eq!(
            app.jump_prompt().unwrap().error(),
            Some("ID must be a whole number")
        );

        app.edit_jump(|p| {
            p.backspace();
            p.backspace();
            p.backspace();
        });
        assert_eq!(app.jump_prompt().unwrap().input(), "");
        assert_eq!(app.jump_prompt().unwrap().error(), None);
    }

    #[tokio::test]
    async fn test_submit_jump() {
        let mut app = ready_app().await;
        app.open_jump();
        app.edit_jump(|p| p.type_char('9'));
        assert!(!app.submit_jump());
        assert_eq!(
            app.jump_prompt().unwrap().error(),
            Some("Story with ID 9 does not exist")
        );

        app.edit_jump(|p| {
            p.backspace();
            p.type_char('5');
        });
        assert!(app.submit_jump());
        assert!(app.jump_prompt().is_none());
        assert_eq!(app.current_id(), Some(5));
        assert_eq!(app.status_message(), Some("Jumped to story 5"));
    }

    #[tokio::test]
    async fn test_submit_empty_jump() {
        let mut app = ready_app().await;
        app.open_jump();
        assert!(!app.submit_jump());
        assert_eq!(app.jump_prompt().unwrap().error(), Some("ID cannot be empty"));
    }

    #[test]
    fn test_prompt_editing_is_unicode_safe() {
        let mut prompt = JumpPrompt::default();
        for c in "1é2".chars() {
            prompt.type_char(c);
        }
        prompt.cursor_left();
        prompt.backspace();
        assert_eq!(prompt.input(), "12");
        prompt.cursor_home();
        prompt.delete();
        assert_eq!(prompt.input(), "2");
        prompt.cursor_end();
        assert_eq!(prompt.cursor_position(), 1);
    }

    #[test]
    fn test_cannot_navigate_or_jump_while_loading() {
        let mut app = catalog_app(STORIES);
        assert!(!app.go_next());
        assert!(!app.go_first());
        app.open_jump();
        assert!(app.jump_prompt().is_none());
        assert_eq!(app.jump_to_input("1"), Err(JumpError::NoStories));
    }

    #[tokio::test]
    async fn test_failed_load_reports_error() {
        let mut app = catalog_app(r#"{"1":"a","x":"b"}"#);
        app.load().await;

        let report = app.failure().expect("load should fail");
        assert_eq!(report.kind, ithappens_core::ErrorKind::Parse);
        assert_eq!(app.current_id(), None);
        assert!(!app.go_next());
        assert!(!app.provider.is_loaded());
    }

    #[tokio::test]
    async fn test_retry_after_network_failure() {
        let provider = FlakyProvider::new(1, LoadError::network("connection refused"));
        let mut app = App::new(provider, FEED, Duration::from_secs(1));

        let before = Local::now();
        app.load().await;
        assert!(app.failure().unwrap().retryable);
        let failed_at = app.failed_at().expect("failure time is recorded");
        assert!(failed_at >= before && failed_at <= Local::now());
        assert!(app.request_reload());
        assert!(app.pending_load);

        app.load().await;
        assert!(app.is_ready());
        assert_eq!(app.failed_at(), None);
        assert_eq!(app.current_id(), Some(2));
        assert_eq!(app.provider.loads, 2);
    }

    #[tokio::test]
    async fn test_not_found_is_not_reloaded() {
        let provider = FlakyProvider::new(
            1,
            LoadError::NotFound {
                resource: FEED.into(),
            },
        );
        let mut app = App::new(provider, FEED, Duration::from_secs(1));

        app.load().await;
        assert!(!app.request_reload());
        assert!(!app.pending_load);
    }

    #[tokio::test]
    async fn test_reload_keeps_current_story() {
        let mut app = ready_app().await;
        app.go_last();
        assert!(app.request_reload());
        app.load().await;
        assert_eq!(app.current_id(), Some(10));
    }

    #[tokio::test]
    async fn test_reload_closes_overlay() {
        let mut app = ready_app().await;
        app.open_jump();
        app.begin_load();
        assert!(!app.overlay().is_some());
        assert_eq!(app.load_state(), &LoadState::Loading);
        assert!(!app.request_reload());
    }

    #[test]
    fn test_toggle_help() {
        let mut app = catalog_app(STORIES);
        app.toggle_help();
        assert!(matches!(app.overlay(), Some(Overlay::Help)));
        app.toggle_help();
        assert!(!app.overlay().is_some());
    }
}
