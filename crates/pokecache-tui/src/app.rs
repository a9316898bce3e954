//! Application state for the pokecache terminal UI.
//!
//! `App` wraps the core `CatalogController` with the state that only the
//! terminal front end cares about: the current mode, the list selection and
//! the search input buffer.

use anyhow::Result;
use pokecache_core::{ApiClient, CatalogController, CatalogService, ControllerUpdate, Item};
use tracing::{debug, info, warn};

use crate::config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for search input.
const MAX_SEARCH_LENGTH: usize = 40;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App<S: CatalogService + 'static = ApiClient> {
    pub config: Config,
    pub catalog: CatalogController<S>,

    pub state: AppState,
    pub selection: usize,
    pub search_input: String,
}

impl App<ApiClient> {
    /// Create the application from configuration
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::with_config(config.api_base_url(), config.catalog_source())?;
        debug!(base_url = api.base_url(), catalog = %api.source().name(), "API client configured");
        Ok(Self::with_service(config, api))
    }
}

impl<S: CatalogService + 'static> App<S> {
    pub fn with_service(config: Config, service: S) -> Self {
        Self {
            config,
            catalog: CatalogController::new(service),
            state: AppState::Normal,
            selection: 0,
            search_input: String::new(),
        }
    }

    /// Load the catalog and restore the last search, if any
    pub async fn start(&mut self) {
        self.catalog.load_catalog().await;
        info!(count = self.catalog.items().len(), "Catalog ready");

        if let Some(query) = self.config.last_search.clone().filter(|q| !q.is_empty()) {
            self.search_input = query.clone();
            self.catalog.set_search_text(query);
        }
        self.request_selected_detail();
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.catalog.filtered_items().get(self.selection)
    }

    pub fn visible_count(&self) -> usize {
        self.catalog.filtered_items().len()
    }

    // ===== Navigation =====

    pub fn select_next(&mut self, step: usize) {
        let last = self.visible_count().saturating_sub(1);
        self.set_selection((self.selection + step).min(last));
    }

    pub fn select_prev(&mut self, step: usize) {
        self.set_selection(self.selection.saturating_sub(step));
    }

    pub fn select_first(&mut self) {
        self.set_selection(0);
    }

    pub fn select_last(&mut self) {
        self.set_selection(self.visible_count().saturating_sub(1));
    }

    fn set_selection(&mut self, index: usize) {
        if index != self.selection {
            self.selection = index;
            self.request_selected_detail();
        }
    }

    fn request_selected_detail(&mut self) {
        if let Some(id) = self.selected_item().map(Item::item_id) {
            self.catalog.request_detail(id);
        }
    }

    /// Fetch details for the page of items starting at the selection
    pub fn prefetch_page(&mut self) -> usize {
        let ids: Vec<i64> = self
            .catalog
            .filtered_items()
            .iter()
            .skip(self.selection)
            .take(PAGE_SCROLL_SIZE)
            .map(Item::item_id)
            .collect();
        let started = self.catalog.prefetch_details(ids);
        debug!(started, "Prefetch requested");
        started
    }

    // ===== Search =====

    pub fn start_search(&mut self) {
        self.state = AppState::Searching;
    }

    pub fn push_search_char(&mut self, c: char) {
        if !can_add_search_char(self.search_input.chars().count(), c) {
            return;
        }
        self.search_input.push(c);
        self.catalog.set_search_text(self.search_input.clone());
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.catalog.set_search_text(self.search_input.clone());
        }
    }

    pub fn cancel_search(&mut self) {
        self.state = AppState::Normal;
        if !self.search_input.is_empty() {
            self.search_input.clear();
            self.catalog.set_search_text(String::new());
        }
    }

    pub fn finish_search(&mut self) {
        // Keep search query active
        self.state = AppState::Normal;
    }

    // ===== Background Work =====

    /// Apply completed background work from the controller
    pub fn check_background_tasks(&mut self) {
        for update in self.catalog.check_background_tasks() {
            match update {
                ControllerUpdate::FilterApplied | ControllerUpdate::CatalogLoaded => {
                    // Reset selection when the visible list changes
                    self.selection = 0;
                    self.request_selected_detail();
                }
                ControllerUpdate::DetailFailed(id) => {
                    debug!(id, "Detail fetch failed");
                }
                _ => {}
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.catalog.clear_error();
    }

    /// Persist the search text so the next run starts where this one ended
    pub fn save_session(&mut self) {
        self.config.last_search = Some(self.search_input.clone()).filter(|s| !s.is_empty());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }
}

/// Check if a character can be added to the search input.
/// Rejects control characters and enforces the maximum length.
pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && !c.is_control()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_stub::StubService;

    mod async_stub {
        use pokecache_core::{CatalogError, CatalogService, DetailRecord, Item};

        pub struct StubService;

        #[async_trait::async_trait]
        impl CatalogService for StubService {
            async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
                Ok(["bulbasaur", "ivysaur", "venusaur", "pikachu"]
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Item::new(*name, format!("https://host/api/v2/pokemon/{}/", i + 1)))
                    .collect())
            }

            async fn get_detail(&self, id: i64) -> Result<DetailRecord, CatalogError> {
                Ok(DetailRecord::new(id, id * 2, id * 3))
            }
        }
    }

    async fn started_app() -> App<StubService> {
        let mut app = App::with_service(Config::default(), StubService);
        app.start().await;
        app
    }

    #[test]
    fn test_can_add_search_char() {
        assert!(can_add_search_char(0, 'a'));
        assert!(can_add_search_char(39, 'z'));
        assert!(!can_add_search_char(40, 'a'));
        assert!(!can_add_search_char(0, '\n'));
        assert!(!can_add_search_char(0, '\x00'));
    }

    #[tokio::test]
    async fn test_start_selects_first_and_requests_detail() {
        let app = started_app().await;
        assert_eq!(app.visible_count(), 4);
        assert_eq!(app.selected_item().map(|i| i.name.as_str()), Some("bulbasaur"));
        assert!(app.catalog.is_detail_pending(1));
    }

    #[tokio::test]
    async fn test_selection_is_clamped() {
        let mut app = started_app().await;
        app.select_next(PAGE_SCROLL_SIZE);
        assert_eq!(app.selection, 3);
        app.select_prev(PAGE_SCROLL_SIZE);
        assert_eq!(app.selection, 0);
        app.select_last();
        assert_eq!(app.selected_item().map(|i| i.item_id()), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_resets_selection_after_debounce() {
        let mut app = started_app().await;
        app.select_last();
        app.start_search();
        for c in "saur".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.state, AppState::Searching);
        assert_eq!(app.selection, 3);

        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        app.check_background_tasks();
        assert_eq!(app.visible_count(), 3);
        assert_eq!(app.selection, 0);

        app.cancel_search();
        assert_eq!(app.catalog.search_text(), "");
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_prefetch_page() {
        let mut app = started_app().await;
        // Item 1 is already pending from start()
        assert_eq!(app.prefetch_page(), 3);
        assert_eq!(app.prefetch_page(), 0);
    }
}
