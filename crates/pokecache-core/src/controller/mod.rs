//! Catalog state management.
//!
//! `CatalogController` owns everything a front end observes: the full item
//! list, the filtered view, the detail cache, the search text, the loading
//! flag and the last error message. All mutation happens through `&mut self`
//! on the context that owns the controller. Network work started by the
//! `request_*` methods runs in spawned tasks and comes back over a channel;
//! `check_background_tasks` applies it on the owning context.

pub mod debounce;
pub mod filter;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::CatalogError;
use crate::cache::DetailCache;
use crate::models::{DetailRecord, Item};
use crate::service::CatalogService;

pub use debounce::Debouncer;
pub use filter::filter_items;

// ============================================================================
// Constants
// ============================================================================

/// Quiet period after the last search edit before the filter is recomputed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum concurrent detail requests during a prefetch.
pub const MAX_CONCURRENT_REQUESTS: usize = 10;

// ============================================================================
// Background Task Results
// ============================================================================

/// Work completed off the state context, waiting to be applied.
enum BackgroundResult {
    /// A search debounce timer fired
    SearchSettled { epoch: u64 },
    /// A catalog load finished
    Catalog {
        generation: u64,
        result: Result<Vec<Item>, CatalogError>,
    },
    /// A detail fetch finished
    Detail {
        id: i64,
        result: Result<DetailRecord, CatalogError>,
    },
}

/// What applying one background result changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerUpdate {
    /// The filtered view was recomputed from the current search text
    FilterApplied,
    /// A superseded search timer fired and was ignored
    SearchDiscarded,
    /// The item list was replaced
    CatalogLoaded,
    /// A catalog load failed; the error message is set
    CatalogFailed,
    /// A superseded catalog load completed and was ignored
    CatalogDiscarded,
    /// A detail record was cached
    DetailLoaded(i64),
    /// A detail fetch failed; nothing was cached
    DetailFailed(i64),
}

/// Clears the loading flag when dropped, on every exit path.
struct LoadingGuard<'a> {
    loading: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn engage(loading: &'a mut bool) -> Self {
        *loading = true;
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.loading = false;
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct CatalogController<S: CatalogService + 'static> {
    service: Arc<S>,

    items: Vec<Item>,
    filtered: Vec<Item>,
    details: DetailCache,
    search_text: String,
    loading: bool,
    error_message: Option<String>,

    /// Incremented on every filtered-view recompute
    filter_revision: u64,
    /// Incremented on every catalog load; older completions are dropped
    catalog_generation: u64,
    /// Ids with a background fetch in flight
    pending_details: HashSet<i64>,
    search_debounce: Debouncer,

    // Background task channel
    result_rx: mpsc::Receiver<BackgroundResult>,
    result_tx: mpsc::Sender<BackgroundResult>,
}

impl<S: CatalogService + 'static> CatalogController<S> {
    pub fn new(service: S) -> Self {
        Self::with_shared(Arc::new(service))
    }

    pub fn with_shared(service: Arc<S>) -> Self {
        Self::with_search_delay(service, SEARCH_DEBOUNCE)
    }

    pub fn with_search_delay(service: Arc<S>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            service,
            items: Vec::new(),
            filtered: Vec::new(),
            details: DetailCache::new(),
            search_text: String::new(),
            loading: false,
            error_message: None,
            filter_revision: 0,
            catalog_generation: 0,
            pending_details: HashSet::new(),
            search_debounce: Debouncer::new(delay),
            result_rx: rx,
            result_tx: tx,
        }
    }

    // ===== Observable State =====

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filtered_items(&self) -> &[Item] {
        &self.filtered
    }

    pub fn details(&self) -> &DetailCache {
        &self.details
    }

    pub fn cached_detail(&self, id: i64) -> Option<&DetailRecord> {
        self.details.get(id)
    }

    /// How long ago the record for `id` was fetched, e.g. "5m ago"
    pub fn detail_age(&self, id: i64) -> Option<String> {
        self.details.get_cached(id).map(|cached| cached.age_display())
    }

    pub fn is_detail_pending(&self, id: i64) -> bool {
        self.pending_details.contains(&id)
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn filter_revision(&self) -> u64 {
        self.filter_revision
    }

    /// Dismiss the current error message. Nothing else changes.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    fn set_error(&mut self, error: &CatalogError) {
        self.error_message = Some(error.user_message());
    }

    fn recompute_filter(&mut self) {
        self.filtered = filter_items(&self.items, &self.search_text);
        self.filter_revision += 1;
        debug!(
            query = %self.search_text,
            shown = self.filtered.len(),
            total = self.items.len(),
            "Filter recomputed"
        );
    }

    // ===== Catalog =====

    /// Load the item list and recompute the filtered view.
    ///
    /// On failure the error message is set and the previous list is kept.
    pub async fn load_catalog(&mut self) {
        self.catalog_generation += 1;
        self.error_message = None;

        let service = Arc::clone(&self.service);
        let result = {
            let _loading = LoadingGuard::engage(&mut self.loading);
            service.list_items().await
        };

        self.apply_catalog(result);
    }

    /// Start a catalog load in the background. Completions of earlier loads
    /// arriving after this one are discarded.
    pub fn request_catalog(&mut self) {
        self.catalog_generation += 1;
        let generation = self.catalog_generation;
        self.loading = true;
        self.error_message = None;

        let service = Arc::clone(&self.service);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = service.list_items().await;
            Self::send_result(&tx, BackgroundResult::Catalog { generation, result }).await;
        });
    }

    fn apply_catalog(&mut self, result: Result<Vec<Item>, CatalogError>) -> ControllerUpdate {
        match result {
            Ok(items) => {
                info!(count = items.len(), "Catalog loaded");
                self.items = items;
                self.recompute_filter();
                ControllerUpdate::CatalogLoaded
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                self.set_error(&e);
                ControllerUpdate::CatalogFailed
            }
        }
    }

    // ===== Search =====

    /// Update the search text. The filtered view follows after a quiet
    /// period; an update within that period restarts it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        let tx = self.result_tx.clone();
        self.search_debounce.schedule(move |epoch| async move {
            Self::send_result(&tx, BackgroundResult::SearchSettled { epoch }).await;
        });
    }

    /// Whether a search edit is still waiting for its quiet period.
    pub fn is_search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    // ===== Details =====

    /// Return the detail record for `id`, fetching it only on a cache miss.
    ///
    /// A failed fetch caches nothing, sets the error message and returns the
    /// error, so the next call retries.
    pub async fn load_detail(&mut self, id: i64) -> Result<DetailRecord, CatalogError> {
        if let Some(record) = self.details.get(id) {
            debug!(id, "Detail cache hit");
            return Ok(record.clone());
        }

        match self.service.get_detail(id).await {
            Ok(record) => Ok(self.store_detail(id, record).clone()),
            Err(e) => {
                warn!(id, error = %e, "Failed to load detail");
                self.set_error(&e);
                Err(e)
            }
        }
    }

    /// Fetch the record for `id` in the background unless it is cached or
    /// already in flight. Returns whether a fetch was started.
    pub fn request_detail(&mut self, id: i64) -> bool {
        if id <= 0 {
            warn!(id, "Invalid id for detail fetch");
            return false;
        }
        if self.details.contains(id) || !self.pending_details.insert(id) {
            return false;
        }

        let service = Arc::clone(&self.service);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = service.get_detail(id).await;
            Self::send_result(&tx, BackgroundResult::Detail { id, result }).await;
        });
        true
    }

    /// Warm the cache for `ids`, at most `MAX_CONCURRENT_REQUESTS` at a time.
    /// Returns how many fetches were started.
    pub fn prefetch_details(&mut self, ids: impl IntoIterator<Item = i64>) -> usize {
        let ids: Vec<i64> = ids
            .into_iter()
            .filter(|&id| id > 0 && !self.details.contains(id))
            .filter(|&id| self.pending_details.insert(id))
            .collect();
        if ids.is_empty() {
            return 0;
        }

        let count = ids.len();
        debug!(count, "Prefetching details");
        let service = Arc::clone(&self.service);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            stream::iter(ids)
                .map(|id| {
                    let service = Arc::clone(&service);
                    async move { (id, service.get_detail(id).await) }
                })
                .buffer_unordered(MAX_CONCURRENT_REQUESTS)
                .for_each(|(id, result)| {
                    let tx = tx.clone();
                    async move {
                        Self::send_result(&tx, BackgroundResult::Detail { id, result }).await;
                    }
                })
                .await;
        });
        count
    }

    fn store_detail(&mut self, id: i64, record: DetailRecord) -> &DetailRecord {
        if record.id != id {
            warn!(requested = id, received = record.id, "Detail id mismatch");
        }
        self.details.insert(id, record)
    }

    // ===== Background Results =====

    async fn send_result(tx: &mpsc::Sender<BackgroundResult>, result: BackgroundResult) {
        if tx.send(result).await.is_err() {
            debug!("Controller dropped before background result was delivered");
        }
    }

    /// Apply every background result that is ready, without waiting.
    /// Returns the updates in the order they were applied.
    pub fn check_background_tasks(&mut self) -> Vec<ControllerUpdate> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            results.push(result);
        }
        results
            .into_iter()
            .map(|result| self.process_result(result))
            .collect()
    }

    /// Wait for the next background result and apply it.
    pub async fn next_event(&mut self) -> Option<ControllerUpdate> {
        let result = self.result_rx.recv().await?;
        Some(self.process_result(result))
    }

    fn process_result(&mut self, result: BackgroundResult) -> ControllerUpdate {
        match result {
            BackgroundResult::SearchSettled { epoch } => {
                if self.search_debounce.is_current(epoch) {
                    self.recompute_filter();
                    ControllerUpdate::FilterApplied
                } else {
                    debug!(epoch, "Discarding superseded search");
                    ControllerUpdate::SearchDiscarded
                }
            }
            BackgroundResult::Catalog { generation, result } => {
                if generation != self.catalog_generation {
                    debug!(generation, current = self.catalog_generation, "Discarding stale catalog load");
                    return ControllerUpdate::CatalogDiscarded;
                }
                self.loading = false;
                self.apply_catalog(result)
            }
            BackgroundResult::Detail { id, result } => {
                self.pending_details.remove(&id);
                match result {
                    Ok(record) => {
                        self.store_detail(id, record);
                        ControllerUpdate::DetailLoaded(id)
                    }
                    Err(e) => {
                        warn!(id, error = %e, "Failed to load detail");
                        self.set_error(&e);
                        ControllerUpdate::DetailFailed(id)
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
