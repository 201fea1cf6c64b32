//! The screen-level controller.
//!
//! A [`MealBrowser`] runs one load pass per screen: fetch categories, then
//! fetch meals for exactly those categories, then install the merged
//! snapshot, then report. The stages never overlap, and the loading state
//! stays `Loading` until the last one is done.

use crate::cancel::CancelToken;
use crate::config::BrowserConfig;
use crate::fetcher::{fetch_categories, fetch_meals_cancellable, merge_meal_lists, FetchError};
use crate::model::MealSummary;
use crate::search::{CategoryIndex, IndexError, RecipeIndex, SearchView};
use crate::transport::{Endpoints, HttpTransport, Transport, TransportError};
use log::{debug, error, info, warn};
use reqwest::Url;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use thiserror::Error;

mod state;

pub use state::{ErrorAlert, LoadState, LoadSummary};

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to load categories: {0}")]
    Categories(#[from] FetchError),

    #[error("Failed to build index: {0}")]
    Index(#[from] IndexError),

    #[error("Failed to create HTTP transport: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to start load thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Load was cancelled")]
    Cancelled,

    #[error("A load is already in progress")]
    AlreadyLoading,
}

/// Receives the single terminal notification of a background load.
pub trait LoadObserver: Send {
    fn on_ready(&self, summary: &LoadSummary);

    fn on_error(&self, alert: &ErrorAlert);

    fn on_cancelled(&self) {}
}

/// Data source for one recipe-browser screen.
///
/// # Examples
///
/// ```no_run
/// use mealdb_browse::{BrowserConfig, MealBrowser};
///
/// let browser = MealBrowser::new(&BrowserConfig::default())?;
/// let summary = browser.load()?;
/// println!("{} categories, {} meals", summary.category_count, summary.meal_count);
///
/// browser.apply_query("Be");
/// for section in 0..browser.section_count() {
///     println!("{:?}", browser.section_title(section));
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MealBrowser {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    index: RwLock<RecipeIndex>,
    state: Mutex<LoadState>,
    cancel: Mutex<CancelToken>,
}

impl MealBrowser {
    /// Creates a browser that talks to the configured API over HTTP.
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            Endpoints::from_config(config),
        ))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        MealBrowser {
            transport,
            endpoints,
            index: RwLock::new(RecipeIndex::new()),
            state: Mutex::new(LoadState::Idle),
            cancel: Mutex::new(CancelToken::new()),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Runs a full load pass on the calling thread.
    ///
    /// On failure the index keeps its previous contents and the load state
    /// becomes [`LoadState::Failed`] (or [`LoadState::Idle`] if cancelled).
    pub fn load(&self) -> Result<LoadSummary, BrowserError> {
        let cancel = self.begin()?;
        let result = self.run_pass(&cancel);
        self.finish(&result);
        result
    }

    /// Runs a full load pass on a background thread.
    ///
    /// `observer` is called exactly once, after both fetch stages and the
    /// install have finished (or the pass failed or was cancelled).
    pub fn spawn_load<O>(self: &Arc<Self>, observer: O) -> Result<JoinHandle<()>, BrowserError>
    where
        O: LoadObserver + 'static,
    {
        let cancel = self.begin()?;
        let browser = Arc::clone(self);

        let spawned = thread::Builder::new()
            .name("mealdb-load".to_string())
            .spawn(move || {
                let result = browser.run_pass(&cancel);
                browser.finish(&result);
                match result {
                    Ok(summary) => observer.on_ready(&summary),
                    Err(BrowserError::Cancelled) => observer.on_cancelled(),
                    Err(_) => observer.on_error(&ErrorAlert::loading_error()),
                }
            });

        spawned.map_err(|e| {
            *self.lock_state() = LoadState::Idle;
            BrowserError::Spawn(e)
        })
    }

    /// Cancels the pass in flight, if any. Nothing is installed.
    pub fn cancel(&self) {
        self.lock_cancel().cancel();
    }

    pub fn load_state(&self) -> LoadState {
        self.lock_state().clone()
    }

    /// True while the loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    fn begin(&self) -> Result<CancelToken, BrowserError> {
        let mut state = self.lock_state();
        if state.is_loading() {
            return Err(BrowserError::AlreadyLoading);
        }
        *state = LoadState::Loading;

        let token = CancelToken::new();
        *self.lock_cancel() = token.clone();
        Ok(token)
    }

    fn run_pass(&self, cancel: &CancelToken) -> Result<LoadSummary, BrowserError> {
        debug!("Loading categories from {}", self.endpoints.base_url());
        let categories = fetch_categories(self.transport.as_ref(), &self.endpoints)
            .inspect_err(|e| error!("Failed to load categories: {e}"))?;

        if cancel.is_cancelled() {
            warn!("Load cancelled after fetching categories");
            return Err(BrowserError::Cancelled);
        }

        debug!("Loading meals for {} categories", categories.len());
        let results =
            fetch_meals_cancellable(self.transport.as_ref(), &self.endpoints, &categories, cancel)
                .ok_or_else(|| {
                    warn!("Load cancelled while fetching meals");
                    BrowserError::Cancelled
                })?;

        let merged = merge_meal_lists(&categories, results);
        let failed_categories = merged.failed.iter().map(|c| c.name().to_string()).collect();
        let snapshot = CategoryIndex::new(categories, merged.meal_lists)?;

        let summary = LoadSummary {
            category_count: snapshot.len(),
            meal_count: snapshot.meal_count(),
            failed_categories,
        };

        {
            let mut index = self.write_index();
            if cancel.is_cancelled() {
                warn!("Load cancelled before install");
                return Err(BrowserError::Cancelled);
            }
            index.load(snapshot);
        }

        info!(
            "Loaded {} categories with {} meals ({} failed)",
            summary.category_count,
            summary.meal_count,
            summary.failed_categories.len()
        );
        Ok(summary)
    }

    fn finish(&self, result: &Result<LoadSummary, BrowserError>) {
        *self.lock_state() = match result {
            Ok(summary) => LoadState::Ready(summary.clone()),
            Err(BrowserError::Cancelled) => LoadState::Idle,
            Err(_) => LoadState::Failed(ErrorAlert::loading_error()),
        };
    }

    /// Filters sections by category-name prefix.
    pub fn apply_query(&self, query: &str) -> SearchView {
        self.write_index().apply_query(query)
    }

    pub fn clear_query(&self) {
        self.write_index().clear_query();
    }

    pub fn is_searching(&self) -> bool {
        self.read_index().is_searching()
    }

    /// Runs `f` against a consistent view of the index.
    pub fn with_index<R>(&self, f: impl FnOnce(&RecipeIndex) -> R) -> R {
        f(&self.read_index())
    }

    pub fn section_count(&self) -> usize {
        self.read_index().section_count()
    }

    pub fn section_title(&self, section: usize) -> Option<String> {
        self.read_index().section_title(section).map(str::to_string)
    }

    pub fn row_count(&self, section: usize) -> usize {
        self.read_index().row_count(section)
    }

    pub fn row_title(&self, section: usize, row: usize) -> Option<String> {
        self.read_index().row_title(section, row).map(str::to_string)
    }

    pub fn meal_at(&self, section: usize, row: usize) -> Option<MealSummary> {
        self.read_index().meal_at(section, row).cloned()
    }

    pub fn resolve_meal_id(&self, section: usize, row: usize) -> Option<String> {
        self.read_index()
            .resolve_meal_id(section, row)
            .map(str::to_string)
    }

    /// Lookup URL for the detail screen of the meal at `(section, row)`.
    pub fn detail_url(&self, section: usize, row: usize) -> Option<Url> {
        let meal_id = self.resolve_meal_id(section, row)?;
        self.endpoints.lookup(&meal_id).ok()
    }

    fn read_index(&self) -> RwLockReadGuard<'_, RecipeIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, RecipeIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_state(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancelToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::testing::{categories_url, filter_url, FakeTransport};
    use std::sync::mpsc;
    use std::time::Duration;

    fn browser(transport: FakeTransport) -> (Arc<FakeTransport>, Arc<MealBrowser>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let transport = Arc::new(transport);
        let browser = MealBrowser::with_transport(transport.clone(), Endpoints::default());
        (transport, Arc::new(browser))
    }

    fn full_transport() -> FakeTransport {
        FakeTransport::new()
            .with_categories(&["Dessert", "Beef", "Breakfast"])
            .with_meals("Beef", &[("2", "Zebra Stew"), ("1", "Apple Beef")])
            .with_meals("Breakfast", &[("20", "English Breakfast")])
            .with_meals("Dessert", &[("10", "Tarte Tatin"), ("11", "Apple Frangipan Tart")])
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Ready(LoadSummary),
        Error(ErrorAlert),
        Cancelled,
    }

    struct ChannelObserver(mpsc::Sender<Event>);

    impl LoadObserver for ChannelObserver {
        fn on_ready(&self, summary: &LoadSummary) {
            self.0.send(Event::Ready(summary.clone())).unwrap();
        }

        fn on_error(&self, alert: &ErrorAlert) {
            self.0.send(Event::Error(alert.clone())).unwrap();
        }

        fn on_cancelled(&self) {
            self.0.send(Event::Cancelled).unwrap();
        }
    }

    #[test]
    fn test_load_installs_sorted_snapshot() {
        let (_, browser) = browser(full_transport());

        let summary = browser.load().unwrap();
        assert_eq!(summary.category_count, 3);
        assert_eq!(summary.meal_count, 5);
        assert!(summary.failed_categories.is_empty());
        assert_eq!(browser.load_state(), LoadState::Ready(summary));

        let titles: Vec<String> = (0..browser.section_count())
            .filter_map(|s| browser.section_title(s))
            .collect();
        assert_eq!(titles, vec!["Beef", "Breakfast", "Dessert"]);
        assert_eq!(browser.row_title(0, 0).as_deref(), Some("Apple Beef"));
        assert_eq!(browser.row_title(0, 1).as_deref(), Some("Zebra Stew"));
    }

    #[test]
    fn test_category_failure_leaves_index_empty() {
        let (transport, browser) =
            browser(FakeTransport::new().with_status(categories_url(), 503));

        let result = browser.load();
        assert!(matches!(result, Err(BrowserError::Categories(_))));
        assert_eq!(
            browser.load_state(),
            LoadState::Failed(ErrorAlert::loading_error())
        );
        assert_eq!(browser.section_count(), 0);
        // Meal fetch never started.
        assert_eq!(transport.requests(), vec![categories_url().to_string()]);
    }

    #[test]
    fn test_category_failure_emits_one_error() {
        let (transport, browser) = browser(
            FakeTransport::new().with_body(categories_url(), r#"{"categories": "nope"}"#),
        );
        let (tx, rx) = mpsc::channel();

        browser
            .spawn_load(ChannelObserver(tx))
            .unwrap()
            .join()
            .unwrap();

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events, vec![Event::Error(ErrorAlert::loading_error())]);
        assert_eq!(browser.section_count(), 0);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_failed_category_keeps_alignment() {
        let transport = FakeTransport::new()
            .with_categories(&["Goat", "Beef"])
            .with_meals("Beef", &[("1", "Beef Stew")])
            .with_status(filter_url("Goat"), 500);
        let (_, browser) = browser(transport);

        let summary = browser.load().unwrap();
        assert_eq!(summary.failed_categories, vec!["Goat".to_string()]);

        browser.with_index(|index| {
            let snapshot = index.snapshot();
            assert_eq!(snapshot.categories().len(), snapshot.meal_lists().len());
        });
        assert_eq!(browser.section_title(1).as_deref(), Some("Goat"));
        assert_eq!(browser.row_count(1), 0);
    }

    #[test]
    fn test_slow_categories_still_ordered() {
        let transport = full_transport().with_delay(categories_url(), Duration::from_millis(150));
        let (transport, browser) = browser(transport);
        let (tx, rx) = mpsc::channel();

        let handle = browser.spawn_load(ChannelObserver(tx)).unwrap();
        assert!(browser.is_loading());
        assert_eq!(browser.section_count(), 0);
        handle.join().unwrap();

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Event::Ready(summary) if summary.category_count == 3));
        assert!(!browser.is_loading());

        // Every category was requested, and only after the category list arrived.
        let expected: Vec<String> = std::iter::once(categories_url().to_string())
            .chain(
                ["Beef", "Breakfast", "Dessert"]
                    .iter()
                    .map(|c| filter_url(c).to_string()),
            )
            .collect();
        assert_eq!(transport.requests(), expected);
        assert_eq!(browser.section_count(), 3);
        assert_eq!(browser.row_count(2), 2);
    }

    #[test]
    fn test_second_load_rejected_while_loading() {
        let transport = full_transport().with_delay(categories_url(), Duration::from_millis(150));
        let (_, browser) = browser(transport);
        let (tx, _rx) = mpsc::channel();

        let handle = browser.spawn_load(ChannelObserver(tx)).unwrap();
        assert!(matches!(browser.load(), Err(BrowserError::AlreadyLoading)));
        handle.join().unwrap();

        assert!(matches!(browser.load_state(), LoadState::Ready(_)));
    }

    #[test]
    fn test_cancel_installs_nothing() {
        let transport = full_transport().with_delay(categories_url(), Duration::from_millis(150));
        let (transport, browser) = browser(transport);
        let (tx, rx) = mpsc::channel();

        let handle = browser.spawn_load(ChannelObserver(tx)).unwrap();
        browser.cancel();
        handle.join().unwrap();

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events, vec![Event::Cancelled]);
        assert_eq!(browser.load_state(), LoadState::Idle);
        assert_eq!(browser.section_count(), 0);
        assert_eq!(transport.requests(), vec![categories_url().to_string()]);
    }

    #[test]
    fn test_stale_cancel_does_not_affect_next_load() {
        let (_, browser) = browser(full_transport());
        browser.cancel();

        // A stale cancellation does not leak into the next pass.
        assert!(browser.load().is_ok());
        assert_eq!(browser.section_count(), 3);
    }

    #[test]
    fn test_search_after_load() {
        let (_, browser) = browser(full_transport());
        browser.load().unwrap();

        let view = browser.apply_query("B");
        assert_eq!(view.len(), 2);
        assert!(browser.is_searching());
        assert_eq!(browser.section_title(1).as_deref(), Some("Breakfast"));
        assert_eq!(browser.resolve_meal_id(1, 0).as_deref(), Some("20"));

        browser.clear_query();
        assert!(!browser.is_searching());
        assert_eq!(browser.section_count(), 3);
    }

    #[test]
    fn test_search_during_load_is_refreshed() {
        let transport = full_transport().with_delay(categories_url(), Duration::from_millis(100));
        let (_, browser) = browser(transport);
        let (tx, _rx) = mpsc::channel();

        let handle = browser.spawn_load(ChannelObserver(tx)).unwrap();
        assert!(browser.apply_query("D").is_empty());
        handle.join().unwrap();

        assert!(browser.is_searching());
        assert_eq!(browser.section_count(), 1);
        assert_eq!(browser.section_title(0).as_deref(), Some("Dessert"));
    }

    #[test]
    fn test_detail_url() {
        let (_, browser) = browser(full_transport());
        browser.load().unwrap();

        let url = browser.detail_url(0, 0).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.themealdb.com/api/json/v1/1/lookup.php?i=1"
        );
        assert!(browser.detail_url(9, 0).is_none());
    }

    #[test]
    fn test_meal_at() {
        let (_, browser) = browser(full_transport());
        browser.load().unwrap();

        let meal = browser.meal_at(2, 1).unwrap();
        assert_eq!(meal, MealSummary::new("10", "Tarte Tatin"));
        assert_eq!(
            browser.with_index(|index| index.section_category(2).cloned()),
            Some(Category::from("Dessert"))
        );
    }
}
