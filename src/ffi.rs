//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Indices cross the boundary as `u32`; everything returned is an owned copy,
//! so the host never holds a lock on the index.

use crate::browser::{BrowserError, ErrorAlert, LoadObserver, LoadState, LoadSummary, MealBrowser};
use crate::config::{BrowserConfig, ConfigError};
use crate::fetcher::FetchError;
use crate::model::MealSummary;
use crate::transport::{Endpoints, TransportError};
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum MealBrowserError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Index error: {message}")]
    IndexError { message: String },

    #[error("Load cancelled: {message}")]
    Cancelled { message: String },

    #[error("Load in progress: {message}")]
    AlreadyLoading { message: String },
}

impl From<FetchError> for MealBrowserError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(e) => e.into(),
            FetchError::Decode(e) => MealBrowserError::DecodeError {
                message: e.to_string(),
            },
        }
    }
}

impl From<TransportError> for MealBrowserError {
    fn from(e: TransportError) -> Self {
        MealBrowserError::NetworkError {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for MealBrowserError {
    fn from(e: ConfigError) -> Self {
        MealBrowserError::ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<BrowserError> for MealBrowserError {
    fn from(e: BrowserError) -> Self {
        match e {
            BrowserError::Categories(e) => e.into(),
            BrowserError::Transport(e) => e.into(),
            BrowserError::Index(e) => MealBrowserError::IndexError {
                message: e.to_string(),
            },
            BrowserError::Spawn(e) => MealBrowserError::NetworkError {
                message: e.to_string(),
            },
            e @ BrowserError::Cancelled => MealBrowserError::Cancelled {
                message: e.to_string(),
            },
            e @ BrowserError::AlreadyLoading => MealBrowserError::AlreadyLoading {
                message: e.to_string(),
            },
        }
    }
}

/// FFI-safe browser configuration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBrowserConfig {
    /// API root, e.g. `https://www.themealdb.com/api/json/v1/1`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional `User-Agent` header value
    pub user_agent: Option<String>,
}

impl From<BrowserConfig> for FfiBrowserConfig {
    fn from(c: BrowserConfig) -> Self {
        FfiBrowserConfig {
            base_url: c.base_url,
            timeout_secs: c.timeout_secs,
            user_agent: c.user_agent,
        }
    }
}

impl From<FfiBrowserConfig> for BrowserConfig {
    fn from(c: FfiBrowserConfig) -> Self {
        BrowserConfig {
            base_url: c.base_url,
            timeout_secs: c.timeout_secs,
            user_agent: c.user_agent,
        }
    }
}

/// FFI-safe representation of a meal row.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiMealSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

impl From<&MealSummary> for FfiMealSummary {
    fn from(m: &MealSummary) -> Self {
        FfiMealSummary {
            id: m.id.clone(),
            name: m.name.clone(),
            thumbnail: m.thumbnail.clone(),
        }
    }
}

/// One section of the active view with all of its rows.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSection {
    pub title: String,
    pub meals: Vec<FfiMealSummary>,
}

/// FFI-safe summary of a finished load.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiLoadSummary {
    pub category_count: u32,
    pub meal_count: u32,
    /// Categories shown empty because their meals failed to load
    pub failed_categories: Vec<String>,
}

impl From<&LoadSummary> for FfiLoadSummary {
    fn from(s: &LoadSummary) -> Self {
        FfiLoadSummary {
            category_count: s.category_count as u32,
            meal_count: s.meal_count as u32,
            failed_categories: s.failed_categories.clone(),
        }
    }
}

/// The modal to present when loading fails.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiErrorAlert {
    pub title: String,
    pub message: String,
    /// Label of the single dismiss button
    pub action: String,
}

impl From<&ErrorAlert> for FfiErrorAlert {
    fn from(a: &ErrorAlert) -> Self {
        FfiErrorAlert {
            title: a.title.clone(),
            message: a.message.clone(),
            action: a.action.clone(),
        }
    }
}

/// Loading-indicator state. The spinner runs only while `Loading`.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiLoadState {
    Idle,
    Loading,
    Ready { summary: FfiLoadSummary },
    Failed { alert: FfiErrorAlert },
}

impl From<&LoadState> for FfiLoadState {
    fn from(s: &LoadState) -> Self {
        match s {
            LoadState::Idle => FfiLoadState::Idle,
            LoadState::Loading => FfiLoadState::Loading,
            LoadState::Ready(summary) => FfiLoadState::Ready {
                summary: summary.into(),
            },
            LoadState::Failed(alert) => FfiLoadState::Failed {
                alert: alert.into(),
            },
        }
    }
}

/// Implemented by the host to hear when a background load finishes.
///
/// Called on the load thread; hosts hop to their UI thread themselves.
#[uniffi::export(callback_interface)]
pub trait LoadCallback: Send + Sync {
    fn on_ready(&self, summary: FfiLoadSummary);
    fn on_error(&self, alert: FfiErrorAlert);
    fn on_cancelled(&self);
}

struct CallbackObserver(Box<dyn LoadCallback>);

impl LoadObserver for CallbackObserver {
    fn on_ready(&self, summary: &LoadSummary) {
        self.0.on_ready(summary.into());
    }

    fn on_error(&self, alert: &ErrorAlert) {
        self.0.on_error(alert.into());
    }

    fn on_cancelled(&self) {
        self.0.on_cancelled();
    }
}

/// FFI-safe handle to a recipe-browser screen's data.
///
/// Create one per screen; call `cancel` when the screen goes away.
#[derive(uniffi::Object)]
pub struct FfiMealBrowser {
    inner: Arc<MealBrowser>,
}

#[uniffi::export]
impl FfiMealBrowser {
    /// Creates a browser. `None` uses the default TheMealDB configuration.
    #[uniffi::constructor]
    pub fn new(config: Option<FfiBrowserConfig>) -> Result<Arc<Self>, MealBrowserError> {
        let config = match config {
            Some(config) => BrowserConfig::from(config).validated()?,
            None => BrowserConfig::default(),
        };
        let browser = MealBrowser::new(&config)?;
        Ok(Arc::new(FfiMealBrowser::from_browser(browser)))
    }

    /// Loads categories and meals, blocking the calling thread.
    pub fn load(&self) -> Result<FfiLoadSummary, MealBrowserError> {
        let summary = self.inner.load()?;
        Ok((&summary).into())
    }

    /// Loads on a background thread and reports through `callback` once.
    pub fn start_load(&self, callback: Box<dyn LoadCallback>) -> Result<(), MealBrowserError> {
        self.inner.spawn_load(CallbackObserver(callback))?;
        Ok(())
    }

    /// Cancels the load in flight, if any.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn load_state(&self) -> FfiLoadState {
        FfiLoadState::from(&self.inner.load_state())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    /// Filters by category-name prefix. Returns the number of matched sections.
    pub fn apply_query(&self, query: String) -> u32 {
        self.inner.apply_query(&query).len() as u32
    }

    /// Leaves search and shows every category again.
    pub fn clear_query(&self) {
        self.inner.clear_query();
    }

    pub fn is_searching(&self) -> bool {
        self.inner.is_searching()
    }

    pub fn section_count(&self) -> u32 {
        self.inner.section_count() as u32
    }

    pub fn section_title(&self, section: u32) -> Option<String> {
        self.inner.section_title(section as usize)
    }

    pub fn row_count(&self, section: u32) -> u32 {
        self.inner.row_count(section as usize) as u32
    }

    pub fn row_title(&self, section: u32, row: u32) -> Option<String> {
        self.inner.row_title(section as usize, row as usize)
    }

    pub fn meal_at(&self, section: u32, row: u32) -> Option<FfiMealSummary> {
        self.inner
            .meal_at(section as usize, row as usize)
            .map(|m| FfiMealSummary::from(&m))
    }

    /// Meal id for a tapped row.
    pub fn resolve_meal_id(&self, section: u32, row: u32) -> Option<String> {
        self.inner.resolve_meal_id(section as usize, row as usize)
    }

    /// Lookup URL to hand to the detail screen.
    pub fn detail_url(&self, section: u32, row: u32) -> Option<String> {
        self.inner
            .detail_url(section as usize, row as usize)
            .map(|url| url.to_string())
    }

    /// Every section of the active view, for hosts that render in one go.
    pub fn sections(&self) -> Vec<FfiSection> {
        self.inner.with_index(|index| {
            index
                .sections()
                .map(|(category, meals)| FfiSection {
                    title: category.name().to_string(),
                    meals: meals.iter().map(FfiMealSummary::from).collect(),
                })
                .collect()
        })
    }
}

impl FfiMealBrowser {
    fn from_browser(browser: MealBrowser) -> Self {
        FfiMealBrowser {
            inner: Arc::new(browser),
        }
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the default configuration (TheMealDB public API).
#[uniffi::export]
pub fn default_config() -> FfiBrowserConfig {
    BrowserConfig::default().into()
}

/// Parses a YAML configuration document.
#[uniffi::export]
pub fn config_from_yaml(yaml: String) -> Result<FfiBrowserConfig, MealBrowserError> {
    Ok(BrowserConfig::from_yaml_str(&yaml)?.into())
}

/// Builds the detail lookup URL for a meal id.
///
/// # Arguments
/// * `base_url` - API root
/// * `meal_id` - The meal's `idMeal`
#[uniffi::export]
pub fn lookup_url(base_url: String, meal_id: String) -> Result<String, MealBrowserError> {
    let url = Endpoints::new(base_url).lookup(&meal_id)?;
    Ok(url.to_string())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
