pub mod browser;
mod cancel;
pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod model;
pub mod search;
pub mod transport;

#[cfg(test)]
mod testing;

pub use browser::{BrowserError, ErrorAlert, LoadObserver, LoadState, LoadSummary, MealBrowser};
pub use cancel::CancelToken;
pub use config::{BrowserConfig, ConfigError};
pub use fetcher::{fetch_categories, fetch_meals, merge_meal_lists, FetchError};
pub use model::{Category, MealSummary};
pub use search::{CategoryIndex, RecipeIndex, SearchView, ViewState};
pub use transport::{Endpoints, HttpTransport, Transport, TransportError};

uniffi::setup_scaffolding!();
