use serde::{Deserialize, Serialize};

/// Title of the modal shown when the category list cannot be loaded.
pub const LOADING_ERROR_TITLE: &str = "Loading error";

/// Body of the loading-error modal.
pub const LOADING_ERROR_MESSAGE: &str =
    "There was a problem loading the data; please check your connection and try again.";

/// Label of the modal's only button.
pub const LOADING_ERROR_ACTION: &str = "OK";

/// A user-visible error with one acknowledgement action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAlert {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl ErrorAlert {
    /// The alert for a failed category load. There is no automatic retry;
    /// the user leaves and re-enters the screen.
    pub fn loading_error() -> Self {
        ErrorAlert {
            title: LOADING_ERROR_TITLE.to_string(),
            message: LOADING_ERROR_MESSAGE.to_string(),
            action: LOADING_ERROR_ACTION.to_string(),
        }
    }
}

/// Outcome of a successful load pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub category_count: usize,
    pub meal_count: usize,
    /// Categories shown with no meals because their fetch failed
    pub failed_categories: Vec<String>,
}

impl LoadSummary {
    pub fn is_partial(&self) -> bool {
        !self.failed_categories.is_empty()
    }
}

/// Loading-indicator state of a browser screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(LoadSummary),
    Failed(ErrorAlert),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
