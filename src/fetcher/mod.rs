//! Category and meal fetching.
//!
//! This module turns raw API responses into display-ordered data: the
//! category list sorted by name, and for each category its meals sorted by
//! name. Meal fetches report one `Result` per category so the merge step can
//! decide what a failed category looks like in the index.

use crate::cancel::CancelToken;
use crate::model::{sort_by_name, CategoriesResponse, Category, MealSummary, MealsResponse};
use crate::transport::{Endpoints, Transport, TransportError};
use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when fetching categories or meals.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch data: {0}")]
    Network(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of fetching one category's meals.
pub type MealListResult = Result<Vec<MealSummary>, FetchError>;

fn fetch_json<T: DeserializeOwned>(transport: &dyn Transport, url: &Url) -> Result<T, FetchError> {
    let body = transport.get(url)?;
    Ok(serde_json::from_slice(&body)?)
}

/// Fetches every category, sorted ascending by name.
///
/// Sorting is case-sensitive lexical order. No deduplication is done; the
/// API already reports each category once.
///
/// # Returns
///
/// The full sorted list, or a `FetchError` if the request or decoding failed.
/// A partial list is never returned.
///
/// # Examples
///
/// ```no_run
/// use mealdb_browse::{fetch_categories, Endpoints, HttpTransport, BrowserConfig};
///
/// let transport = HttpTransport::new(&BrowserConfig::default())?;
/// let categories = fetch_categories(&transport, &Endpoints::default())?;
/// for category in &categories {
///     println!("{category}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn fetch_categories(
    transport: &dyn Transport,
    endpoints: &Endpoints,
) -> Result<Vec<Category>, FetchError> {
    let url = endpoints.categories()?;
    let response: CategoriesResponse = fetch_json(transport, &url)?;

    let mut categories = response.into_categories();
    categories.sort();
    debug!("Fetched {} categories", categories.len());
    Ok(categories)
}

/// Fetches the meals of a single category, sorted ascending by meal name.
pub fn fetch_category_meals(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    category: &Category,
) -> MealListResult {
    let url = endpoints.filter_by_category(category)?;
    let response: MealsResponse = fetch_json(transport, &url)?;

    let mut meals = response.meals;
    sort_by_name(&mut meals);
    debug!("Fetched {} meals for {category}", meals.len());
    Ok(meals)
}

/// Fetches meals for each category, one request per category, in order.
///
/// The result is index-aligned with `categories`: entry `i` is the outcome
/// for `categories[i]`, failures included.
pub fn fetch_meals(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    categories: &[Category],
) -> Vec<MealListResult> {
    categories
        .iter()
        .map(|category| fetch_category_meals(transport, endpoints, category))
        .collect()
}

/// Like [`fetch_meals`], but checks `cancel` before every request.
///
/// Returns `None` as soon as cancellation is observed; results fetched so
/// far are dropped.
pub fn fetch_meals_cancellable(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    categories: &[Category],
    cancel: &CancelToken,
) -> Option<Vec<MealListResult>> {
    let mut results = Vec::with_capacity(categories.len());
    for category in categories {
        if cancel.is_cancelled() {
            debug!("Meal fetch cancelled before {category}");
            return None;
        }
        results.push(fetch_category_meals(transport, endpoints, category));
    }
    Some(results)
}

/// Meal lists ready to install next to their categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedMeals {
    /// One list per category, same order as the categories
    pub meal_lists: Vec<Vec<MealSummary>>,
    /// Categories whose fetch failed and got an empty list
    pub failed: Vec<Category>,
}

/// Merges per-category results into lists aligned with `categories`.
///
/// A failed category contributes an empty list rather than being skipped, so
/// `meal_lists.len() == categories.len()` always holds. Failures are logged
/// and collected in [`MergedMeals::failed`]; none of them is fatal.
pub fn merge_meal_lists(categories: &[Category], results: Vec<MealListResult>) -> MergedMeals {
    let mut merged = MergedMeals {
        meal_lists: Vec::with_capacity(categories.len()),
        failed: Vec::new(),
    };
    let mut results = results.into_iter();

    for category in categories {
        match results.next() {
            Some(Ok(meals)) => merged.meal_lists.push(meals),
            Some(Err(e)) => {
                warn!("Failed to load meals for {category}: {e}");
                merged.meal_lists.push(Vec::new());
                merged.failed.push(category.clone());
            }
            None => {
                warn!("No meal result for {category}");
                merged.meal_lists.push(Vec::new());
                merged.failed.push(category.clone());
            }
        }
    }

    merged
}
