//! Data types shared by the fetchers, the search index and the FFI layer.
//!
//! The `*Response` types mirror TheMealDB JSON payloads and stay crate-private;
//! everything else is the decoded, display-ready form.

mod category;
mod meal;

pub use category::Category;
pub use meal::MealSummary;

pub(crate) use category::CategoriesResponse;
pub(crate) use meal::{sort_by_name, MealsResponse};
