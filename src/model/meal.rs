use serde::{Deserialize, Serialize};

/// Minimal per-meal record used to render a list row.
///
/// `id` is TheMealDB's opaque `idMeal`, unique across the whole dataset and
/// used to build the detail lookup URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Thumbnail image URL, when the API sent one
    #[serde(
        rename = "strMealThumb",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<String>,
}

impl MealSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        MealSummary {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
        }
    }
}

/// Payload of `filter.php?c=...`.
///
/// An unknown category comes back as `{"meals": null}`, which fails to decode
/// here and is handled like any other per-category failure.
#[derive(Debug, Deserialize)]
pub(crate) struct MealsResponse {
    pub meals: Vec<MealSummary>,
}

/// Sorts ascending by meal name. Stable, so equal names keep API order.
pub(crate) fn sort_by_name(meals: &mut [MealSummary]) {
    meals.sort_by(|a, b| a.name.cmp(&b.name));
}
