use serde::{Deserialize, Serialize};
use std::fmt;

/// A named grouping of meals.
///
/// The name is case-preserving and doubles as the section header and as the
/// key used to fetch the category's meals. Ordering is plain lexical order on
/// the name, which is the order sections are displayed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category {
    name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category { name: name.into() }
    }

    /// Returns the category name exactly as the API reported it.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Category::new(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Payload of `categories.php`.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryRecord>,
}

/// One entry of `categories.php`. Only the name is used; the id, thumbnail
/// and description fields the API also sends are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRecord {
    #[serde(rename = "strCategory")]
    pub name: String,
}

impl CategoriesResponse {
    pub(crate) fn into_categories(self) -> Vec<Category> {
        self.categories
            .into_iter()
            .map(|record| Category::new(record.name))
            .collect()
    }
}
