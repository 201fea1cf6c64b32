use crate::model::{sort_by_name, Category, MealSummary};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndexError {
    #[error("{categories} categories but {meal_lists} meal lists")]
    Misaligned { categories: usize, meal_lists: usize },
}

/// The authoritative snapshot: categories and, at the same positions, their
/// meals.
///
/// Construction sorts categories by name (moving each meal list along with
/// its category) and each meal list by meal name, so a `CategoryIndex` is
/// always in display order and always aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    meal_lists: Vec<Vec<MealSummary>>,
}

impl CategoryIndex {
    /// Builds an index from parallel sequences.
    ///
    /// Fails with [`IndexError::Misaligned`] when the lengths differ.
    pub fn new(
        categories: Vec<Category>,
        meal_lists: Vec<Vec<MealSummary>>,
    ) -> Result<Self, IndexError> {
        if categories.len() != meal_lists.len() {
            return Err(IndexError::Misaligned {
                categories: categories.len(),
                meal_lists: meal_lists.len(),
            });
        }
        Ok(Self::from_sections(categories.into_iter().zip(meal_lists)))
    }

    /// Builds an index from `(category, meals)` pairs.
    pub fn from_sections(sections: impl IntoIterator<Item = (Category, Vec<MealSummary>)>) -> Self {
        let mut sections: Vec<_> = sections.into_iter().collect();
        sections.sort_by(|a, b| a.0.cmp(&b.0));

        let mut index = CategoryIndex {
            categories: Vec::with_capacity(sections.len()),
            meal_lists: Vec::with_capacity(sections.len()),
        };
        for (category, mut meals) in sections {
            sort_by_name(&mut meals);
            index.categories.push(category);
            index.meal_lists.push(meals);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn meal_lists(&self) -> &[Vec<MealSummary>] {
        &self.meal_lists
    }

    /// Category and meals at `position`.
    pub fn section(&self, position: usize) -> Option<(&Category, &[MealSummary])> {
        let category = self.categories.get(position)?;
        let meals = self.meal_lists.get(position)?;
        Some((category, meals.as_slice()))
    }

    /// Total number of meals across all categories.
    pub fn meal_count(&self) -> usize {
        self.meal_lists.iter().map(Vec::len).sum()
    }
}

/// Prefix-filtered projection over a [`CategoryIndex`].
///
/// Holds positions into the snapshot it was computed from, in snapshot
/// order. Never updated in place; a new query produces a new view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    query: String,
    positions: Vec<usize>,
}

impl SearchView {
    /// Selects every category whose name starts with `query`.
    ///
    /// Matching is case-sensitive on the leading characters of the name. An
    /// empty query selects every category.
    pub fn compute(query: &str, index: &CategoryIndex) -> Self {
        let positions = index
            .categories()
            .iter()
            .enumerate()
            .filter(|(_, category)| category.name().starts_with(query))
            .map(|(position, _)| position)
            .collect();

        SearchView {
            query: query.to_string(),
            positions,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matched positions in the snapshot.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Resolves the matched categories against `index`.
    pub fn categories<'a>(&self, index: &'a CategoryIndex) -> Vec<&'a Category> {
        self.positions
            .iter()
            .filter_map(|&position| index.categories().get(position))
            .collect()
    }
}

/// Which view the list is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Full authoritative snapshot
    #[default]
    Browsing,
    /// Result of the last query
    Searching(SearchView),
}
