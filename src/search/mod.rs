//! The merge/search index behind the sectioned list.
//!
//! [`RecipeIndex`] owns the authoritative [`CategoryIndex`] and the current
//! [`ViewState`]. Every presentation accessor goes through the active view, so
//! section `i` means "the i-th matched category" while searching and "the
//! i-th category" while browsing.

use crate::model::{Category, MealSummary};

mod model;

pub use model::{CategoryIndex, IndexError, SearchView, ViewState};

#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    snapshot: CategoryIndex,
    view: ViewState,
}

impl RecipeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new authoritative snapshot in one step.
    ///
    /// An active search is recomputed against the new snapshot so the view
    /// never points into a replaced one.
    pub fn load(&mut self, snapshot: CategoryIndex) {
        self.snapshot = snapshot;
        if let ViewState::Searching(view) = &self.view {
            let refreshed = SearchView::compute(view.query(), &self.snapshot);
            self.view = ViewState::Searching(refreshed);
        }
    }

    /// Filters by name prefix and switches to the search view.
    pub fn apply_query(&mut self, query: &str) -> SearchView {
        let view = SearchView::compute(query, &self.snapshot);
        self.view = ViewState::Searching(view.clone());
        view
    }

    /// Back to browsing the full snapshot.
    pub fn clear_query(&mut self) {
        self.view = ViewState::Browsing;
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.view, ViewState::Searching(_))
    }

    pub fn snapshot(&self) -> &CategoryIndex {
        &self.snapshot
    }

    /// Maps a section of the active view to a snapshot position.
    fn position(&self, section: usize) -> Option<usize> {
        match &self.view {
            ViewState::Browsing => (section < self.snapshot.len()).then_some(section),
            ViewState::Searching(view) => view.positions().get(section).copied(),
        }
    }

    pub fn section_count(&self) -> usize {
        match &self.view {
            ViewState::Browsing => self.snapshot.len(),
            ViewState::Searching(view) => view.len(),
        }
    }

    pub fn section_category(&self, section: usize) -> Option<&Category> {
        let (category, _) = self.snapshot.section(self.position(section)?)?;
        Some(category)
    }

    pub fn section_title(&self, section: usize) -> Option<&str> {
        self.section_category(section).map(Category::name)
    }

    pub fn section_meals(&self, section: usize) -> Option<&[MealSummary]> {
        let (_, meals) = self.snapshot.section(self.position(section)?)?;
        Some(meals)
    }

    /// Number of rows in `section`; zero for a section that does not exist.
    pub fn row_count(&self, section: usize) -> usize {
        self.section_meals(section).map_or(0, <[MealSummary]>::len)
    }

    pub fn meal_at(&self, section: usize, row: usize) -> Option<&MealSummary> {
        self.section_meals(section)?.get(row)
    }

    pub fn row_title(&self, section: usize, row: usize) -> Option<&str> {
        self.meal_at(section, row).map(|meal| meal.name.as_str())
    }

    /// Meal id behind a tapped row, for detail navigation.
    pub fn resolve_meal_id(&self, section: usize, row: usize) -> Option<&str> {
        self.meal_at(section, row).map(|meal| meal.id.as_str())
    }

    /// Sections of the active view, in display order.
    pub fn sections(&self) -> impl Iterator<Item = (&Category, &[MealSummary])> + '_ {
        (0..self.section_count()).filter_map(move |section| {
            self.snapshot.section(self.position(section)?)
        })
    }
}
