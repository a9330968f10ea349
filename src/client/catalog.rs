//! Fetched food list with local search and view mode

use crate::app::foods::model::{Food, FoodId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    #[default]
    List,
}

/// The last successfully fetched list. Searching and view changes never
/// touch the network.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    foods: Vec<Food>,
    search: String,
    view_mode: ViewMode,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, foods: Vec<Food>) {
        self.foods = foods;
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn find(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|food| food.id == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&Food> {
        self.foods
            .iter()
            .filter(|food| food.matches(&self.search))
            .collect()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = match self.view_mode {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
        self.view_mode
    }
}
