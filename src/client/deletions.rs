//! Tracks which records have a delete in flight

use std::collections::HashSet;

use crate::app::foods::model::FoodId;

#[derive(Debug, Clone, Default)]
pub struct DeleteTracker {
    in_flight: HashSet<FoodId>,
}

impl DeleteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` busy. Returns false if it already was.
    pub fn begin(&mut self, id: FoodId) -> bool {
        self.in_flight.insert(id)
    }

    pub fn finish(&mut self, id: FoodId) {
        self.in_flight.remove(&id);
    }

    pub fn is_deleting(&self, id: FoodId) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tracked_rows_are_busy() {
        let mut tracker = DeleteTracker::new();
        let (a, b) = (FoodId::new(), FoodId::new());

        assert!(tracker.begin(a));
        assert!(!tracker.begin(a));
        assert!(tracker.is_deleting(a));
        assert!(!tracker.is_deleting(b));

        assert!(tracker.begin(b));
        tracker.finish(a);
        assert!(!tracker.is_deleting(a));
        assert_eq!(tracker.len(), 1);
    }
}
