//! Client controller tying the catalog, form and delete tracking to a `FoodsApi`
//!
//! Each action comes in two halves around the network call: `begin_*`
//! enters the busy state (loading, submitting, or a row marked deleting)
//! and `complete_*` applies the outcome. Between the halves the busy state
//! is observable and everything else stays usable, e.g. other rows can be
//! deleted while one delete is in flight. `load`, `submit` and `delete`
//! run both halves back to back.

use tracing::{error, warn};

use super::{
    api::{ClientError, FoodsApi},
    catalog::Catalog,
    deletions::DeleteTracker,
    form::{FoodForm, FormError, Submission},
    notice::Notices,
};
use crate::app::foods::model::{Food, FoodId};
use crate::core::error::NOT_CONFIGURED_MESSAGE;

pub const CONNECTION_ERROR: &str = "Connection error. Please check your database configuration.";

/// Every successful mutation is followed by a full re-fetch; the list is
/// never patched locally.
pub struct Dashboard<A> {
    api: A,
    pub catalog: Catalog,
    pub form: FoodForm,
    pub deletions: DeleteTracker,
    pub notices: Notices,
    loading: bool,
}

impl<A: FoodsApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            catalog: Catalog::new(),
            form: FoodForm::new(),
            deletions: DeleteTracker::new(),
            notices: Notices::default(),
            loading: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches the full list. On failure the current list is kept.
    pub async fn load(&mut self) -> bool {
        self.begin_load();
        let result = self.api.list().await;
        self.complete_load(result)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn complete_load(&mut self, result: Result<Vec<Food>, ClientError>) -> bool {
        self.loading = false;
        match result {
            Ok(foods) => {
                self.catalog.replace(foods);
                true
            }
            Err(err) => {
                error!("error loading foods: {}", err);
                self.report(&err, "Failed to load foods");
                false
            }
        }
    }

    /// Loads the record with `id` from the fetched list into the form.
    pub fn edit(&mut self, id: FoodId) -> Result<bool, FormError> {
        match self.catalog.find(id).cloned() {
            Some(food) => self.form.edit(&food).map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn submit(&mut self) -> Result<bool, FormError> {
        let submission = self.begin_submit()?;
        let result = self.send(&submission).await;
        Ok(self.complete_submit(&submission, result).await)
    }

    /// Puts the form into `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        self.form.begin_submit()
    }

    pub async fn send(&self, submission: &Submission) -> Result<(), ClientError> {
        match submission {
            Submission::Create(food) => self.api.create(food).await.map(|_| ()),
            Submission::Update(id, patch) => self.api.update(*id, patch).await,
        }
    }

    /// Leaves `Submitting`; on success clears the form and re-fetches.
    pub async fn complete_submit(
        &mut self,
        submission: &Submission,
        result: Result<(), ClientError>,
    ) -> bool {
        match result {
            Ok(()) => {
                self.form.finish_submit(true);
                self.notices.success(match submission {
                    Submission::Create(_) => "Food added successfully!",
                    Submission::Update(..) => "Food updated successfully!",
                });
                self.load().await;
                true
            }
            Err(err) => {
                error!("error saving food: {}", err);
                self.form.finish_submit(false);
                self.report(&err, "Failed to save food");
                false
            }
        }
    }

    pub async fn delete(&mut self, id: FoodId) -> bool {
        let Some(id) = self.begin_delete(id) else {
            return false;
        };
        let result = self.api.delete(id).await;
        self.complete_delete(id, result).await
    }

    /// Marks `id` busy. `None` if a delete for it is already in flight.
    pub fn begin_delete(&mut self, id: FoodId) -> Option<FoodId> {
        if self.deletions.begin(id) {
            Some(id)
        } else {
            warn!(%id, "delete already in flight");
            None
        }
    }

    /// Clears the busy mark for `id`; on success re-fetches.
    pub async fn complete_delete(&mut self, id: FoodId, result: Result<(), ClientError>) -> bool {
        self.deletions.finish(id);
        match result {
            Ok(()) => {
                self.notices.success("Food deleted successfully!");
                self.load().await;
                true
            }
            Err(err) => {
                error!("error deleting food: {}", err);
                match err {
                    ClientError::Connection(_) => self.notices.error(CONNECTION_ERROR),
                    ClientError::Api { .. } => self.notices.error("Failed to delete food"),
                }
                false
            }
        }
    }

    fn report(&mut self, err: &ClientError, fallback: &str) {
        if err.is_not_configured() {
            self.notices.error(NOT_CONFIGURED_MESSAGE);
        } else if let ClientError::Connection(_) = err {
            self.notices.error(CONNECTION_ERROR);
        } else {
            self.notices.error(fallback);
        }
    }
}
