#![cfg(feature = "client")]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use food_catalog::{
    client::{
        api::ApiErrorBody,
        dashboard::CONNECTION_ERROR,
        form::{Field, FormState},
        notice::NoticeLevel,
        ClientError, Dashboard, FoodsApi,
    },
    core::error::{NOT_CONFIGURED_ERROR, NOT_CONFIGURED_MESSAGE},
    infrastructure::memory::MemoryFoodStore,
    Food, FoodId, FoodPatch, FoodStore, NewFood,
};

#[derive(Debug, Clone, Copy)]
enum Failure {
    Connection,
    NotConfigured,
    Server,
}

impl Failure {
    fn error(self) -> ClientError {
        let api = |error: &str| ClientError::Api {
            status: 500,
            body: ApiErrorBody {
                error: error.to_string(),
                message: None,
                details: None,
            },
        };
        match self {
            Failure::Connection => ClientError::Connection("connection refused".to_string()),
            Failure::NotConfigured => api(NOT_CONFIGURED_ERROR),
            Failure::Server => api("Failed to create food"),
        }
    }
}

#[derive(Default)]
struct Inner {
    store: MemoryFoodStore,
    list_calls: AtomicUsize,
    failure: Mutex<Option<Failure>>,
}

/// In-process stand-in for the HTTP client.
#[derive(Clone, Default)]
struct FakeApi(Arc<Inner>);

impl FakeApi {
    fn fail_with(&self, failure: Option<Failure>) {
        *self.0.failure.lock().unwrap() = failure;
    }

    fn list_calls(&self) -> usize {
        self.0.list_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ClientError> {
        match *self.0.failure.lock().unwrap() {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FoodsApi for FakeApi {
    async fn list(&self) -> Result<Vec<Food>, ClientError> {
        self.0.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.store.list().await.unwrap())
    }

    async fn create(&self, food: &NewFood) -> Result<Food, ClientError> {
        self.check()?;
        let id = self.0.store.insert(food).await.unwrap();
        Ok(Food::new(id, food.clone()))
    }

    async fn update(&self, id: FoodId, patch: &FoodPatch) -> Result<(), ClientError> {
        self.check()?;
        self.0.store.update(id, patch).await.unwrap();
        Ok(())
    }

    async fn delete(&self, id: FoodId) -> Result<(), ClientError> {
        self.check()?;
        self.0.store.delete(id).await.unwrap();
        Ok(())
    }
}

fn fill(dashboard: &mut Dashboard<FakeApi>, name: &str, price: &str, category: &str) {
    dashboard.form.set(Field::Name, name).unwrap();
    dashboard.form.set(Field::Price, price).unwrap();
    dashboard.form.set(Field::Category, category).unwrap();
    dashboard.form.set(Field::Description, "Tasty").unwrap();
}

async fn seeded() -> (FakeApi, Dashboard<FakeApi>) {
    let api = FakeApi::default();
    let mut dashboard = Dashboard::new(api.clone());
    fill(&mut dashboard, "Pizza", "9.5", "Italian");
    assert!(dashboard.submit().await.unwrap());
    fill(&mut dashboard, "Ramen", "12", "Japanese");
    assert!(dashboard.submit().await.unwrap());
    dashboard.notices.clear();
    (api, dashboard)
}

#[tokio::test]
async fn create_refetches_and_resets_form() {
    let api = FakeApi::default();
    let mut dashboard = Dashboard::new(api.clone());

    fill(&mut dashboard, "Pizza", "9.5", "Italian");
    assert_eq!(dashboard.form.state(), FormState::Composing);
    assert!(dashboard.submit().await.unwrap());

    assert_eq!(dashboard.form.state(), FormState::Idle);
    assert_eq!(api.list_calls(), 1);
    assert_eq!(dashboard.catalog.foods().len(), 1);
    assert_eq!(dashboard.catalog.foods()[0].price, 9.5);
    let notice = dashboard.notices.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.text, "Food added successfully!");
}

#[tokio::test]
async fn search_never_calls_the_api() {
    let (api, mut dashboard) = seeded().await;
    let calls = api.list_calls();

    dashboard.catalog.set_search("japan");
    let names: Vec<_> = dashboard
        .catalog
        .filtered()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, ["Ramen"]);
    dashboard.catalog.toggle_view_mode();

    assert_eq!(api.list_calls(), calls);
}

#[tokio::test]
async fn edit_submits_update() {
    let (_api, mut dashboard) = seeded().await;
    let id = dashboard.catalog.foods()[0].id;

    assert!(dashboard.edit(id).unwrap());
    assert_eq!(dashboard.form.state(), FormState::Editing);
    dashboard.form.set(Field::Price, "10").unwrap();
    assert!(dashboard.submit().await.unwrap());

    assert_eq!(dashboard.form.state(), FormState::Idle);
    let food = dashboard.catalog.find(id).unwrap();
    assert_eq!(food.price, 10.0);
    assert_eq!(food.name, "Pizza");
    assert_eq!(
        dashboard.notices.latest().unwrap().text,
        "Food updated successfully!"
    );

    assert!(!dashboard.edit(FoodId::new()).unwrap());
}

#[tokio::test]
async fn failed_submit_keeps_form_for_retry() {
    let (api, mut dashboard) = seeded().await;
    let calls = api.list_calls();
    api.fail_with(Some(Failure::Server));

    fill(&mut dashboard, "Tacos", "7", "Mexican");
    assert!(!dashboard.submit().await.unwrap());

    assert_eq!(dashboard.form.state(), FormState::Composing);
    assert_eq!(dashboard.form.fields().name, "Tacos");
    assert_eq!(dashboard.notices.latest().unwrap().text, "Failed to save food");
    assert_eq!(api.list_calls(), calls);

    api.fail_with(None);
    assert!(dashboard.submit().await.unwrap());
    assert_eq!(dashboard.catalog.foods().len(), 3);
}

#[tokio::test]
async fn failed_load_keeps_current_list() {
    let (api, mut dashboard) = seeded().await;

    api.fail_with(Some(Failure::NotConfigured));
    assert!(!dashboard.load().await);
    assert_eq!(dashboard.catalog.foods().len(), 2);
    assert_eq!(dashboard.notices.latest().unwrap().text, NOT_CONFIGURED_MESSAGE);
    assert!(!dashboard.is_loading());

    api.fail_with(Some(Failure::Connection));
    assert!(!dashboard.load().await);
    assert_eq!(dashboard.notices.latest().unwrap().text, CONNECTION_ERROR);
}

#[tokio::test]
async fn delete_tracks_in_flight_ids_and_refetches() {
    let (api, mut dashboard) = seeded().await;
    let id = dashboard.catalog.foods()[0].id;

    api.fail_with(Some(Failure::Server));
    assert!(!dashboard.delete(id).await);
    assert_eq!(dashboard.notices.latest().unwrap().text, "Failed to delete food");
    assert!(dashboard.deletions.is_empty());
    assert_eq!(dashboard.catalog.foods().len(), 2);

    api.fail_with(None);
    assert!(dashboard.delete(id).await);
    assert!(dashboard.deletions.is_empty());
    assert!(dashboard.catalog.find(id).is_none());
    assert_eq!(
        dashboard.notices.latest().unwrap().text,
        "Food deleted successfully!"
    );
}

#[tokio::test]
async fn delete_in_flight_marks_only_that_row() {
    let (api, mut dashboard) = seeded().await;
    let a = dashboard.catalog.foods()[0].id;
    let b = dashboard.catalog.foods()[1].id;

    assert_eq!(dashboard.begin_delete(a), Some(a));
    assert!(dashboard.deletions.is_deleting(a));
    assert!(!dashboard.deletions.is_deleting(b));
    assert_eq!(dashboard.begin_delete(a), None);
    assert!(!dashboard.delete(a).await);

    assert!(dashboard.edit(b).unwrap());
    dashboard.form.cancel().unwrap();
    assert!(dashboard.delete(b).await);
    assert!(dashboard.deletions.is_deleting(a));

    let result = dashboard.api().delete(a).await;
    assert!(dashboard.complete_delete(a, result).await);
    assert!(dashboard.deletions.is_empty());
    assert!(dashboard.catalog.foods().is_empty());
    assert!(api.list_calls() > 0);
}

#[tokio::test]
async fn submitting_state_is_visible_while_request_is_pending() {
    let api = FakeApi::default();
    let mut dashboard = Dashboard::new(api.clone());
    fill(&mut dashboard, "Pizza", "9.5", "Italian");

    let submission = dashboard.begin_submit().unwrap();
    assert_eq!(dashboard.form.state(), FormState::Submitting);
    assert!(dashboard.begin_submit().is_err());

    let result = dashboard.send(&submission).await;
    assert_eq!(dashboard.form.state(), FormState::Submitting);
    assert!(dashboard.complete_submit(&submission, result).await);
    assert_eq!(dashboard.form.state(), FormState::Idle);
    assert_eq!(dashboard.catalog.foods().len(), 1);
}

#[tokio::test]
async fn loading_flag_spans_the_fetch() {
    let (_api, mut dashboard) = seeded().await;
    assert!(!dashboard.is_loading());

    dashboard.begin_load();
    assert!(dashboard.is_loading());
    let result = dashboard.api().list().await;
    assert!(dashboard.complete_load(result));
    assert!(!dashboard.is_loading());
}
