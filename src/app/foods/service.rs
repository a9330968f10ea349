//! Food record service

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::model::{Food, FoodId, FoodPatch, NewFood};
use crate::core::{
    error::{CoreError, Operation},
    response::{MessageResponse, UpdatedFood, FOOD_DELETED},
};
use crate::infrastructure::store::FoodStore;

/// List, create, update and delete over an injected store handle.
#[derive(Clone)]
pub struct FoodService {
    store: Arc<dyn FoodStore>,
}

impl FoodService {
    pub fn new(store: Arc<dyn FoodStore>) -> Self {
        Self { store }
    }

    pub async fn list_foods(&self) -> Result<Vec<Food>, CoreError> {
        let foods = self
            .store
            .list()
            .await
            .map_err(|e| CoreError::store(Operation::List, e))?;
        debug!(count = foods.len(), "found foods");
        Ok(foods)
    }

    pub async fn create_food(&self, food: NewFood) -> Result<Food, CoreError> {
        food.validate()?;
        let id = self
            .store
            .insert(&food)
            .await
            .map_err(|e| CoreError::store(Operation::Create, e))?;
        info!(%id, name = %food.name, "created food");
        Ok(Food::new(id, food))
    }

    /// Echoes the submitted fields, not the merged document.
    pub async fn update_food(&self, id: &str, patch: FoodPatch) -> Result<UpdatedFood, CoreError> {
        let id: FoodId = id
            .parse()
            .map_err(|e| CoreError::failed(Operation::Update, e))?;
        patch.validate()?;
        if patch.is_empty() {
            return Err(CoreError::BadRequest("no fields to update".to_string()));
        }

        let matched = self
            .store
            .update(id, &patch)
            .await
            .map_err(|e| CoreError::store(Operation::Update, e))?;
        if matched == 0 {
            debug!(%id, "update matched no food");
        }

        Ok(UpdatedFood { id, fields: patch })
    }

    /// Succeeds whether or not a document matched.
    pub async fn delete_food(&self, id: &str) -> Result<MessageResponse, CoreError> {
        let id: FoodId = id
            .parse()
            .map_err(|e| CoreError::failed(Operation::Delete, e))?;

        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| CoreError::store(Operation::Delete, e))?;
        info!(%id, deleted, "deleted food");

        Ok(MessageResponse::new(FOOD_DELETED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryFoodStore;

    fn service() -> FoodService {
        FoodService::new(Arc::new(MemoryFoodStore::new()))
    }

    fn pizza() -> NewFood {
        NewFood {
            name: "Pizza".to_string(),
            price: 9.5,
            category: "Italian".to_string(),
            description: "Cheesy".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_list() {
        let service = service();
        let created = service.create_food(pizza()).await.unwrap();
        let foods = service.list_foods().await.unwrap();
        assert_eq!(foods, vec![created]);
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let mut food = pizza();
        food.category.clear();
        let err = service().create_food(food).await.unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(msg) if msg.contains("category")));
    }

    #[tokio::test]
    async fn update_rejects_empty_patch_and_bad_id() {
        let service = service();
        let err = service
            .update_food(&FoodId::new().to_string(), FoodPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));

        let patch = FoodPatch {
            price: Some(1.0),
            ..Default::default()
        };
        let err = service.update_food("xyz", patch).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::OperationFailed { operation: Operation::Update, .. }
        ));

        let err = service.update_food("xyz", FoodPatch::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::OperationFailed { operation: Operation::Update, .. }
        ));
    }

    #[tokio::test]
    async fn delete_missing_id_succeeds() {
        let response = service()
            .delete_food(&FoodId::new().to_string())
            .await
            .unwrap();
        assert_eq!(response.message, FOOD_DELETED);
    }
}
