//! In-process food store, kept in insertion order

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{FoodStore, StoreResult};
use crate::app::foods::model::{Food, FoodId, FoodPatch, NewFood};

#[derive(Default)]
pub struct MemoryFoodStore {
    foods: RwLock<Vec<Food>>,
}

impl MemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FoodStore for MemoryFoodStore {
    async fn list(&self) -> StoreResult<Vec<Food>> {
        Ok(self.foods.read().await.clone())
    }

    async fn insert(&self, food: &NewFood) -> StoreResult<FoodId> {
        let id = FoodId::new();
        self.foods.write().await.push(Food::new(id, food.clone()));
        Ok(id)
    }

    async fn update(&self, id: FoodId, patch: &FoodPatch) -> StoreResult<u64> {
        let mut foods = self.foods.write().await;
        match foods.iter_mut().find(|food| food.id == id) {
            Some(food) => {
                food.apply(patch);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: FoodId) -> StoreResult<u64> {
        let mut foods = self.foods.write().await;
        let before = foods.len();
        foods.retain(|food| food.id != id);
        Ok((before - foods.len()) as u64)
    }
}
