//! Food HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use super::{
    model::{Food, FoodPatch, NewFood},
    service::FoodService,
};
use crate::core::{
    error::CoreError,
    response::{MessageResponse, UpdatedFood},
};

#[derive(Clone)]
pub struct AppState {
    pub food_service: FoodService,
}

pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<Food>>, CoreError> {
    let foods = state.food_service.list_foods().await?;
    Ok(Json(foods))
}

pub async fn create_food(
    State(state): State<AppState>,
    payload: Result<Json<NewFood>, JsonRejection>,
) -> Result<Json<Food>, CoreError> {
    let Json(food) = payload?;
    let food = state.food_service.create_food(food).await?;
    Ok(Json(food))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FoodPatch>, JsonRejection>,
) -> Result<Json<UpdatedFood>, CoreError> {
    let Json(patch) = payload?;
    let updated = state.food_service.update_food(&id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    let response = state.food_service.delete_food(&id).await?;
    Ok(Json(response))
}
