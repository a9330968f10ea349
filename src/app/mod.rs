//! Application layer: routes for the food catalog

pub mod foods;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::store::FoodStore;
use foods::{
    handler::{create_food, delete_food, list_foods, update_food, AppState},
    service::FoodService,
};

/// Builds the HTTP surface. Routes are served both at the root and under `/api`.
pub fn router(store: Arc<dyn FoodStore>) -> Router {
    let state = AppState {
        food_service: FoodService::new(store),
    };

    let foods = Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", put(update_food).delete(delete_food));

    Router::new()
        .merge(foods.clone())
        .nest("/api", foods)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
