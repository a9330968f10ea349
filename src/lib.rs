//! # Food catalog
//!
//! A small catalog of food records (name, price, category, description)
//! kept in MongoDB and served over a REST API:
//! - `infrastructure`: configuration, logging and the document store gateway
//! - `core`: HTTP error mapping, response bodies, request logging
//! - `app`: the record service and its routes
//! - `client`: client-side list/search/form state driving the API

pub mod app;
pub mod core;
pub mod infrastructure;

#[cfg(feature = "client")]
pub mod client;

pub use app::foods::model::{Food, FoodId, FoodPatch, NewFood};
pub use app::router;
pub use infrastructure::store::{FoodStore, StoreError};
