//! Client-side catalog state and transport

pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod deletions;
pub mod form;
pub mod notice;

pub use api::{ClientError, FoodsApi, HttpFoodsClient};
pub use dashboard::Dashboard;
