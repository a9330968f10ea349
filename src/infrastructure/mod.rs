//! Infrastructure: configuration, logging and persistence

pub mod config;
pub mod database;
pub mod logger;
pub mod memory;
pub mod store;
