//! Core HTTP plumbing: errors, response bodies, middleware

pub mod error;
pub mod middleware;
pub mod response;
