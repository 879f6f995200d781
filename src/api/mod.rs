//! HTTP API layer for Portfolio Core.
//!
//! Public endpoints serve the site sections; admin endpoints manage content.

pub mod admin;
pub mod handlers;
mod routes;
mod types;
pub mod uploads;

pub use routes::build_router;
