//! Items API - CRUD service for named, categorized items
//!
//! Architecture:
//! - SeaORM for database access (SQLite by default)
//! - Axum for the HTTP API with rate limiting and CORS
//! - Tokio for async runtime, plugins supervised as restartable tasks

pub mod entity;
pub mod error;
pub mod model;
pub mod plugins;
pub mod prelude;
pub mod state;
pub mod sv;
