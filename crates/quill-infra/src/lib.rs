//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database adapter, the in-memory fallback and
//! environment configuration.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL storage via SeaORM

pub mod bootstrap;
pub mod config;
pub mod database;
pub mod memory;

pub use bootstrap::build_post_service;
pub use config::AppConfig;
pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
