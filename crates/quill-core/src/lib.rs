//! # Quill Core
//!
//! The domain layer for blog posts.
//! Document shapes, the write pipeline (slug, publish date), the read-time
//! display projection, access rules and the ports that storage must implement.
//! No infrastructure dependencies live here.

pub mod calendar;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod service;

pub use config::{CalendarPrecision, PipelineConfig};
pub use error::DomainError;
pub use service::PostService;
