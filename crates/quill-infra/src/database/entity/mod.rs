//! SeaORM entities backing the posts collection.

pub mod media;
pub mod post;
pub mod user;
