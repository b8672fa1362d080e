//! Domain entities - the posts collection and its document shapes.

pub mod collection;
mod post;

pub use collection::{AccessPolicy, Actor, Operation, POSTS_COLLECTION};
pub use post::{PostDocument, PostDraft, PostPatch, PostStatus, PostView};
