//! Access rules for the posts collection.

use uuid::Uuid;

/// Collection slug, also used as the entity name in errors.
pub const POSTS_COLLECTION: &str = "posts";

/// Operations the access policy decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// The authenticated caller, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
}

impl Actor {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Per-operation access predicates.
///
/// The default lets anyone read and requires a signed-in user for every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub public_read: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self { public_read: true }
    }
}

impl AccessPolicy {
    pub fn allows(&self, operation: Operation, actor: Option<&Actor>) -> bool {
        match operation {
            Operation::Read if self.public_read => true,
            _ => actor.is_some(),
        }
    }
}
