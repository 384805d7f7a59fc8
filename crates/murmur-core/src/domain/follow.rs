use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Follow entity - a directed subscription from `user_id` to `author_id`.
///
/// At most one relation exists per (user, author) pair, and a user
/// never follows themselves; both rules are enforced by the follow
/// service rather than the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_id: Uuid,
}

impl Follow {
    pub fn new(user_id: Uuid, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            author_id,
        }
    }
}
