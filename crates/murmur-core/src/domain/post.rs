use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a single authored text entry, optionally grouped
/// and illustrated.
///
/// `pub_date` and `author_id` are set at creation and never change.
/// Listings are ordered by `pub_date` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    /// Cleared (not cascaded) when the referenced group is deleted.
    pub group_id: Option<Uuid>,
    /// Stable path to an uploaded image, if any.
    pub image: Option<String>,
}

impl Post {
    /// Create a new post publishing at `now`.
    pub fn new(
        author_id: Uuid,
        text: String,
        group_id: Option<Uuid>,
        image: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            pub_date: now,
            group_id,
            image,
        }
    }
}
