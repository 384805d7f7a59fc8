use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named category posts may belong to.
///
/// Groups are created out-of-band (seeding or admin tooling), never
/// through the public API. The slug is globally unique and addresses
/// the group in URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }
}
