//! Domain services - query and mutation logic over the ports.

mod follows;
mod pagination;
mod posts;

pub use follows::FollowService;
pub use pagination::{PAGE_SIZE, Page, paginate};
pub use posts::{NewPost, PostEdit, PostService};
