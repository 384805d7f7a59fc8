//! Cache implementations.

mod memory;
mod page;

pub use memory::InMemoryCache;
pub use page::PageCache;
