//! # Murmur Infrastructure
//!
//! Concrete implementations of the ports defined in `murmur-core`.
//! This crate contains database, cache, clock, and auth integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod cache;
pub mod clock;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::{InMemoryCache, PageCache};
pub use clock::{ManualClock, SystemClock};
pub use database::{DatabaseConnections, InMemoryStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};

#[cfg(test)]
mod service_tests;
