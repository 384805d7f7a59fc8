//! # Murmur Shared
//!
//! Request and response types shared between the API server and clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
