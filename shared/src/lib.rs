//! Shared utilities and types for the media upload backend

pub mod observability;
pub mod types;

pub use types::error::CommonError;
