//! Shared type definitions used across the backend services

pub mod error;

pub use error::{CommonError, ErrorBody};
