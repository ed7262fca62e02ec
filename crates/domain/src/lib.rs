//! # LedgerLink Domain
//!
//! Wire-level data types and models for the LedgerLink aggregation API.
//!
//! This crate contains:
//! - Response models (connections, attempts, providers, accounts, ...)
//! - Request parameter types with their explicit wire names
//! - The error taxonomy shared across the SDK
//! - Date (de)serialization helpers for the API's mixed date formats
//!
//! ## Architecture
//! - No dependencies on other LedgerLink crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod dates;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
