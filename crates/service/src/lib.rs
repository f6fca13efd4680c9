//! Service layer owning the product collection behind the HTTP surface.
//! - Holds the in-memory collection seeded from the JSON dataset.
//! - Applies the per-field validation rules before any mutation.
//! - Provides clear error types and a store trait for handlers.

pub mod catalog;
pub mod errors;
pub mod runtime;
pub mod storage;
