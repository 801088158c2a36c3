//! # Kaniu Core Types
//!
//! The shared vocabulary of the shelter API: the `Row` shape every record
//! travels in, the catalogue of logical resources and the row normalizer that
//! gives animal rows their front-end field names.
//!
//! As a Layer 0 crate it has no knowledge of the database or the web server.

pub mod error;
pub mod normalize;
pub mod resource;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use normalize::{normalize, normalize_all, ALIASES};
pub use resource::{Resource, SortDirection};

/// A single record as returned by a data source: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;
