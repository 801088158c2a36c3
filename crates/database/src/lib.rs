//! # Kaniu Database Crate
//!
//! The read side of the shelter API. Every endpoint ends up here as one
//! `QueryDescriptor` handed to a `DataSource`.
//!
//! ## Public API
//!
//! - `DataSource`: the seam between handlers and storage. Handlers only ever see
//!   `Arc<dyn DataSource>`.
//! - `DbRepository`: the PostgreSQL implementation on top of a `PgPool`.
//! - `MemoryDataSource`: an in-process implementation with the same filter,
//!   ordering and limit semantics, used in tests and local demos.
//! - `connect` / `run_migrations`: pool construction and optional schema setup.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod query;
pub mod repository;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryDataSource;
pub use query::{Filter, OrderBy, QueryDescriptor};
pub use repository::DbRepository;
pub use source::DataSource;
