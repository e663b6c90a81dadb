//! # Stats Store
//!
//! This crate provides the persistence infrastructure for the NFL insights
//! pipeline. Weekly stat snapshots, ingest metadata, and derived insights all
//! live in a flat key/value blob store with a week-partitioned key layout.
//!
//! ## Architecture
//!
//! - **BlobStore**: Abstract trait for key/value storage backends
//! - **LocalBlobStore**: Local file-based implementation
//! - **InMemoryBlobStore**: In-memory fake for tests
//! - **StatsStore**: Typed facade that knows the canonical key layout
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stats_store::{LocalBlobStore, StatsStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let blobs = Arc::new(LocalBlobStore::new("./nfl_data"));
//!     let store = StatsStore::new(blobs);
//!
//!     if let Some(snapshot) = store.read_snapshot(2025, 6).await? {
//!         println!("week 6 has {} players", snapshot.players.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod keys;
pub mod local;
pub mod memory;
pub mod models;
pub mod store;

pub use backend::BlobStore;
pub use error::{Result, StoreError};
pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;
pub use models::{PlayerRecord, StatsMetadata, WeeklySnapshot};
pub use store::StatsStore;
