// ABOUTME: Catalog data layer for Project Sleep
// ABOUTME: Storage trait, ROM query pipeline, in-memory and remote backends

pub mod error;
pub mod memory;
pub mod query;
pub mod remote;
pub mod seed;
pub mod store;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use query::{run_query, RomQuery};
pub use remote::RemoteStore;
pub use store::CatalogStore;
