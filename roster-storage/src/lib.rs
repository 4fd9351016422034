//! Roster Storage - Store Trait, In-Memory Store, and Cache Layer
//!
//! Defines the storage abstraction for user records and the key-value
//! side cache the consistency strategies coordinate with. A relational
//! implementation would live behind the same traits; the in-memory
//! implementations here are the reference store used by the service
//! layer, the load harness, and the test suites.

pub mod cache;
pub mod store;

pub use store::{MemoryUserStore, UserStore};

// Re-export cache types for service integration
pub use cache::{CacheBackend, CacheKey, CacheStats, MemoryCacheBackend, UserCache};
