//! Cache layer for user records.
//!
//! A key-value side cache mapping composite keys (the collection key or a
//! per-user key) to serialized user data. Presence is binary: an entry
//! exists or it does not. No TTL and no capacity eviction; entries leave
//! the cache only through explicit eviction by a consistency strategy.
//!
//! The process-wide enablement switch comes from `CacheSettings` and is
//! carried by the [`UserCache`] facade: when disabled, every operation is
//! a no-op and reads return absent, so strategies fall through to the
//! store on every call.
//!
//! A store write and its corresponding cache mutation are not atomic; the
//! consistency strategies choose where in that window they sit.

pub mod facade;
pub mod key;
pub mod memory_backend;
pub mod traits;

pub use facade::UserCache;
pub use key::CacheKey;
pub use memory_backend::MemoryCacheBackend;
pub use traits::{CacheBackend, CacheStats};
