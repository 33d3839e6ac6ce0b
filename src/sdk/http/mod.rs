pub mod cache;
pub mod client;
pub mod error;

pub use cache::{CacheEntry, ResponseCache, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
pub use client::{CachedClient, CachedResponse};
pub use error::FetchError;
