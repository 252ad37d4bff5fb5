//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation.
//! The product service uses it cache-aside: reads populate on miss, writes
//! invalidate the whole namespace.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
