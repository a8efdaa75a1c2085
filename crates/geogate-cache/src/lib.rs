//! # Geogate Cache
//!
//! Process-local memoization for derived authorization state.
//!
//! Entries are keyed by `(key, generation)`. Bumping the generation with
//! [`GenerationCache::invalidate`] makes every earlier entry unreachable at once, so a
//! grant or revoke never has to know which keys it affects.
//!
//! There is no TTL and no cross-process coherency: each process owns its caches and
//! invalidation is local.
//!
//! # Example
//!
//! ```ignore
//! use geogate_cache::GenerationCache;
//!
//! let cache: GenerationCache<i64, Vec<i64>> = GenerationCache::new("city_access");
//! let ids = cache
//!     .get_or_try_insert_with(7, || async { Ok::<_, std::io::Error>(vec![1, 2]) })
//!     .await?;
//! cache.invalidate();
//! ```

pub mod generation;

pub use generation::GenerationCache;
