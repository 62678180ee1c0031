// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generic in-memory result cache with TTL expiry and LRU/FIFO eviction.
//!
//! The cache is an explicit object: build one [`ResultCache`] at startup,
//! wrap it in an `Arc`, and hand it to whatever needs it (the executor, the
//! caching backend). Nothing in the crate reaches it through a global.
//!
//! # Known limitations
//!
//! * Expired entries are swept on the read paths (`get`, `keys`, `stats`),
//!   which costs a scan proportional to the cache size.
//! * Each eviction candidate is found with a linear scan over all entries.
//!   This is fine for caches of a few thousand entries and does not scale
//!   beyond that.
//! * [`ResultCache::get_or_set`] is not atomic: two concurrent misses on the
//!   same key both compute, and the last writer wins.

mod entry;
mod result_cache;
mod size;
mod stats;

pub use entry::{CacheEntry, TimeToLive};
pub use result_cache::{CacheConfig, EvictionPolicy, ResultCache};
pub use size::EstimateSize;
pub use stats::CacheStats;
