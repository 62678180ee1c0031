// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::time::Duration;

/// Point-in-time snapshot of cache counters and occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_size_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// `hits / (hits + misses)`, or 0.0 before the first lookup.
    pub hit_ratio: f64,
    pub oldest_entry_age: Option<Duration>,
    pub avg_entry_age: Option<Duration>,
}

impl CacheStats {
    pub(crate) fn hit_ratio(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
