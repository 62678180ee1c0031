// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use tokio::time::Instant;

/// A cached value plus the bookkeeping the cache needs for expiry and eviction.
///
/// Timestamps use `tokio::time::Instant` so expiry follows tokio's clock,
/// including the paused clock in tests.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: Instant,
    pub expires_at: Option<Instant>,
    pub last_accessed_at: Instant,
    pub access_count: u64,
    pub size_bytes: usize,
    /// Logical clock values; break ties between equal instants.
    pub(crate) created_seq: u64,
    pub(crate) accessed_seq: u64,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(
        value: V,
        now: Instant,
        ttl: Option<Duration>,
        size_bytes: usize,
        seq: u64,
    ) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
            last_accessed_at: now,
            access_count: 0,
            size_bytes,
            created_seq: seq,
            accessed_seq: seq,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |at| now >= at)
    }

    pub(crate) fn record_access(&mut self, now: Instant, seq: u64) {
        self.last_accessed_at = now;
        self.accessed_seq = seq;
        self.access_count += 1;
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Remaining lifetime of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToLive {
    /// The entry never expires.
    Never,
    /// The entry expires after this much more time.
    Expires(Duration),
}
