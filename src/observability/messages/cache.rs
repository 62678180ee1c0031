// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for result cache housekeeping.

use crate::cache::EvictionPolicy;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An entry was evicted to bring the cache back within its bounds.
///
/// # Log Level
/// `debug!` - Routine housekeeping
pub struct CacheEntryEvicted<'a> {
    pub key: &'a str,
    pub policy: EvictionPolicy,
    pub size_bytes: usize,
}

impl Display for CacheEntryEvicted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evicted cache entry '{}' ({:?}, {} bytes)",
            self.key, self.policy, self.size_bytes
        )
    }
}

impl StructuredLog for CacheEntryEvicted<'_> {
    fn log(&self) {
        tracing::debug!(
            key = self.key,
            policy = ?self.policy,
            size_bytes = self.size_bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("cache_evicted", span_name = name, key = self.key)
    }
}

/// Expired entries were removed on an access path.
///
/// # Log Level
/// `debug!` - Routine housekeeping
pub struct ExpiredEntriesSwept {
    pub removed: usize,
    pub remaining: usize,
}

impl Display for ExpiredEntriesSwept {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Swept {} expired cache entries, {} remain",
            self.removed, self.remaining
        )
    }
}

impl StructuredLog for ExpiredEntriesSwept {
    fn log(&self) {
        tracing::debug!(removed = self.removed, remaining = self.remaining, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "cache_swept",
            span_name = name,
            removed = self.removed,
            remaining = self.remaining,
        )
    }
}
