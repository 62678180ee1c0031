// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, EstimateSize, TimeToLive};
use crate::config::consts::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_MAX_SIZE_BYTES};
use crate::observability::messages::cache::{CacheEntryEvicted, ExpiredEntriesSwept};
use crate::observability::messages::StructuredLog;

/// Which entry to drop first when the cache is over its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Least recently read (or written) entry goes first.
    #[default]
    Lru,
    /// Oldest created entry goes first, regardless of reads.
    Fifo,
}

/// Bounds and defaults for a [`ResultCache`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub max_size_bytes: usize,
    /// TTL applied when `set` is not given one. `None` means entries never expire.
    pub default_ttl: Option<Duration>,
    pub eviction: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            max_size_bytes: DEFAULT_CACHE_MAX_SIZE_BYTES,
            default_ttl: None,
            eviction: EvictionPolicy::Lru,
        }
    }
}

impl CacheConfig {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_max_size_bytes(mut self, max_size_bytes: usize) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    total_size: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
    /// Logical clock for recency and insertion order.
    seq: u64,
}

impl<V> CacheState<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            total_size: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
            expirations: 0,
            seq: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.total_size = self.total_size.saturating_sub(entry.size_bytes);
        Some(entry)
    }

    /// Drop every expired entry, returning how many were removed.
    fn sweep_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.remove(key);
        }
        self.expirations += expired.len() as u64;
        if !expired.is_empty() {
            ExpiredEntriesSwept {
                removed: expired.len(),
                remaining: self.entries.len(),
            }
            .log();
        }
        expired.len()
    }

    /// Remove and count an entry if it has expired.
    fn expire_if_stale(&mut self, key: &str, now: Instant) -> bool {
        let stale = self
            .entries
            .get(key)
            .map_or(false, |entry| entry.is_expired(now));
        if stale {
            self.remove(key);
            self.expirations += 1;
        }
        stale
    }

    /// Linear scan for the next eviction victim.
    fn eviction_candidate(&self, policy: EvictionPolicy) -> Option<String> {
        let order = |entry: &CacheEntry<V>| match policy {
            EvictionPolicy::Lru => entry.accessed_seq,
            EvictionPolicy::Fifo => entry.created_seq,
        };
        self.entries
            .iter()
            .min_by_key(|(_, entry)| order(entry))
            .map(|(key, _)| key.clone())
    }
}

/// Key -> value store with TTL expiry and capacity/size bounded eviction.
///
/// All state lives behind one async mutex, so each public call is a single
/// serialized read-modify-write against the map and its counters.
pub struct ResultCache<V> {
    config: CacheConfig,
    state: Mutex<CacheState<V>>,
}

impl<V> std::fmt::Debug for ResultCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V> ResultCache<V>
where
    V: Clone + EstimateSize,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState::new()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up a value, refreshing its recency on a hit.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.sweep_expired(now);

        let seq = state.tick();
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.record_access(now, seq);
                let value = entry.value.clone();
                state.hits += 1;
                Some(value)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Store a value. `ttl` overrides the configured default TTL.
    ///
    /// Evicts entries afterwards until both the entry-count and total-size
    /// bounds hold again. A single value bigger than `max_size_bytes` is
    /// therefore evicted immediately.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let now = Instant::now();
        let ttl = ttl.or(self.config.default_ttl);
        let size = key.estimated_size() + value.estimated_size();

        let mut state = self.state.lock().await;
        state.remove(&key);
        let seq = state.tick();
        state
            .entries
            .insert(key, CacheEntry::new(value, now, ttl, size, seq));
        state.total_size += size;

        self.evict(&mut state);
    }

    fn evict(&self, state: &mut CacheState<V>) {
        while state.entries.len() > self.config.max_entries
            || state.total_size > self.config.max_size_bytes
        {
            let Some(victim) = state.eviction_candidate(self.config.eviction) else {
                break;
            };
            if let Some(entry) = state.remove(&victim) {
                state.evictions += 1;
                CacheEntryEvicted {
                    key: &victim,
                    policy: self.config.eviction,
                    size_bytes: entry.size_bytes,
                }
                .log();
            }
        }
    }

    /// Whether a live entry exists. Does not count as a hit or miss.
    pub async fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.expire_if_stale(key, now);
        state.entries.contains_key(key)
    }

    /// Remove an entry, returning whether it existed.
    pub async fn delete(&self, key: &str) -> bool {
        self.state.lock().await.remove(key).is_some()
    }

    /// Drop every entry. Counters are kept.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.total_size = 0;
    }

    /// Keys of all live entries, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.sweep_expired(now);
        let mut keys: Vec<String> = state.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove every entry whose key matches `pattern`, returning how many went.
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<usize, regex::Error> {
        let regex = Regex::new(pattern)?;
        let mut state = self.state.lock().await;
        let matching: Vec<String> = state
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();
        for key in &matching {
            state.remove(key);
        }
        Ok(matching.len())
    }

    /// Mark an entry as just used, optionally giving it a fresh TTL.
    pub async fn touch(&self, key: &str, ttl: Option<Duration>) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        if state.expire_if_stale(key, now) {
            return false;
        }
        let seq = state.tick();
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.last_accessed_at = now;
                entry.accessed_seq = seq;
                if let Some(ttl) = ttl {
                    entry.expires_at = Some(now + ttl);
                }
                true
            }
            None => false,
        }
    }

    /// Remaining lifetime of a live entry.
    pub async fn ttl(&self, key: &str) -> Option<TimeToLive> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.expire_if_stale(key, now);
        state.entries.get(key).map(|entry| match entry.expires_at {
            Some(at) => TimeToLive::Expires(at.saturating_duration_since(now)),
            None => TimeToLive::Never,
        })
    }

    pub async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.sweep_expired(now);

        let ages: Vec<Duration> = state.entries.values().map(|e| e.age(now)).collect();
        let oldest_entry_age = ages.iter().max().copied();
        let avg_entry_age = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().sum::<Duration>() / ages.len() as u32)
        };

        CacheStats {
            entries: state.entries.len(),
            total_size_bytes: state.total_size,
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            expirations: state.expirations,
            hit_ratio: CacheStats::hit_ratio(state.hits, state.misses),
            oldest_entry_age,
            avg_entry_age,
        }
    }

    /// Read-through helper: return the cached value or compute, store and return it.
    ///
    /// The lock is not held while `compute` runs, so concurrent misses on the
    /// same key all compute and the last writer wins. Errors are returned
    /// as-is and nothing is cached for them.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        compute: F,
        ttl: Option<Duration>,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }
        let value = compute().await?;
        self.set(key, value.clone(), ttl).await;
        Ok(value)
    }
}
