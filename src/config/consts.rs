// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default maximum number of entries in a result cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;
/// Default total size bound for a result cache (50 MiB)
pub const DEFAULT_CACHE_MAX_SIZE_BYTES: usize = 50 * 1024 * 1024;
/// Default TTL for executor cache entries, in seconds (0 disables expiry)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
/// Default entry bound for each per-function cache of a caching backend
pub const DEFAULT_BACKEND_CACHE_CAPACITY: usize = 500;
/// Concurrency used when the host parallelism cannot be determined
pub const DEFAULT_CONCURRENCY_FALLBACK: usize = 4;
