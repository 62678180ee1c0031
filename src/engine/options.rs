// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::consts::DEFAULT_CONCURRENCY_FALLBACK;
use crate::errors::ExecutionError;

/// How the executor walks the leaf frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// One leaf at a time, in graph iteration order.
    Sequential,
    /// Up to `concurrency` leaves in flight at once.
    Parallel { concurrency: usize },
    /// Runs with [`Strategy::Sequential`] semantics.
    Batch,
    /// Runs with [`Strategy::Sequential`] semantics.
    Streaming,
}

impl Strategy {
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Parallel { .. } => "parallel",
            Strategy::Batch => "batch",
            Strategy::Streaming => "streaming",
        }
    }

    /// Parse a strategy tag, using `concurrency` for `parallel`.
    pub fn from_tag(tag: &str, concurrency: usize) -> Result<Self, ExecutionError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Strategy::Sequential),
            "parallel" => Ok(Strategy::Parallel { concurrency }),
            "batch" => Ok(Strategy::Batch),
            "streaming" => Ok(Strategy::Streaming),
            _ => Err(ExecutionError::UnknownStrategy(tag.to_string())),
        }
    }

    /// Whether this strategy is executed as sequential without being sequential itself.
    pub fn degrades_to_sequential(&self) -> bool {
        matches!(self, Strategy::Batch | Strategy::Streaming)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Parallel { concurrency } => write!(f, "parallel({})", concurrency),
            other => f.write_str(other.tag()),
        }
    }
}

impl FromStr for Strategy {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::from_tag(s, default_concurrency())
    }
}

/// Available CPU parallelism, falling back to a fixed value if detection fails.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_CONCURRENCY_FALLBACK)
}

/// Per-call options for [`crate::engine::Executor::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionOptions {
    pub strategy: Strategy,
    /// Consult and populate the result cache.
    pub cache: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sequential,
            cache: true,
        }
    }
}

impl ExecutionOptions {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(concurrency: usize) -> Self {
        Self {
            strategy: Strategy::Parallel { concurrency },
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}
