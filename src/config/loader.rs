// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::backends::CachingOptions;
use crate::cache::{CacheConfig, EvictionPolicy};
use crate::config::consts::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_MAX_SIZE_BYTES, DEFAULT_CACHE_TTL_SECONDS,
};
use crate::engine::{default_concurrency, ExecutionOptions, Strategy};
use crate::errors::{ConfigError, ExecutionError};
use crate::operations::AnalysisKind;
use crate::traits::Capability;

/// Main configuration for a text-analysis run.
///
/// Loaded from YAML (`.yaml`/`.yml`) or TOML (`.toml`).
///
/// # Example
/// ```yaml
/// execution:
///   strategy: parallel
///   concurrency: 4
///   cache: true
/// cache:
///   max_entries: 1000
///   default_ttl_seconds: 600
///   eviction: lru
/// backends:
///   candidates: [whitespace, rule_based]
///   required: [tokenization]
///   fallback: rule_based
///   caching:
///     capacity: 200
/// pipeline: [sentencize, tokenize]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    pub backends: BackendsConfig,
    pub pipeline: Vec<AnalysisKind>,
}

/// How each pipeline stage is executed.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// One of `sequential`, `parallel`, `batch`, `streaming`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Parallel concurrency limit. Defaults to available parallelism.
    pub concurrency: Option<usize>,
    #[serde(default = "default_true")]
    pub cache: bool,
}

fn default_strategy() -> String {
    Strategy::Sequential.tag().to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            concurrency: None,
            cache: true,
        }
    }
}

impl ExecutionConfig {
    /// Build executor options, failing on an unrecognised strategy tag.
    pub fn to_options(&self) -> Result<ExecutionOptions, ExecutionError> {
        let concurrency = self.concurrency.unwrap_or_else(default_concurrency);
        Ok(ExecutionOptions {
            strategy: Strategy::from_tag(&self.strategy, concurrency)?,
            cache: self.cache,
        })
    }
}

/// Bounds of the executor's shared result cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: usize,
    /// Zero disables expiry.
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
    #[serde(default)]
    pub eviction: EvictionPolicy,
}

fn default_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

fn default_max_size_bytes() -> usize {
    DEFAULT_CACHE_MAX_SIZE_BYTES
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            max_size_bytes: DEFAULT_CACHE_MAX_SIZE_BYTES,
            default_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            eviction: EvictionPolicy::default(),
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        let config = CacheConfig::default()
            .with_max_entries(self.max_entries)
            .with_max_size_bytes(self.max_size_bytes)
            .with_eviction(self.eviction);
        if self.default_ttl_seconds == 0 {
            config
        } else {
            config.with_default_ttl(Duration::from_secs(self.default_ttl_seconds))
        }
    }
}

/// Which backend serves the pipeline and how it is composed.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendsConfig {
    /// Registered backend names, tried in order by selection.
    pub candidates: Vec<String>,
    #[serde(default)]
    pub required: Vec<Capability>,
    /// Secondary backend retried when the selected one fails.
    pub fallback: Option<String>,
    /// Wrap the composed backend in a read-through cache.
    pub caching: Option<CachingOptions>,
}

/// Load a config, choosing the parser from the file extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            let content = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        }
        Some("toml") => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Check the parts of a config that parsing alone cannot.
///
/// Unknown pipeline operation names are already rejected while parsing.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.backends.candidates.is_empty() {
        return Err(ConfigError::Invalid(
            "backends.candidates must name at least one backend".into(),
        ));
    }
    if cfg.pipeline.is_empty() {
        return Err(ConfigError::Invalid(
            "pipeline must contain at least one operation".into(),
        ));
    }
    if cfg.cache.max_entries == 0 {
        return Err(ConfigError::Invalid(
            "cache.max_entries must be at least 1".into(),
        ));
    }
    cfg.execution.to_options()?;
    Ok(())
}

/// Load a config and validate it.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}
