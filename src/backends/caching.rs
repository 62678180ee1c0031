// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-through caching wrapper around any backend.
//!
//! The five core functions (tokenize, sentencize, POS tag, lemmatize,
//! extract entities) are memoized per raw input text. Dependency parsing and
//! relation extraction always go straight to the wrapped backend.
//!
//! The advertised capacity and TTL are enforced: each core function gets its
//! own [`ResultCache`] bounded to `capacity` entries with `ttl` expiry.
//! Failures are never cached.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheConfig, CacheStats, ResultCache};
use crate::config::consts::DEFAULT_BACKEND_CACHE_CAPACITY;
use crate::errors::BackendResult;
use crate::traits::backend::{
    Dependency, Entity, Lemma, PosTag, Relation, Sentence, Token,
};
use crate::traits::{Backend, BackendCapabilities};

/// Bounds for a [`CachingBackend`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CachingOptions {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Entry lifetime in seconds. Absent or zero means no expiry.
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

fn default_capacity() -> usize {
    DEFAULT_BACKEND_CACHE_CAPACITY
}

impl Default for CachingOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BACKEND_CACHE_CAPACITY,
            ttl_seconds: None,
        }
    }
}

impl CachingOptions {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    fn cache_config(&self) -> CacheConfig {
        let config = CacheConfig::default().with_max_entries(self.capacity);
        match self.ttl() {
            Some(ttl) => config.with_default_ttl(ttl),
            None => config,
        }
    }
}

pub struct CachingBackend {
    inner: Arc<dyn Backend>,
    tokens: ResultCache<Vec<Token>>,
    sentences: ResultCache<Vec<Sentence>>,
    pos_tags: ResultCache<Vec<PosTag>>,
    lemmas: ResultCache<Vec<Lemma>>,
    entities: ResultCache<Vec<Entity>>,
}

impl CachingBackend {
    pub fn new(inner: Arc<dyn Backend>, options: &CachingOptions) -> Self {
        let config = options.cache_config();
        Self {
            inner,
            tokens: ResultCache::new(config.clone()),
            sentences: ResultCache::new(config.clone()),
            pos_tags: ResultCache::new(config.clone()),
            lemmas: ResultCache::new(config.clone()),
            entities: ResultCache::new(config),
        }
    }

    /// Per-function cache statistics, keyed by function name.
    pub async fn stats(&self) -> Vec<(&'static str, CacheStats)> {
        vec![
            ("tokenize", self.tokens.stats().await),
            ("sentencize", self.sentences.stats().await),
            ("pos_tag", self.pos_tags.stats().await),
            ("lemmatize", self.lemmas.stats().await),
            ("extract_entities", self.entities.stats().await),
        ]
    }
}

#[async_trait]
impl Backend for CachingBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.inner.capabilities()
    }

    async fn tokenize(&self, text: &str) -> BackendResult<Vec<Token>> {
        self.tokens
            .get_or_set(text, || self.inner.tokenize(text), None)
            .await
    }

    async fn sentencize(&self, text: &str) -> BackendResult<Vec<Sentence>> {
        self.sentences
            .get_or_set(text, || self.inner.sentencize(text), None)
            .await
    }

    async fn pos_tag(&self, text: &str) -> BackendResult<Vec<PosTag>> {
        self.pos_tags
            .get_or_set(text, || self.inner.pos_tag(text), None)
            .await
    }

    async fn lemmatize(&self, text: &str) -> BackendResult<Vec<Lemma>> {
        self.lemmas
            .get_or_set(text, || self.inner.lemmatize(text), None)
            .await
    }

    async fn extract_entities(&self, text: &str) -> BackendResult<Vec<Entity>> {
        self.entities
            .get_or_set(text, || self.inner.extract_entities(text), None)
            .await
    }

    async fn parse_dependencies(&self, text: &str) -> BackendResult<Vec<Dependency>> {
        self.inner.parse_dependencies(text).await
    }

    async fn extract_relations(&self, text: &str) -> BackendResult<Vec<Relation>> {
        self.inner.extract_relations(text).await
    }
}
