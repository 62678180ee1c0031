// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Deterministic test backends and factories.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::{BackendError, BackendResult};
use crate::traits::backend::{
    Dependency, Entity, Lemma, PosTag, Relation, Sentence, Token,
};
use crate::traits::{Backend, BackendCapabilities, BackendFactory, Capability};

/// A backend whose answers are derived from the input text plus a suffix,
/// so tests can tell which backend served a call.
pub struct ScriptedBackend {
    name: String,
    capabilities: BackendCapabilities,
    suffix: String,
    broken: bool,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(name: &str, capabilities: &[Capability], suffix: &str) -> Self {
        Self {
            name: name.to_string(),
            capabilities: BackendCapabilities::from_list(capabilities),
            suffix: suffix.to_string(),
            broken: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Claims every capability and fails every call with an OperationError.
    pub fn broken(name: &str) -> Self {
        Self {
            broken: true,
            ..Self::new(name, &Capability::ALL, "")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, capability: Capability, operation: &str) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(BackendError::operation(&self.name, operation, "scripted failure"));
        }
        if !self.capabilities.supports(capability) {
            return Err(BackendError::not_supported(&self.name, operation));
        }
        Ok(())
    }

    fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split_whitespace()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    async fn tokenize(&self, text: &str) -> BackendResult<Vec<Token>> {
        self.check(Capability::Tokenization, "tokenize")?;
        Ok(self
            .words(text)
            .map(|w| Token {
                text: format!("{w}{}", self.suffix),
                start: 0,
                end: w.len(),
            })
            .collect())
    }

    async fn sentencize(&self, text: &str) -> BackendResult<Vec<Sentence>> {
        self.check(Capability::Sentencization, "sentencize")?;
        Ok(vec![Sentence {
            text: format!("{text}{}", self.suffix),
            start: 0,
            end: text.len(),
        }])
    }

    async fn pos_tag(&self, text: &str) -> BackendResult<Vec<PosTag>> {
        self.check(Capability::PosTagging, "pos_tag")?;
        Ok(self
            .words(text)
            .map(|w| PosTag {
                token: w.to_string(),
                tag: format!("X{}", self.suffix),
            })
            .collect())
    }

    async fn lemmatize(&self, text: &str) -> BackendResult<Vec<Lemma>> {
        self.check(Capability::Lemmatization, "lemmatize")?;
        Ok(self
            .words(text)
            .map(|w| Lemma {
                token: w.to_string(),
                lemma: format!("{}{}", w.to_lowercase(), self.suffix),
            })
            .collect())
    }

    async fn extract_entities(&self, text: &str) -> BackendResult<Vec<Entity>> {
        self.check(Capability::Ner, "extract_entities")?;
        Ok(vec![Entity {
            text: text.to_string(),
            label: format!("THING{}", self.suffix),
            start: 0,
            end: text.len(),
        }])
    }

    async fn parse_dependencies(&self, text: &str) -> BackendResult<Vec<Dependency>> {
        self.check(Capability::DependencyParsing, "parse_dependencies")?;
        Ok(vec![Dependency {
            head: "ROOT".to_string(),
            dependent: text.to_string(),
            relation: format!("root{}", self.suffix),
        }])
    }

    async fn extract_relations(&self, text: &str) -> BackendResult<Vec<Relation>> {
        self.check(Capability::RelationExtraction, "extract_relations")?;
        Ok(vec![Relation {
            subject: text.to_string(),
            predicate: format!("is{}", self.suffix),
            object: text.to_string(),
        }])
    }
}

/// Factory that hands out a pre-built backend.
pub struct StaticFactory {
    backend: Arc<dyn Backend>,
}

impl StaticFactory {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl BackendFactory for StaticFactory {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn create(&self) -> BackendResult<Arc<dyn Backend>> {
        Ok(self.backend.clone())
    }
}

/// Factory whose backend can never be materialized.
pub struct FailingFactory {
    name: String,
}

impl FailingFactory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl BackendFactory for FailingFactory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self) -> BackendResult<Arc<dyn Backend>> {
        Err(BackendError::init(&self.name, "model files not found"))
    }
}
