// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-backend composite that absorbs every failure of the first backend.
//!
//! Each call goes to the primary first. If the primary returns *any* error,
//! including [`BackendError::NotSupported`], the same input is sent to the
//! secondary and its answer is returned. Capabilities are not consulted when
//! routing, so every call pays for one primary attempt even when the primary
//! is known not to support it.
//!
//! The composite's capability record is the OR of both sources. It is a claim,
//! not a guarantee: neither backend is probed to confirm it.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{BackendError, BackendResult};
use crate::observability::messages::backend::{BackendMaterializationFailed, FallbackEngaged};
use crate::observability::messages::StructuredLog;
use crate::traits::backend::{
    Dependency, Entity, Lemma, PosTag, Relation, Sentence, Token,
};
use crate::traits::{Backend, BackendCapabilities, BackendFactory};

pub struct FallbackBackend {
    name: String,
    primary: Arc<dyn Backend>,
    secondary: Arc<dyn Backend>,
    capabilities: BackendCapabilities,
}

impl FallbackBackend {
    pub fn new(primary: Arc<dyn Backend>, secondary: Arc<dyn Backend>) -> Self {
        let name = format!("fallback({}, {})", primary.name(), secondary.name());
        let capabilities = primary.capabilities().union(&secondary.capabilities());
        Self {
            name,
            primary,
            secondary,
            capabilities,
        }
    }

    /// Materialize both factories and compose them.
    ///
    /// If the primary cannot be materialized the secondary is adopted as-is.
    /// If only the secondary fails, the primary is returned on its own.
    pub async fn compose(
        primary: &dyn BackendFactory,
        secondary: &dyn BackendFactory,
    ) -> BackendResult<Arc<dyn Backend>> {
        match primary.create().await {
            Ok(primary_backend) => Ok(Self::attach(primary_backend, secondary).await),
            Err(error) => {
                BackendMaterializationFailed {
                    backend: primary.name(),
                    error: &error,
                }
                .log();
                secondary.create().await
            }
        }
    }

    /// Put `secondary` behind an already materialized primary.
    ///
    /// Returns the primary unchanged if `secondary` cannot be materialized.
    pub async fn attach(
        primary: Arc<dyn Backend>,
        secondary: &dyn BackendFactory,
    ) -> Arc<dyn Backend> {
        match secondary.create().await {
            Ok(secondary_backend) => Arc::new(Self::new(primary, secondary_backend)),
            Err(error) => {
                BackendMaterializationFailed {
                    backend: secondary.name(),
                    error: &error,
                }
                .log();
                primary
            }
        }
    }

    fn engage(&self, operation: &str, error: &BackendError) {
        FallbackEngaged {
            primary: self.primary.name(),
            secondary: self.secondary.name(),
            operation,
            error,
        }
        .log();
    }
}

macro_rules! try_primary_then_secondary {
    ($self:ident, $method:ident, $text:ident) => {
        match $self.primary.$method($text).await {
            Ok(result) => Ok(result),
            Err(error) => {
                $self.engage(stringify!($method), &error);
                $self.secondary.$method($text).await
            }
        }
    };
}

#[async_trait]
impl Backend for FallbackBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    async fn tokenize(&self, text: &str) -> BackendResult<Vec<Token>> {
        try_primary_then_secondary!(self, tokenize, text)
    }

    async fn sentencize(&self, text: &str) -> BackendResult<Vec<Sentence>> {
        try_primary_then_secondary!(self, sentencize, text)
    }

    async fn pos_tag(&self, text: &str) -> BackendResult<Vec<PosTag>> {
        try_primary_then_secondary!(self, pos_tag, text)
    }

    async fn lemmatize(&self, text: &str) -> BackendResult<Vec<Lemma>> {
        try_primary_then_secondary!(self, lemmatize, text)
    }

    async fn extract_entities(&self, text: &str) -> BackendResult<Vec<Entity>> {
        try_primary_then_secondary!(self, extract_entities, text)
    }

    async fn parse_dependencies(&self, text: &str) -> BackendResult<Vec<Dependency>> {
        try_primary_then_secondary!(self, parse_dependencies, text)
    }

    async fn extract_relations(&self, text: &str) -> BackendResult<Vec<Relation>> {
        try_primary_then_secondary!(self, extract_relations, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FailingFactory, ScriptedBackend, StaticFactory};
    use crate::traits::Capability;

    fn scripted(name: &str, caps: &[Capability], suffix: &str) -> Arc<dyn Backend> {
        Arc::new(ScriptedBackend::new(name, caps, suffix))
    }

    #[tokio::test]
    async fn test_primary_answer_wins_when_it_succeeds() {
        let a = scripted("a", &[Capability::Tokenization], "-a");
        let b = scripted("b", &[Capability::Tokenization], "-b");
        let composite = FallbackBackend::new(a.clone(), b);

        let expected = a.tokenize("hello").await.unwrap();
        assert_eq!(composite.tokenize("hello").await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_secondary_answers_when_primary_fails() {
        let a = scripted("a", &[Capability::Tokenization], "-a");
        let b = scripted("b", &[Capability::Tokenization, Capability::Lemmatization], "-b");
        let composite = FallbackBackend::new(a.clone(), b.clone());

        // "a" does not lemmatize, so the call falls through to "b".
        assert!(a.lemmatize("cats").await.is_err());
        assert_eq!(
            composite.lemmatize("cats").await.unwrap(),
            b.lemmatize("cats").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_operation_errors_are_absorbed_too() {
        let broken: Arc<dyn Backend> = Arc::new(ScriptedBackend::broken("broken"));
        let b = scripted("b", &[Capability::Tokenization], "-b");
        let composite = FallbackBackend::new(broken, b.clone());

        assert_eq!(
            composite.tokenize("x").await.unwrap(),
            b.tokenize("x").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_secondary_error() {
        let a = scripted("a", &[], "-a");
        let b = scripted("b", &[], "-b");
        let composite = FallbackBackend::new(a, b);

        let err = composite.pos_tag("x").await.unwrap_err();
        assert_eq!(err, BackendError::not_supported("b", "pos_tag"));
    }

    #[tokio::test]
    async fn test_capabilities_are_the_union() {
        let a = scripted("a", &[Capability::Tokenization], "-a");
        let b = scripted("b", &[Capability::Ner], "-b");
        let composite = FallbackBackend::new(a.clone(), b.clone());

        for capability in Capability::ALL {
            assert_eq!(
                composite.capabilities().supports(capability),
                a.capabilities().supports(capability) || b.capabilities().supports(capability)
            );
        }
        assert_eq!(composite.name(), "fallback(a, b)");
    }

    #[tokio::test]
    async fn test_compose_adopts_secondary_when_primary_cannot_materialize() {
        let primary = FailingFactory::new("gone");
        let secondary = StaticFactory::new(scripted("b", &[Capability::Tokenization], "-b"));

        let backend = FallbackBackend::compose(&primary, &secondary).await.unwrap();
        assert_eq!(backend.name(), "b");
    }

    #[tokio::test]
    async fn test_compose_keeps_primary_when_secondary_cannot_materialize() {
        let primary = StaticFactory::new(scripted("a", &[Capability::Tokenization], "-a"));
        let secondary = FailingFactory::new("gone");

        let backend = FallbackBackend::compose(&primary, &secondary).await.unwrap();
        assert_eq!(backend.name(), "a");
    }

    #[tokio::test]
    async fn test_compose_builds_composite_when_both_materialize() {
        let primary = StaticFactory::new(scripted("a", &[Capability::Tokenization], "-a"));
        let secondary = StaticFactory::new(scripted("b", &[Capability::Ner], "-b"));

        let backend = FallbackBackend::compose(&primary, &secondary).await.unwrap();
        assert_eq!(backend.name(), "fallback(a, b)");
        assert!(backend.capabilities().satisfies(&[Capability::Tokenization, Capability::Ner]));
    }
}
