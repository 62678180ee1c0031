// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Contract for pluggable text-analysis backends.
//!
//! A backend advertises what it can do through a fixed record of boolean
//! [`BackendCapabilities`] and exposes seven elementary functions. Every
//! function has a default body returning [`BackendError::NotSupported`], so a
//! backend only implements what it claims.
//!
//! Backends are materialized through a [`BackendFactory`]; materialization is
//! where an [`BackendError::InitError`] can surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::cache::EstimateSize;
use crate::errors::{BackendError, BackendResult};

/// One elementary text-analysis function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Tokenization,
    Sentencization,
    PosTagging,
    Lemmatization,
    Ner,
    DependencyParsing,
    RelationExtraction,
    CoreferenceResolution,
    ConstituencyParsing,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::Tokenization,
        Capability::Sentencization,
        Capability::PosTagging,
        Capability::Lemmatization,
        Capability::Ner,
        Capability::DependencyParsing,
        Capability::RelationExtraction,
        Capability::CoreferenceResolution,
        Capability::ConstituencyParsing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Tokenization => "tokenization",
            Capability::Sentencization => "sentencization",
            Capability::PosTagging => "pos_tagging",
            Capability::Lemmatization => "lemmatization",
            Capability::Ner => "ner",
            Capability::DependencyParsing => "dependency_parsing",
            Capability::RelationExtraction => "relation_extraction",
            Capability::CoreferenceResolution => "coreference_resolution",
            Capability::ConstituencyParsing => "constituency_parsing",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of capability flags for one backend instance.
///
/// These are claims made by the backend, checked explicitly by callers. A
/// composite backend's flags are not verified at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackendCapabilities {
    pub tokenization: bool,
    pub sentencization: bool,
    pub pos_tagging: bool,
    pub lemmatization: bool,
    pub ner: bool,
    pub dependency_parsing: bool,
    pub relation_extraction: bool,
    pub coreference_resolution: bool,
    pub constituency_parsing: bool,
}

impl BackendCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    /// Capabilities with exactly the listed flags set.
    pub fn from_list(capabilities: &[Capability]) -> Self {
        capabilities
            .iter()
            .fold(Self::none(), |caps, c| caps.with(*c))
    }

    pub fn with(mut self, capability: Capability) -> Self {
        *self.flag_mut(capability) = true;
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Tokenization => self.tokenization,
            Capability::Sentencization => self.sentencization,
            Capability::PosTagging => self.pos_tagging,
            Capability::Lemmatization => self.lemmatization,
            Capability::Ner => self.ner,
            Capability::DependencyParsing => self.dependency_parsing,
            Capability::RelationExtraction => self.relation_extraction,
            Capability::CoreferenceResolution => self.coreference_resolution,
            Capability::ConstituencyParsing => self.constituency_parsing,
        }
    }

    fn flag_mut(&mut self, capability: Capability) -> &mut bool {
        match capability {
            Capability::Tokenization => &mut self.tokenization,
            Capability::Sentencization => &mut self.sentencization,
            Capability::PosTagging => &mut self.pos_tagging,
            Capability::Lemmatization => &mut self.lemmatization,
            Capability::Ner => &mut self.ner,
            Capability::DependencyParsing => &mut self.dependency_parsing,
            Capability::RelationExtraction => &mut self.relation_extraction,
            Capability::CoreferenceResolution => &mut self.coreference_resolution,
            Capability::ConstituencyParsing => &mut self.constituency_parsing,
        }
    }

    /// Flag-wise OR of two capability records.
    pub fn union(&self, other: &BackendCapabilities) -> Self {
        Capability::ALL
            .iter()
            .filter(|c| self.supports(**c) || other.supports(**c))
            .fold(Self::none(), |caps, c| caps.with(*c))
    }

    /// The required capabilities this record lacks, in the order given.
    pub fn missing(&self, required: &[Capability]) -> Vec<Capability> {
        required
            .iter()
            .copied()
            .filter(|c| !self.supports(*c))
            .collect()
    }

    pub fn satisfies(&self, required: &[Capability]) -> bool {
        required.iter().all(|c| self.supports(*c))
    }

    pub fn enabled(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.supports(*c))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Byte offsets into the analysed text.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosTag {
    pub token: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lemma {
    pub token: String,
    pub lemma: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub head: String,
    pub dependent: String,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl EstimateSize for Token {
    fn estimated_size(&self) -> usize {
        self.text.estimated_size() + 16
    }
}

impl EstimateSize for Sentence {
    fn estimated_size(&self) -> usize {
        self.text.estimated_size() + 16
    }
}

impl EstimateSize for PosTag {
    fn estimated_size(&self) -> usize {
        self.token.estimated_size() + self.tag.estimated_size()
    }
}

impl EstimateSize for Lemma {
    fn estimated_size(&self) -> usize {
        self.token.estimated_size() + self.lemma.estimated_size()
    }
}

impl EstimateSize for Entity {
    fn estimated_size(&self) -> usize {
        self.text.estimated_size() + self.label.estimated_size() + 16
    }
}

impl EstimateSize for Dependency {
    fn estimated_size(&self) -> usize {
        self.head.estimated_size()
            + self.dependent.estimated_size()
            + self.relation.estimated_size()
    }
}

impl EstimateSize for Relation {
    fn estimated_size(&self) -> usize {
        self.subject.estimated_size()
            + self.predicate.estimated_size()
            + self.object.estimated_size()
    }
}

/// Provider of elementary text-analysis functions.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> BackendCapabilities;

    async fn tokenize(&self, _text: &str) -> BackendResult<Vec<Token>> {
        Err(BackendError::not_supported(self.name(), "tokenize"))
    }

    async fn sentencize(&self, _text: &str) -> BackendResult<Vec<Sentence>> {
        Err(BackendError::not_supported(self.name(), "sentencize"))
    }

    async fn pos_tag(&self, _text: &str) -> BackendResult<Vec<PosTag>> {
        Err(BackendError::not_supported(self.name(), "pos_tag"))
    }

    async fn lemmatize(&self, _text: &str) -> BackendResult<Vec<Lemma>> {
        Err(BackendError::not_supported(self.name(), "lemmatize"))
    }

    async fn extract_entities(&self, _text: &str) -> BackendResult<Vec<Entity>> {
        Err(BackendError::not_supported(self.name(), "extract_entities"))
    }

    async fn parse_dependencies(&self, _text: &str) -> BackendResult<Vec<Dependency>> {
        Err(BackendError::not_supported(self.name(), "parse_dependencies"))
    }

    async fn extract_relations(&self, _text: &str) -> BackendResult<Vec<Relation>> {
        Err(BackendError::not_supported(self.name(), "extract_relations"))
    }
}

/// Materializes a backend instance on demand.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    fn name(&self) -> &str;

    async fn create(&self) -> BackendResult<Arc<dyn Backend>>;
}
