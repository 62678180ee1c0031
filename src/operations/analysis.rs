// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operations that apply one elementary backend function to text nodes.
//!
//! Each result item the backend returns becomes one child node of the node
//! it was computed from, so a `sentencize` round followed by a `tokenize`
//! round yields document -> sentence -> token lineage in the graph.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::EstimateSize;
use crate::errors::{OperationError, ValidationError};
use crate::graph::GraphNode;
use crate::traits::{
    Backend, Capability, Complexity, CostEstimate, Operation, ValidationReport,
};

/// Rough characters-per-token ratio used for token cost estimates.
const CHARS_PER_TOKEN: u64 = 4;

/// What a text node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Document,
    Sentence,
    Token,
    PosTag,
    Lemma,
    Entity,
    Dependency,
    Relation,
}

/// Payload of a node in a text-analysis graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    pub kind: UnitKind,
    pub text: String,
    /// Extra label produced by the analysis (tag, lemma, entity label, ...).
    pub annotation: Option<String>,
}

impl TextUnit {
    pub fn document(text: impl Into<String>) -> Self {
        Self::new(UnitKind::Document, text, None)
    }

    pub fn new(kind: UnitKind, text: impl Into<String>, annotation: Option<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            annotation,
        }
    }
}

impl fmt::Display for TextUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.annotation {
            Some(annotation) => write!(f, "{:?} \"{}\" [{}]", self.kind, self.text, annotation),
            None => write!(f, "{:?} \"{}\"", self.kind, self.text),
        }
    }
}

impl EstimateSize for TextUnit {
    fn estimated_size(&self) -> usize {
        8 + self.text.estimated_size() + self.annotation.estimated_size()
    }
}

/// The seven elementary functions a backend can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Tokenize,
    Sentencize,
    PosTag,
    Lemmatize,
    ExtractEntities,
    ParseDependencies,
    ExtractRelations,
}

impl AnalysisKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisKind::Tokenize => "tokenize",
            AnalysisKind::Sentencize => "sentencize",
            AnalysisKind::PosTag => "pos_tag",
            AnalysisKind::Lemmatize => "lemmatize",
            AnalysisKind::ExtractEntities => "extract_entities",
            AnalysisKind::ParseDependencies => "parse_dependencies",
            AnalysisKind::ExtractRelations => "extract_relations",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            AnalysisKind::Tokenize => Capability::Tokenization,
            AnalysisKind::Sentencize => Capability::Sentencization,
            AnalysisKind::PosTag => Capability::PosTagging,
            AnalysisKind::Lemmatize => Capability::Lemmatization,
            AnalysisKind::ExtractEntities => Capability::Ner,
            AnalysisKind::ParseDependencies => Capability::DependencyParsing,
            AnalysisKind::ExtractRelations => Capability::RelationExtraction,
        }
    }

    fn cost_profile(&self) -> (Complexity, u64) {
        // (complexity, microseconds per character)
        match self {
            AnalysisKind::Tokenize | AnalysisKind::Sentencize => (Complexity::Low, 1),
            AnalysisKind::Lemmatize => (Complexity::Low, 2),
            AnalysisKind::PosTag => (Complexity::Medium, 5),
            AnalysisKind::ExtractEntities => (Complexity::Medium, 10),
            AnalysisKind::ParseDependencies => (Complexity::High, 20),
            AnalysisKind::ExtractRelations => (Complexity::High, 25),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies one [`AnalysisKind`] through a backend to every node it is given.
pub struct AnalysisOperation {
    kind: AnalysisKind,
    backend: Arc<dyn Backend>,
}

impl AnalysisOperation {
    pub fn new(kind: AnalysisKind, backend: Arc<dyn Backend>) -> Self {
        Self { kind, backend }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    async fn analyse(&self, text: &str) -> Result<Vec<TextUnit>, OperationError> {
        let units = match self.kind {
            AnalysisKind::Tokenize => self
                .backend
                .tokenize(text)
                .await?
                .into_iter()
                .map(|t| TextUnit::new(UnitKind::Token, t.text, None))
                .collect(),
            AnalysisKind::Sentencize => self
                .backend
                .sentencize(text)
                .await?
                .into_iter()
                .map(|s| TextUnit::new(UnitKind::Sentence, s.text, None))
                .collect(),
            AnalysisKind::PosTag => self
                .backend
                .pos_tag(text)
                .await?
                .into_iter()
                .map(|p| TextUnit::new(UnitKind::PosTag, p.token, Some(p.tag)))
                .collect(),
            AnalysisKind::Lemmatize => self
                .backend
                .lemmatize(text)
                .await?
                .into_iter()
                .map(|l| TextUnit::new(UnitKind::Lemma, l.token, Some(l.lemma)))
                .collect(),
            AnalysisKind::ExtractEntities => self
                .backend
                .extract_entities(text)
                .await?
                .into_iter()
                .map(|e| TextUnit::new(UnitKind::Entity, e.text, Some(e.label)))
                .collect(),
            AnalysisKind::ParseDependencies => self
                .backend
                .parse_dependencies(text)
                .await?
                .into_iter()
                .map(|d| {
                    TextUnit::new(
                        UnitKind::Dependency,
                        d.dependent,
                        Some(format!("{} <- {}", d.relation, d.head)),
                    )
                })
                .collect(),
            AnalysisKind::ExtractRelations => self
                .backend
                .extract_relations(text)
                .await?
                .into_iter()
                .map(|r| {
                    TextUnit::new(
                        UnitKind::Relation,
                        format!("{} {} {}", r.subject, r.predicate, r.object),
                        Some(r.predicate),
                    )
                })
                .collect(),
        };
        Ok(units)
    }
}

#[async_trait]
impl Operation<TextUnit> for AnalysisOperation {
    fn name(&self) -> &str {
        self.kind.name()
    }

    async fn apply(
        &self,
        node: &GraphNode<TextUnit>,
    ) -> Result<Vec<GraphNode<TextUnit>>, OperationError> {
        let units = self.analyse(&node.data().text).await?;
        Ok(units
            .into_iter()
            .map(|unit| GraphNode::child_of(node, unit, self.kind.name()))
            .collect())
    }

    fn validate(&self, node: &GraphNode<TextUnit>) -> ValidationReport {
        let mut report = ValidationReport::valid();
        if !self.backend.capabilities().supports(self.kind.capability()) {
            report = report.with_error(ValidationError::for_node(
                node.id(),
                format!(
                    "backend '{}' does not claim capability '{}' required by '{}'",
                    self.backend.name(),
                    self.kind.capability(),
                    self.kind
                ),
            ));
        }
        if node.data().text.trim().is_empty() {
            report = report.with_warning(format!(
                "node {} has empty text; '{}' will produce no children",
                node.id(),
                self.kind
            ));
        }
        report
    }

    fn estimate_cost(&self, node: &GraphNode<TextUnit>) -> CostEstimate {
        let chars = node.data().text.chars().count() as u64;
        let (complexity, micros_per_char) = self.kind.cost_profile();
        CostEstimate {
            estimated_time: Duration::from_micros(chars * micros_per_char),
            complexity,
            token_cost: chars.div_ceil(CHARS_PER_TOKEN),
        }
    }
}
