// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::{select_backend, BackendRegistry, CachingBackend, FallbackBackend};
use crate::cache::ResultCache;
use crate::config::Config;
use crate::engine::{ExecutionMetrics, ExecutionOptions, Executor};
use crate::errors::{ConfigError, ExecutionError, NodeFailure};
use crate::graph::Graph;
use crate::operations::{AnalysisOperation, TextUnit};
use crate::traits::{Backend, Operation};

/// Outcome of one pipeline stage.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub operation: String,
    pub metrics: ExecutionMetrics,
    pub errors: Vec<NodeFailure>,
}

/// Everything needed to run a configured pipeline.
pub struct Runtime {
    pub executor: Executor<TextUnit>,
    pub options: ExecutionOptions,
    pub backend: Arc<dyn Backend>,
    pub pipeline: Vec<Arc<dyn Operation<TextUnit>>>,
}

impl Runtime {
    /// Apply each pipeline stage to the current leaves, merging new nodes
    /// into the graph between stages.
    ///
    /// Per-leaf failures are reported in the stage's `errors`; they do not
    /// stop later stages.
    pub async fn run(
        &self,
        mut graph: Graph<TextUnit>,
    ) -> Result<(Graph<TextUnit>, Vec<StageReport>), ExecutionError> {
        let mut reports = Vec::with_capacity(self.pipeline.len());
        for operation in &self.pipeline {
            let result = self
                .executor
                .execute(&graph, operation.clone(), self.options)
                .await?;
            graph = graph
                .merge(result.new_nodes)
                .map_err(|e| ExecutionError::Internal(e.to_string()))?;
            reports.push(StageReport {
                operation: operation.name().to_string(),
                metrics: result.metrics,
                errors: result.errors,
            });
        }
        Ok((graph, reports))
    }
}

/// Runtime builder - wires cache, backend composition and executor from configuration.
///
/// The backend is assembled in this order:
/// 1. **Selection** over `backends.candidates` for `backends.required`
/// 2. **Fallback** to `backends.fallback`, if configured
/// 3. **Caching** around the result, if `backends.caching` is present
///
/// The shared result cache is built once here and injected into the executor.
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runtime using the built-in local backends.
    pub async fn from_config(cfg: &Config) -> Result<Runtime, ConfigError> {
        Self::with_registry(cfg, &BackendRegistry::with_local_backends()).await
    }

    /// Build a runtime resolving backend names against `registry`.
    pub async fn with_registry(
        cfg: &Config,
        registry: &BackendRegistry,
    ) -> Result<Runtime, ConfigError> {
        let options = cfg.execution.to_options()?;

        let candidates = registry.resolve(&cfg.backends.candidates)?;
        let mut backend = select_backend(&candidates, &cfg.backends.required).await?;

        if let Some(name) = &cfg.backends.fallback {
            let secondary = registry.get(name)?;
            backend = FallbackBackend::attach(backend, secondary.as_ref()).await;
        }

        if let Some(caching) = &cfg.backends.caching {
            backend = Arc::new(CachingBackend::new(backend, caching));
        }

        let cache = Arc::new(ResultCache::new(cfg.cache.to_cache_config()));
        let pipeline = cfg
            .pipeline
            .iter()
            .map(|kind| {
                Arc::new(AnalysisOperation::new(*kind, backend.clone()))
                    as Arc<dyn Operation<TextUnit>>
            })
            .collect();

        Ok(Runtime {
            executor: Executor::new(cache),
            options,
            backend,
            pipeline,
        })
    }
}
