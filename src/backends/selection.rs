// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capability-driven backend selection.

use std::sync::Arc;

use crate::errors::{BackendError, BackendResult};
use crate::observability::messages::backend::{BackendMaterializationFailed, BackendSelected};
use crate::observability::messages::StructuredLog;
use crate::traits::{Backend, BackendFactory, Capability};

/// Return the first candidate, in order, whose capabilities cover `required`.
///
/// Candidates are materialized one at a time and in order; a candidate that
/// fails to materialize is skipped. When nobody qualifies, the error names the
/// capabilities still missing from the closest candidate (the one lacking the
/// fewest), or all of `required` if no candidate materialized at all.
pub async fn select_backend(
    candidates: &[Arc<dyn BackendFactory>],
    required: &[Capability],
) -> BackendResult<Arc<dyn Backend>> {
    let mut closest: Option<Vec<Capability>> = None;

    for (position, factory) in candidates.iter().enumerate() {
        let backend = match factory.create().await {
            Ok(backend) => backend,
            Err(error) => {
                BackendMaterializationFailed {
                    backend: factory.name(),
                    error: &error,
                }
                .log();
                continue;
            }
        };

        let missing = backend.capabilities().missing(required);
        if missing.is_empty() {
            BackendSelected {
                backend: backend.name(),
                position,
                candidate_count: candidates.len(),
            }
            .log();
            return Ok(backend);
        }

        if closest.as_ref().map_or(true, |best| missing.len() < best.len()) {
            closest = Some(missing);
        }
    }

    Err(BackendError::NoSuitableBackend {
        required: required.to_vec(),
        missing: closest.unwrap_or_else(|| required.to_vec()),
    })
}
