// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend materialization, selection and fallback.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A backend factory failed to produce an instance.
///
/// # Log Level
/// `warn!` - Another candidate or the fallback is used instead
pub struct BackendMaterializationFailed<'a> {
    pub backend: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for BackendMaterializationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Backend '{}' could not be materialized: {}", self.backend, self.error)
    }
}

impl StructuredLog for BackendMaterializationFailed<'_> {
    fn log(&self) {
        tracing::warn!(backend = self.backend, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "backend_materialization_failed",
            span_name = name,
            backend = self.backend
        )
    }
}

/// The primary backend failed a call and the secondary is being tried.
///
/// # Log Level
/// `debug!` - Expected for operations the primary does not support
pub struct FallbackEngaged<'a> {
    pub primary: &'a str,
    pub secondary: &'a str,
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FallbackEngaged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' failed on {}: {}; retrying with '{}'",
            self.primary, self.operation, self.error, self.secondary
        )
    }
}

impl StructuredLog for FallbackEngaged<'_> {
    fn log(&self) {
        tracing::debug!(
            primary = self.primary,
            secondary = self.secondary,
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "fallback_engaged",
            span_name = name,
            primary = self.primary,
            secondary = self.secondary,
            operation = self.operation,
        )
    }
}

/// A backend was chosen from a candidate list.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BackendSelected<'a> {
    pub backend: &'a str,
    pub position: usize,
    pub candidate_count: usize,
}

impl Display for BackendSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Selected backend '{}' (candidate {} of {})",
            self.backend,
            self.position + 1,
            self.candidate_count
        )
    }
}

impl StructuredLog for BackendSelected<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            position = self.position,
            candidate_count = self.candidate_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("backend_selected", span_name = name, backend = self.backend)
    }
}
