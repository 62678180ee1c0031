// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use super::{RuleBasedBackend, WhitespaceBackend};
use crate::errors::{BackendError, BackendResult};
use crate::traits::{Backend, BackendFactory};

/// Factory for the in-process backends.
///
/// The implementation name determines which backend is created:
/// - "rule_based" -> RuleBasedBackend
/// - "whitespace" -> WhitespaceBackend
pub struct LocalBackendFactory {
    implementation: String,
}

impl LocalBackendFactory {
    pub fn new(implementation: impl Into<String>) -> Self {
        Self {
            implementation: implementation.into(),
        }
    }

    pub fn create_backend(implementation: &str) -> BackendResult<Arc<dyn Backend>> {
        match implementation {
            RuleBasedBackend::NAME => Ok(Arc::new(RuleBasedBackend::new())),
            WhitespaceBackend::NAME => Ok(Arc::new(WhitespaceBackend::new())),
            other => Err(BackendError::init(
                other,
                format!("unknown local backend implementation '{}'", other),
            )),
        }
    }

    /// List all available local backend implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![RuleBasedBackend::NAME, WhitespaceBackend::NAME]
    }

    pub fn is_implementation_available(implementation: &str) -> bool {
        Self::list_available_implementations().contains(&implementation)
    }
}

#[async_trait]
impl BackendFactory for LocalBackendFactory {
    fn name(&self) -> &str {
        &self.implementation
    }

    async fn create(&self) -> BackendResult<Arc<dyn Backend>> {
        Self::create_backend(&self.implementation)
    }
}
