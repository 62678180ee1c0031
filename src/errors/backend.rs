// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for text-analysis backends and their combinators.

use thiserror::Error;

use crate::traits::backend::Capability;

/// Error taxonomy shared by every backend and backend combinator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The backend does not implement the requested elementary function.
    #[error("Backend '{backend}' does not support operation '{operation}'")]
    NotSupported { backend: String, operation: String },

    /// The backend could not be materialized.
    #[error("Backend '{backend}' failed to initialize: {cause}")]
    InitError { backend: String, cause: String },

    /// The backend accepted the call but failed while running it.
    #[error("Backend '{backend}' failed during '{operation}': {cause}")]
    OperationError {
        backend: String,
        operation: String,
        cause: String,
    },

    /// No candidate covered every required capability.
    #[error(
        "No backend satisfies requirements [{}]: missing [{}]",
        join(.required),
        join(.missing)
    )]
    NoSuitableBackend {
        required: Vec<Capability>,
        missing: Vec<Capability>,
    },

    /// A backend name that is not present in the registry.
    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),
}

impl BackendError {
    pub fn not_supported(backend: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::NotSupported {
            backend: backend.into(),
            operation: operation.into(),
        }
    }

    pub fn init(backend: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::InitError {
            backend: backend.into(),
            cause: cause.into(),
        }
    }

    pub fn operation(
        backend: impl Into<String>,
        operation: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self::OperationError {
            backend: backend.into(),
            operation: operation.into(),
            cause: cause.into(),
        }
    }
}

fn join(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;
