// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text-analysis backends and the combinators that compose them.
//!
//! Every backend implements the [`Backend`](crate::traits::Backend) trait and
//! is materialized through a [`BackendFactory`](crate::traits::BackendFactory).
//! The combinators here take backends (or factories) and return new backends,
//! so compositions nest freely:
//!
//! ```text
//! Registry → Selection → Fallback → Caching → Operation → Executor
//! ```
//!
//! # Combinators
//!
//! - **Fallback**: try the primary, retry the secondary on *any* failure.
//! - **Caching**: memoize the five core functions per input text.
//! - **Selection**: first candidate whose capabilities cover a required set.
//!
//! # Local Backends
//!
//! - **rule_based**: tokenization, sentencization, lemmatization, NER
//! - **whitespace**: tokenization only
//!
//! # Stub Backends (Test-Only)
//!
//! Scripted backends and factories with deterministic failures for exercising
//! the combinators and the executor. NOT available in production builds.
//!
//! # Example
//!
//! ```rust
//! use leafgraph::backends::{select_backend, BackendRegistry, CachingBackend, CachingOptions};
//! use leafgraph::traits::Capability;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), leafgraph::errors::BackendError> {
//! let registry = BackendRegistry::with_local_backends();
//! let candidates = registry.resolve(&["whitespace".to_string(), "rule_based".to_string()])?;
//! let backend = select_backend(&candidates, &[Capability::Lemmatization]).await?;
//! let backend = Arc::new(CachingBackend::new(backend, &CachingOptions::default()));
//! # let _ = backend;
//! # Ok(())
//! # }
//! ```

pub mod caching;
pub mod fallback;
pub mod local;
pub mod registry;
pub mod selection;
#[cfg(test)]
pub mod stub;

pub use caching::{CachingBackend, CachingOptions};
pub use fallback::FallbackBackend;
pub use registry::BackendRegistry;
pub use selection::select_backend;
