// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `engine` - executor lifecycle and per-leaf failures
//! * `cache` - result cache eviction and expiry
//! * `backend` - backend materialization, selection and fallback

use tracing::Span;

pub mod backend;
pub mod cache;
pub mod engine;

/// A log event that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the event at its designated level.
    fn log(&self);

    /// Build a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
