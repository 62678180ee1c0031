// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event the engine emits is a small struct with a `Display`
//! implementation and a [`messages::StructuredLog`] implementation. This keeps
//! log text out of the call sites and gives each event a consistent set of
//! structured fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - executor lifecycle and per-leaf failures
//! * `messages::cache` - result cache eviction and expiry
//! * `messages::backend` - backend materialization, selection and fallback
//!
//! # Usage
//!
//! ```rust
//! use leafgraph::observability::messages::engine::ExecutionStarted;
//! use leafgraph::observability::messages::StructuredLog;
//!
//! ExecutionStarted {
//!     operation: "tokenize",
//!     strategy: "parallel",
//!     leaf_count: 5,
//!     concurrency: 4,
//! }
//! .log();
//! ```

pub mod messages;
