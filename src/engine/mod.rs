// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Leaf-frontier execution.
//!
//! The [`Executor`] applies one operation to every leaf of a graph using the
//! strategy named in [`ExecutionOptions`]:
//!
//! - **Sequential**: leaves in graph order, one at a time.
//! - **Parallel(n)**: spawned tasks bounded by a semaphore of `n` permits.
//! - **Batch / Streaming**: accepted, logged, and run as Sequential.

pub mod executor;
pub mod options;
mod parallel;
mod sequential;
#[cfg(test)]
mod integration_tests;

pub use executor::{ExecutionMetrics, ExecutionResult, Executor, NodeCache};
pub use options::{default_concurrency, ExecutionOptions, Strategy};
