// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete operations over text graphs.

pub mod analysis;
#[cfg(test)]
pub mod stub;

pub use analysis::{AnalysisKind, AnalysisOperation, TextUnit, UnitKind};
