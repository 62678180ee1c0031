// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process backends built on simple text rules.

pub mod factory;
pub mod rule_based;
pub mod whitespace;

pub use factory::LocalBackendFactory;
pub use rule_based::RuleBasedBackend;
pub use whitespace::WhitespaceBackend;
