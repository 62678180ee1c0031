// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
mod loader;
mod runtime;


pub use loader::{
    load_and_validate_config, load_config, validate_config, BackendsConfig, CacheSettings, Config,
    ExecutionConfig,
};
pub use runtime::{Runtime, RuntimeBuilder, StageReport};
