// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // text-analysis backends + combinators
pub mod cache;      // generic TTL/LRU result cache
pub mod config;     // config loading + runtime wiring
pub mod engine;     // leaf-frontier executor
pub mod errors;     // error handling
pub mod graph;      // append-only node graph
pub mod observability;
pub mod operations; // concrete operations over text nodes
pub mod traits;     // operation + backend contracts
