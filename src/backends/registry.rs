// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::local::LocalBackendFactory;
use crate::errors::{BackendError, BackendResult};
use crate::traits::BackendFactory;

/// Name -> factory lookup for every backend the runtime can materialize.
///
/// Built once at startup and passed to whoever assembles backends.
#[derive(Clone, Default)]
pub struct BackendRegistry(HashMap<String, Arc<dyn BackendFactory>>);

impl BackendRegistry {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Registry pre-populated with the in-process backends.
    pub fn with_local_backends() -> Self {
        let mut registry = Self::new();
        for name in LocalBackendFactory::list_available_implementations() {
            registry.register(Arc::new(LocalBackendFactory::new(name)));
        }
        registry
    }

    /// Add a factory under its own name, replacing any previous one.
    pub fn register(&mut self, factory: Arc<dyn BackendFactory>) {
        self.0.insert(factory.name().to_string(), factory);
    }

    pub fn get(&self, name: &str) -> BackendResult<Arc<dyn BackendFactory>> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::UnknownBackend(name.to_string()))
    }

    /// Resolve names in order, failing on the first unknown one.
    pub fn resolve(&self, names: &[String]) -> BackendResult<Vec<Arc<dyn BackendFactory>>> {
        names.iter().map(|name| self.get(name)).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backend_count", &self.0.len())
            .field("backend_names", &self.names())
            .finish()
    }
}
