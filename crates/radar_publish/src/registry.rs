//! Publisher registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::PublishConfig;
use crate::error::{PublishError, PublishResult};
use crate::publisher::Publisher;
use crate::publishers::{TwByorPublisher, ZalandoPublisher};

/// Identifier of the publisher used when none is requested.
pub const DEFAULT_PUBLISHER: &str = "twbyor";

/// Maps publisher identifiers to implementations.
#[derive(Default)]
pub struct PublisherRegistry {
    publishers: BTreeMap<String, Arc<dyn Publisher>>,
}

impl PublisherRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            publishers: BTreeMap::new(),
        }
    }

    /// Registry with every built-in publisher.
    pub fn standard(config: &PublishConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TwByorPublisher::new(config.twbyor.clone())));
        registry.register(Arc::new(ZalandoPublisher::new(config.zalando.clone())));
        registry
    }

    /// Register a publisher under its `id()`, replacing any previous one.
    pub fn register(&mut self, publisher: Arc<dyn Publisher>) {
        let id = publisher.id().to_string();
        debug!("Registering publisher: {}", id);
        self.publishers.insert(id, publisher);
    }

    /// Get a publisher by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Publisher>> {
        self.publishers.get(id).cloned()
    }

    /// Get a publisher by id, returning an error if not found.
    pub fn get_required(&self, id: &str) -> PublishResult<Arc<dyn Publisher>> {
        self.get(id).ok_or_else(|| PublishError::UnknownPublisher {
            name: id.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Check if a publisher is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.publishers.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.publishers.keys().map(|s| s.as_str()).collect()
    }

    /// Registered publishers, sorted by id.
    pub fn list(&self) -> Vec<Arc<dyn Publisher>> {
        self.publishers.values().cloned().collect()
    }

    /// Number of registered publishers.
    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    /// Check if no publisher is registered.
    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }
}

impl std::fmt::Debug for PublisherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherRegistry")
            .field("publishers", &self.names())
            .finish()
    }
}
