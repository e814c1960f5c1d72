//! Externally registered factory and client overrides

use crate::cache::CacheAgent;
use crate::kind::{FactoryHandle, FactoryKind};
use dxa_client::{ContentClient, ContentClientFactory};
use dxa_core::{ContentServiceConfig, Localization};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Source of caller-registered factories
///
/// Consulted by the registry before it builds a default factory. Returning
/// `None` means no override is registered; an implementation must not use
/// panics to signal absence.
pub trait OverrideProvider: Send + Sync {
    /// Factory registered for `kind` and `localization`, if any
    fn try_resolve(&self, kind: FactoryKind, localization: &Localization) -> Option<FactoryHandle>;

    /// Content client to use instead of the configured one
    fn content_client(&self) -> Option<Arc<dyn ContentClient>> {
        None
    }

    /// Configuration for default factories instead of the builder's own
    fn config(&self) -> Option<Arc<ContentServiceConfig>> {
        None
    }

    /// Cache shared by default factories instead of one per factory
    fn cache_agent(&self) -> Option<CacheAgent> {
        None
    }
}

/// No overrides at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideProvider for NoOverrides {
    fn try_resolve(&self, _kind: FactoryKind, _localization: &Localization) -> Option<FactoryHandle> {
        None
    }
}

/// Overrides registered up front, shared by every localization
#[derive(Clone, Default)]
pub struct StaticOverrides {
    factories: HashMap<FactoryKind, FactoryHandle>,
    client: Option<Arc<dyn ContentClient>>,
    config: Option<Arc<ContentServiceConfig>>,
    cache: Option<CacheAgent>,
}

impl StaticOverrides {
    /// Empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under its own kind
    #[must_use]
    pub fn with_factory(mut self, factory: FactoryHandle) -> Self {
        self.factories.insert(factory.kind(), factory);
        self
    }

    /// Register `factory` under `kind`, whatever its actual kind
    #[must_use]
    pub fn with_factory_for(mut self, kind: FactoryKind, factory: FactoryHandle) -> Self {
        self.factories.insert(kind, factory);
        self
    }

    /// Register a content client
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn ContentClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Register a configuration
    #[must_use]
    pub fn with_config(mut self, config: Arc<ContentServiceConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Register a cache agent
    #[must_use]
    pub fn with_cache_agent(mut self, cache: CacheAgent) -> Self {
        self.cache = Some(cache);
        self
    }
}

impl OverrideProvider for StaticOverrides {
    fn try_resolve(&self, kind: FactoryKind, _localization: &Localization) -> Option<FactoryHandle> {
        self.factories.get(&kind).cloned()
    }

    fn content_client(&self) -> Option<Arc<dyn ContentClient>> {
        self.client.clone()
    }

    fn config(&self) -> Option<Arc<ContentServiceConfig>> {
        self.config.clone()
    }

    fn cache_agent(&self) -> Option<CacheAgent> {
        self.cache.clone()
    }
}

impl fmt::Debug for StaticOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticOverrides")
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .field("client", &self.client.is_some())
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Client factory preferring an overriding content client
pub struct OverridingClientFactory {
    fallback: Arc<dyn ContentClientFactory>,
    overrides: Arc<dyn OverrideProvider>,
}

impl OverridingClientFactory {
    /// Ask `overrides` first, then `fallback`
    #[must_use]
    pub fn new(fallback: Arc<dyn ContentClientFactory>, overrides: Arc<dyn OverrideProvider>) -> Self {
        Self {
            fallback,
            overrides,
        }
    }
}

impl ContentClientFactory for OverridingClientFactory {
    fn create_client(&self) -> Arc<dyn ContentClient> {
        self.overrides
            .content_client()
            .unwrap_or_else(|| self.fallback.create_client())
    }
}

impl fmt::Debug for OverridingClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverridingClientFactory").finish_non_exhaustive()
    }
}
