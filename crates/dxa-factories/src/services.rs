//! Per-localization services handed to providers and factories

use crate::cache::CacheAgent;
use crate::error::ConstructionError;
use dxa_core::{ContentServiceConfig, Localization};
use std::sync::Arc;

/// Resolves the numeric publication behind a localization
#[derive(Debug, Clone)]
pub struct PublicationResolver {
    localization: Localization,
    publication_id: u32,
}

impl PublicationResolver {
    /// Resolver for `localization`
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidPublicationId`] when the
    /// publication id is not numeric.
    pub fn new(localization: &Localization) -> Result<Self, ConstructionError> {
        let publication_id = localization.publication_id().parse().map_err(|_| {
            ConstructionError::invalid_publication_id(
                localization.id(),
                localization.publication_id(),
            )
        })?;
        Ok(Self {
            localization: localization.clone(),
            publication_id,
        })
    }

    /// The localization being resolved
    #[inline]
    #[must_use]
    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    /// Numeric publication id
    #[inline]
    #[must_use]
    pub fn publication_id(&self) -> u32 {
        self.publication_id
    }

    /// Publication URI such as `tcm:0-5-1`
    #[must_use]
    pub fn publication_uri(&self) -> String {
        format!(
            "{}:0-{}-1",
            self.localization.namespace().prefix(),
            self.publication_id
        )
    }
}

/// Services shared by the providers of one localization
#[derive(Debug, Clone)]
pub struct ProviderServices {
    resolver: Arc<PublicationResolver>,
    config: Arc<ContentServiceConfig>,
    span: tracing::Span,
}

impl ProviderServices {
    /// Bundle for `localization`
    ///
    /// # Errors
    ///
    /// Fails when the publication id cannot be resolved.
    pub fn new(
        localization: &Localization,
        config: Arc<ContentServiceConfig>,
    ) -> Result<Self, ConstructionError> {
        let resolver = PublicationResolver::new(localization)?;
        let span = tracing::info_span!(
            "localization",
            id = %localization.id(),
            publication = resolver.publication_id(),
        );
        Ok(Self {
            resolver: Arc::new(resolver),
            config,
            span,
        })
    }

    /// Publication resolver
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &PublicationResolver {
        &self.resolver
    }

    /// Content service configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ContentServiceConfig {
        &self.config
    }

    /// Span carrying the localization for every provider call
    #[inline]
    #[must_use]
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}

/// Services shared by the factories of one localization
#[derive(Debug, Clone)]
pub struct FactoryServices {
    provider: ProviderServices,
    cache: CacheAgent,
}

impl FactoryServices {
    /// Add a cache sized from the configuration
    #[must_use]
    pub fn new(provider: ProviderServices) -> Self {
        let config = provider.config();
        let cache = CacheAgent::new(config.cache_capacity, config.cache_ttl());
        Self::with_cache(provider, cache)
    }

    /// Use an existing cache
    #[must_use]
    pub fn with_cache(provider: ProviderServices, cache: CacheAgent) -> Self {
        Self { provider, cache }
    }

    /// Underlying provider services
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderServices {
        &self.provider
    }

    /// Content cache of this factory
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &CacheAgent {
        &self.cache
    }

    /// Span carrying the localization
    #[inline]
    #[must_use]
    pub fn span(&self) -> &tracing::Span {
        self.provider.span()
    }
}
