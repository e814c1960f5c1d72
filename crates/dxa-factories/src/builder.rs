//! Construction of default factories

use crate::defaults::{
    DefaultBinaryFactory, DefaultComponentFactory, DefaultComponentPresentationFactory,
    DefaultPageFactory,
};
use crate::error::ConstructionError;
use crate::factory::{BinaryFactory, ComponentFactory, ComponentPresentationFactory, PageFactory};
use crate::overrides::{NoOverrides, OverrideProvider};
use crate::provider::{BinaryProvider, ComponentPresentationProvider, PageProvider};
use crate::services::{FactoryServices, ProviderServices};
use dxa_client::{ContentClientFactory, GraphQlClientFactory};
use dxa_core::{ContentServiceConfig, Localization};
use std::sync::Arc;

/// Builds the default factory of each kind for a localization
///
/// Called by the registry under its per-kind lock, at most once per
/// localization and kind unless construction fails.
pub trait FactoryBuilder: Send + Sync {
    /// Component presentation factory
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the localization cannot be served.
    fn component_presentation_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn ComponentPresentationFactory>, ConstructionError>;

    /// Page factory reading dynamic presentations through `presentations`
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the localization cannot be served.
    fn page_factory(
        &self,
        localization: &Localization,
        presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn PageFactory>, ConstructionError>;

    /// Component factory reading components through `presentations`
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the localization cannot be served.
    fn component_factory(
        &self,
        localization: &Localization,
        presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn ComponentFactory>, ConstructionError>;

    /// Binary factory
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the localization cannot be served.
    fn binary_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn BinaryFactory>, ConstructionError>;
}

/// Builder wiring providers, services and the content client together
///
/// Configuration and cache agent registered with the [`OverrideProvider`]
/// take precedence over the builder's own.
#[derive(Clone)]
pub struct DefaultFactoryBuilder {
    config: Arc<ContentServiceConfig>,
    clients: Arc<dyn ContentClientFactory>,
    overrides: Arc<dyn OverrideProvider>,
}

impl DefaultFactoryBuilder {
    /// Builder over an explicit client factory
    #[must_use]
    pub fn new(config: Arc<ContentServiceConfig>, clients: Arc<dyn ContentClientFactory>) -> Self {
        Self {
            config,
            clients,
            overrides: Arc::new(NoOverrides),
        }
    }

    /// Consult `overrides` for configuration and cache agent
    #[must_use]
    pub fn with_overrides(mut self, overrides: Arc<dyn OverrideProvider>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Builder talking GraphQL to the configured endpoint
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn from_config(config: ContentServiceConfig) -> Result<Self, ConstructionError> {
        let config = Arc::new(config);
        let clients = GraphQlClientFactory::new(Arc::clone(&config))?;
        Ok(Self::new(config, Arc::new(clients)))
    }

    /// Client factory handed to providers
    #[inline]
    #[must_use]
    pub fn clients(&self) -> &Arc<dyn ContentClientFactory> {
        &self.clients
    }

    fn provider_services(
        &self,
        localization: &Localization,
    ) -> Result<ProviderServices, ConstructionError> {
        let config = self
            .overrides
            .config()
            .unwrap_or_else(|| Arc::clone(&self.config));
        ProviderServices::new(localization, config)
    }

    fn factory_services(&self, services: ProviderServices) -> FactoryServices {
        match self.overrides.cache_agent() {
            Some(cache) => FactoryServices::with_cache(services, cache),
            None => FactoryServices::new(services),
        }
    }
}

impl FactoryBuilder for DefaultFactoryBuilder {
    fn component_presentation_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn ComponentPresentationFactory>, ConstructionError> {
        let services = self.provider_services(localization)?;
        let provider = ComponentPresentationProvider::new(services.clone(), Arc::clone(&self.clients));
        Ok(Arc::new(DefaultComponentPresentationFactory::new(
            provider,
            self.factory_services(services),
        )))
    }

    fn page_factory(
        &self,
        localization: &Localization,
        presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn PageFactory>, ConstructionError> {
        let services = self.provider_services(localization)?;
        let provider = PageProvider::new(services.clone(), Arc::clone(&self.clients));
        Ok(Arc::new(DefaultPageFactory::new(
            provider,
            presentations,
            self.factory_services(services),
        )))
    }

    fn component_factory(
        &self,
        localization: &Localization,
        presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn ComponentFactory>, ConstructionError> {
        let services = self.provider_services(localization)?;
        Ok(Arc::new(DefaultComponentFactory::new(
            presentations,
            self.factory_services(services),
        )))
    }

    fn binary_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn BinaryFactory>, ConstructionError> {
        let services = self.provider_services(localization)?;
        let provider = BinaryProvider::new(services.clone(), Arc::clone(&self.clients));
        Ok(Arc::new(DefaultBinaryFactory::new(
            provider,
            self.factory_services(services),
        )))
    }
}

impl std::fmt::Debug for DefaultFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultFactoryBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
