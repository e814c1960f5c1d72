//! Per-localization factory registry
//!
//! One cache per [`FactoryKind`], keyed by localization id. A lookup that
//! misses asks the [`OverrideProvider`] first and falls back to the
//! [`FactoryBuilder`]; the result is cached for every later caller.
//!
//! Each cache is guarded by its own mutex, held across the check, the
//! construction and the insert, so a factory is built at most once per
//! localization and kind even under contention. A failed construction
//! caches nothing.

use crate::builder::{DefaultFactoryBuilder, FactoryBuilder};
use crate::error::ConstructionError;
use crate::factory::{BinaryFactory, ComponentFactory, ComponentPresentationFactory, PageFactory};
use crate::kind::{FactoryHandle, FactoryKind};
use crate::overrides::{NoOverrides, OverrideProvider, OverridingClientFactory};
use dxa_client::ContentClientFactory;
use dxa_core::{ContentServiceConfig, Localization};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type FactoryCache<T> = Mutex<HashMap<String, Arc<T>>>;

/// Registry of factories per localization
pub struct FactoryRegistry {
    builder: Arc<dyn FactoryBuilder>,
    overrides: Arc<dyn OverrideProvider>,
    pages: FactoryCache<dyn PageFactory>,
    component_presentations: FactoryCache<dyn ComponentPresentationFactory>,
    components: FactoryCache<dyn ComponentFactory>,
    binaries: FactoryCache<dyn BinaryFactory>,
}

impl FactoryRegistry {
    /// Registry building every factory with `builder`
    #[must_use]
    pub fn new(builder: Arc<dyn FactoryBuilder>) -> Self {
        Self {
            builder,
            overrides: Arc::new(NoOverrides),
            pages: Mutex::default(),
            component_presentations: Mutex::default(),
            components: Mutex::default(),
            binaries: Mutex::default(),
        }
    }

    /// Consult `overrides` before building
    #[must_use]
    pub fn with_overrides(mut self, overrides: Arc<dyn OverrideProvider>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Registry of default factories over `clients`
    ///
    /// A content client, configuration or cache agent supplied by
    /// `overrides` takes precedence for every default factory.
    #[must_use]
    pub fn with_defaults(
        config: Arc<ContentServiceConfig>,
        clients: Arc<dyn ContentClientFactory>,
        overrides: Arc<dyn OverrideProvider>,
    ) -> Self {
        let clients = OverridingClientFactory::new(clients, Arc::clone(&overrides));
        let builder =
            DefaultFactoryBuilder::new(config, Arc::new(clients)).with_overrides(Arc::clone(&overrides));
        Self::new(Arc::new(builder)).with_overrides(overrides)
    }

    /// Registry of default factories talking GraphQL to the configured endpoint
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn from_config(config: ContentServiceConfig) -> Result<Self, ConstructionError> {
        let builder = DefaultFactoryBuilder::from_config(config)?;
        Ok(Self::new(Arc::new(builder)))
    }

    /// Factory of `kind` for `localization`
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when no factory is cached and building
    /// one fails.
    pub fn factory(
        &self,
        kind: FactoryKind,
        localization: &Localization,
    ) -> Result<FactoryHandle, ConstructionError> {
        Ok(match kind {
            FactoryKind::Page => FactoryHandle::Page(self.page_factory(localization)?),
            FactoryKind::ComponentPresentation => FactoryHandle::ComponentPresentation(
                self.component_presentation_factory(localization)?,
            ),
            FactoryKind::Component => {
                FactoryHandle::Component(self.component_factory(localization)?)
            }
            FactoryKind::Binary => FactoryHandle::Binary(self.binary_factory(localization)?),
        })
    }

    /// Page factory for `localization`
    ///
    /// A default page factory shares this registry's component presentation
    /// factory for the same localization.
    ///
    /// # Errors
    ///
    /// See [`FactoryRegistry::factory`].
    pub fn page_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn PageFactory>, ConstructionError> {
        self.get_or_build(
            FactoryKind::Page,
            &self.pages,
            localization,
            FactoryHandle::into_page,
            || {
                let presentations = self.component_presentation_factory(localization)?;
                self.builder.page_factory(localization, presentations)
            },
        )
    }

    /// Component presentation factory for `localization`
    ///
    /// # Errors
    ///
    /// See [`FactoryRegistry::factory`].
    pub fn component_presentation_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn ComponentPresentationFactory>, ConstructionError> {
        self.get_or_build(
            FactoryKind::ComponentPresentation,
            &self.component_presentations,
            localization,
            FactoryHandle::into_component_presentation,
            || self.builder.component_presentation_factory(localization),
        )
    }

    /// Component factory for `localization`
    ///
    /// # Errors
    ///
    /// See [`FactoryRegistry::factory`].
    pub fn component_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn ComponentFactory>, ConstructionError> {
        self.get_or_build(
            FactoryKind::Component,
            &self.components,
            localization,
            FactoryHandle::into_component,
            || {
                let presentations = self.component_presentation_factory(localization)?;
                self.builder.component_factory(localization, presentations)
            },
        )
    }

    /// Binary factory for `localization`
    ///
    /// # Errors
    ///
    /// See [`FactoryRegistry::factory`].
    pub fn binary_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn BinaryFactory>, ConstructionError> {
        self.get_or_build(
            FactoryKind::Binary,
            &self.binaries,
            localization,
            FactoryHandle::into_binary,
            || self.builder.binary_factory(localization),
        )
    }

    /// Number of localizations with a cached factory of `kind`
    #[must_use]
    pub fn cached_count(&self, kind: FactoryKind) -> usize {
        match kind {
            FactoryKind::Page => self.pages.lock().len(),
            FactoryKind::ComponentPresentation => self.component_presentations.lock().len(),
            FactoryKind::Component => self.components.lock().len(),
            FactoryKind::Binary => self.binaries.lock().len(),
        }
    }

    /// Whether a factory of `kind` is cached for `localization`
    #[must_use]
    pub fn is_cached(&self, kind: FactoryKind, localization: &Localization) -> bool {
        let id = localization.id();
        match kind {
            FactoryKind::Page => self.pages.lock().contains_key(id),
            FactoryKind::ComponentPresentation => {
                self.component_presentations.lock().contains_key(id)
            }
            FactoryKind::Component => self.components.lock().contains_key(id),
            FactoryKind::Binary => self.binaries.lock().contains_key(id),
        }
    }

    fn get_or_build<T, B>(
        &self,
        kind: FactoryKind,
        cache: &FactoryCache<T>,
        localization: &Localization,
        narrow: fn(FactoryHandle) -> Option<Arc<T>>,
        build: B,
    ) -> Result<Arc<T>, ConstructionError>
    where
        T: ?Sized,
        B: FnOnce() -> Result<Arc<T>, ConstructionError>,
    {
        if localization.id().is_empty() {
            return Err(ConstructionError::EmptyLocalizationId);
        }

        let mut factories = cache.lock();
        if let Some(factory) = factories.get(localization.id()) {
            return Ok(Arc::clone(factory));
        }

        let factory = match self.resolve_override(kind, localization, narrow) {
            Some(factory) => factory,
            None => {
                tracing::debug!(
                    "Building default {} factory for localization {}",
                    kind,
                    localization
                );
                build()?
            }
        };

        factories.insert(localization.id().to_string(), Arc::clone(&factory));
        Ok(factory)
    }

    fn resolve_override<T: ?Sized>(
        &self,
        kind: FactoryKind,
        localization: &Localization,
        narrow: fn(FactoryHandle) -> Option<Arc<T>>,
    ) -> Option<Arc<T>> {
        let handle = self.overrides.try_resolve(kind, localization)?;
        let resolved = handle.kind();
        let factory = narrow(handle);
        if factory.is_some() {
            tracing::debug!(
                "Using registered {} factory for localization {}",
                kind,
                localization
            );
        } else {
            tracing::debug!(
                "Ignoring registered {} factory offered as {} factory",
                resolved,
                kind
            );
        }
        factory
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("pages", &self.cached_count(FactoryKind::Page))
            .field(
                "component_presentations",
                &self.cached_count(FactoryKind::ComponentPresentation),
            )
            .field("components", &self.cached_count(FactoryKind::Component))
            .field("binaries", &self.cached_count(FactoryKind::Binary))
            .finish_non_exhaustive()
    }
}
