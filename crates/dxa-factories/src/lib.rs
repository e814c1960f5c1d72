//! DXA Factories - Per-localization factory registry
//!
//! Content is read through four kinds of factories (pages, component
//! presentations, components and binaries). [`FactoryRegistry`] hands out
//! one instance of each kind per localization, built lazily on first use:
//!
//! 1. A cached instance is returned as is
//! 2. Otherwise a factory registered with the [`OverrideProvider`] is used
//! 3. Otherwise the [`FactoryBuilder`] constructs the default
//!
//! Default page and component factories read dynamic presentations
//! through the registry's component presentation factory for the same
//! localization.
//!
//! # Example
//!
//! ```rust,ignore
//! use dxa_core::{ContentServiceConfig, Localization};
//! use dxa_factories::FactoryRegistry;
//!
//! let registry = FactoryRegistry::from_config(ContentServiceConfig::new())?;
//! let localization = Localization::for_publication("5");
//!
//! let pages = registry.page_factory(&localization)?;
//! let page = pages.find_page("/index.html").await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod builder;
mod cache;
mod defaults;
mod error;
mod factory;
mod kind;
mod overrides;
mod provider;
mod registry;
mod services;

// Re-exports
pub use builder::{DefaultFactoryBuilder, FactoryBuilder};
pub use cache::CacheAgent;
pub use defaults::{
    DefaultBinaryFactory, DefaultComponentFactory, DefaultComponentPresentationFactory,
    DefaultPageFactory,
};
pub use error::{ConstructionError, FactoryError};
pub use factory::{BinaryFactory, ComponentFactory, ComponentPresentationFactory, PageFactory};
pub use kind::{FactoryHandle, FactoryKind};
pub use overrides::{NoOverrides, OverrideProvider, OverridingClientFactory, StaticOverrides};
pub use provider::{BinaryProvider, ComponentPresentationProvider, PageProvider};
pub use registry::FactoryRegistry;
pub use services::{FactoryServices, ProviderServices, PublicationResolver};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
