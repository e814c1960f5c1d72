//! Factory contracts
//!
//! One trait per [`FactoryKind`](crate::FactoryKind). Instances are built
//! once per localization by the registry and shared across callers, so
//! every implementation must be safe to use from many tasks at once.

use crate::error::FactoryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use dxa_core::{BinaryContent, ComponentModel, ComponentPresentation, PageModel};

/// Loads pages by URL
#[async_trait]
pub trait PageFactory: Send + Sync {
    /// Page published at `url`, `None` when nothing is published there
    async fn find_page(&self, url: &str) -> Result<Option<PageModel>, FactoryError>;
}

/// Loads component presentations
#[async_trait]
pub trait ComponentPresentationFactory: Send + Sync {
    /// Presentation of a component with a template
    ///
    /// Without a template id the content service picks the highest priority
    /// template.
    async fn component_presentation(
        &self,
        component_id: u32,
        template_id: Option<u32>,
    ) -> Result<Option<ComponentPresentation>, FactoryError>;
}

/// Loads components
#[async_trait]
pub trait ComponentFactory: Send + Sync {
    /// Component by item id
    async fn component(&self, component_id: u32) -> Result<Option<ComponentModel>, FactoryError>;
}

/// Loads binaries by URL
#[async_trait]
pub trait BinaryFactory: Send + Sync {
    /// Binary published at `url`, `None` when nothing is published there
    async fn find_binary(&self, url: &str) -> Result<Option<BinaryContent>, FactoryError>;

    /// Initial publish date of the binary at `url`
    async fn last_published_date(&self, url: &str) -> Result<NaiveDateTime, FactoryError>;
}

macro_rules! opaque_debug {
    ($($factory:ident),+) => {
        $(
            impl std::fmt::Debug for dyn $factory {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(stringify!($factory))
                }
            }
        )+
    };
}

opaque_debug!(PageFactory, ComponentPresentationFactory, ComponentFactory, BinaryFactory);
