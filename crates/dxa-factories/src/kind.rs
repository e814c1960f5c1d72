//! Factory kinds and type-erased handles

use crate::factory::{BinaryFactory, ComponentFactory, ComponentPresentationFactory, PageFactory};
use std::fmt;
use std::sync::Arc;

/// The four factory kinds, each with its own registry cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    /// Pages by URL
    Page,
    /// Component presentations by component and template
    ComponentPresentation,
    /// Components by id
    Component,
    /// Binaries by URL
    Binary,
}

impl FactoryKind {
    /// All kinds
    pub const ALL: [Self; 4] = [
        Self::Page,
        Self::ComponentPresentation,
        Self::Component,
        Self::Binary,
    ];

    /// Stable name for logs
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::ComponentPresentation => "component presentation",
            Self::Component => "component",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A factory of any kind
#[derive(Clone)]
pub enum FactoryHandle {
    /// Page factory
    Page(Arc<dyn PageFactory>),
    /// Component presentation factory
    ComponentPresentation(Arc<dyn ComponentPresentationFactory>),
    /// Component factory
    Component(Arc<dyn ComponentFactory>),
    /// Binary factory
    Binary(Arc<dyn BinaryFactory>),
}

impl FactoryHandle {
    /// Kind of the wrapped factory
    #[must_use]
    pub fn kind(&self) -> FactoryKind {
        match self {
            Self::Page(_) => FactoryKind::Page,
            Self::ComponentPresentation(_) => FactoryKind::ComponentPresentation,
            Self::Component(_) => FactoryKind::Component,
            Self::Binary(_) => FactoryKind::Binary,
        }
    }

    /// Page factory, if this is one
    #[must_use]
    pub fn into_page(self) -> Option<Arc<dyn PageFactory>> {
        match self {
            Self::Page(factory) => Some(factory),
            _ => None,
        }
    }

    /// Component presentation factory, if this is one
    #[must_use]
    pub fn into_component_presentation(self) -> Option<Arc<dyn ComponentPresentationFactory>> {
        match self {
            Self::ComponentPresentation(factory) => Some(factory),
            _ => None,
        }
    }

    /// Component factory, if this is one
    #[must_use]
    pub fn into_component(self) -> Option<Arc<dyn ComponentFactory>> {
        match self {
            Self::Component(factory) => Some(factory),
            _ => None,
        }
    }

    /// Binary factory, if this is one
    #[must_use]
    pub fn into_binary(self) -> Option<Arc<dyn BinaryFactory>> {
        match self {
            Self::Binary(factory) => Some(factory),
            _ => None,
        }
    }

    /// Whether both handles wrap the same instance
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Page(a), Self::Page(b)) => Arc::ptr_eq(a, b),
            (Self::ComponentPresentation(a), Self::ComponentPresentation(b)) => Arc::ptr_eq(a, b),
            (Self::Component(a), Self::Component(b)) => Arc::ptr_eq(a, b),
            (Self::Binary(a), Self::Binary(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for FactoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FactoryHandle").field(&self.kind()).finish()
    }
}
