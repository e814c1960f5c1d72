//! Localization and content namespace
//!
//! A [`Localization`] identifies one content partition (a publication within
//! a namespace). Every factory and binary lookup is scoped to one.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content namespace on the content service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentNamespace {
    /// Sites content (`tcm` URIs)
    #[default]
    Sites,

    /// Docs content (`ish` URIs)
    Docs,
}

impl ContentNamespace {
    /// Numeric namespace id used by the content service
    #[inline]
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Sites => 1,
            Self::Docs => 2,
        }
    }

    /// URI prefix for items in this namespace
    #[inline]
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sites => "tcm",
            Self::Docs => "ish",
        }
    }
}

impl FromStr for ContentNamespace {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcm" | "1" => Ok(Self::Sites),
            "ish" | "2" => Ok(Self::Docs),
            other => Err(CoreError::UnknownNamespace(other.to_string())),
        }
    }
}

impl fmt::Display for ContentNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Tenant/content partition context
///
/// Owned by the caller and never mutated by this workspace. The `id` is the
/// cache key for every per-localization factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Localization {
    id: String,
    namespace: ContentNamespace,
    publication_id: String,
}

impl Localization {
    /// Create a localization
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        namespace: ContentNamespace,
        publication_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            namespace,
            publication_id: publication_id.into(),
        }
    }

    /// Create a Sites localization whose id equals its publication id
    #[must_use]
    pub fn for_publication(publication_id: impl Into<String>) -> Self {
        let publication_id = publication_id.into();
        Self::new(publication_id.clone(), ContentNamespace::Sites, publication_id)
    }

    /// Stable localization id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Content namespace
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> ContentNamespace {
        self.namespace
    }

    /// Publication identifier, as configured
    #[inline]
    #[must_use]
    pub fn publication_id(&self) -> &str {
        &self.publication_id
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{})",
            self.id, self.namespace, self.publication_id
        )
    }
}
