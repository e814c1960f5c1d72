//! Binary retrieval model
//!
//! A binary is addressed either by numeric item id or by its published URL
//! path. The content service answers with [`BinaryMetadata`], whose variants
//! point at the downloadable renditions.

use crate::error::CoreError;
use crate::localization::ContentNamespace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical reference to a binary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryRef {
    /// Numeric item id
    Id(u32),

    /// Published URL path (e.g. `/media/logo.png`)
    Path(String),
}

impl BinaryRef {
    /// Numeric id, if this is an id reference
    #[inline]
    #[must_use]
    pub fn as_id(&self) -> Option<u32> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Path(_) => None,
        }
    }

    /// URL path, if this is a path reference
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Path(path) => Some(path),
        }
    }
}

impl fmt::Display for BinaryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

impl From<u32> for BinaryRef {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for BinaryRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for BinaryRef {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl FromStr for BinaryRef {
    type Err = CoreError;

    /// All-digit strings become ids, anything else a path
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::EmptyReference);
        }
        Ok(s.parse::<u32>()
            .map_or_else(|_| Self::Path(s.to_string()), Self::Id))
    }
}

/// Content manager URI of an item, e.g. `tcm:5-123`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CmUri {
    namespace: ContentNamespace,
    publication_id: u32,
    item_id: u32,
}

impl CmUri {
    /// Create URI
    #[inline]
    #[must_use]
    pub fn new(namespace: ContentNamespace, publication_id: u32, item_id: u32) -> Self {
        Self {
            namespace,
            publication_id,
            item_id,
        }
    }

    /// Item id part
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> u32 {
        self.item_id
    }

    /// Publication id part
    #[inline]
    #[must_use]
    pub fn publication_id(&self) -> u32 {
        self.publication_id
    }
}

impl fmt::Display for CmUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.namespace.prefix(),
            self.publication_id,
            self.item_id
        )
    }
}

/// One downloadable rendition of a binary
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BinaryVariant {
    /// Absolute download URL; may be empty when the service has none
    pub download_url: String,
    /// Logical path of the rendition
    pub path: String,
}

impl BinaryVariant {
    /// Create variant
    #[must_use]
    pub fn new(download_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into(),
            path: path.into(),
        }
    }
}

/// Binary metadata as returned by the content service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BinaryMetadata {
    /// Item URI, used for diagnostics
    pub cm_uri: String,
    /// Renditions in service order; may be empty
    pub variants: Vec<BinaryVariant>,
    /// Initial publish date, `MM/dd/yyyy HH:mm:ss`
    pub initial_publish_date: String,
}

/// Downloaded binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryContent {
    /// Raw bytes
    pub bytes: Vec<u8>,
    /// Path of the variant the bytes came from
    pub path: String,
}

impl BinaryContent {
    /// Create content
    #[must_use]
    pub fn new(bytes: Vec<u8>, path: impl Into<String>) -> Self {
        Self {
            bytes,
            path: path.into(),
        }
    }

    /// Number of bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes were downloaded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
