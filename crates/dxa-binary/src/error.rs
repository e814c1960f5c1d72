//! Error types for binary retrieval
//!
//! Callers only ever see these three outcomes; transport failures are logged
//! and folded into [`BinaryError::NotFound`].

use dxa_core::{BinaryRef, Localization};

/// Binary retrieval failures
#[derive(Debug, thiserror::Error)]
pub enum BinaryError {
    /// Reference did not resolve to downloadable content
    #[error("binary '{reference}' not found in localization '{localization_id}'")]
    NotFound {
        /// Reference as requested
        reference: BinaryRef,
        /// Localization the lookup was scoped to
        localization_id: String,
    },

    /// Caller cancelled the operation
    #[error("binary retrieval cancelled")]
    Canceled,

    /// Publish date field did not match `MM/dd/yyyy HH:mm:ss`
    #[error("invalid publish date '{value}': {source}")]
    InvalidPublishDate {
        /// Raw field value
        value: String,
        /// Parser failure
        #[source]
        source: chrono::ParseError,
    },
}

impl BinaryError {
    /// Create not found error
    pub fn not_found(reference: &BinaryRef, localization: &Localization) -> Self {
        Self::NotFound {
            reference: reference.clone(),
            localization_id: localization.id().to_string(),
        }
    }

    /// Whether this is a not found outcome
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller cancelled the operation
    #[inline]
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
