//! Error types for factory construction and use

use dxa_binary::BinaryError;
use dxa_client::ClientError;

/// Building a factory failed
///
/// Propagated to the caller unchanged; the registry caches nothing for the
/// failed key and the next call tries again.
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// Localization has an empty id and cannot be a cache key
    #[error("localization id is empty")]
    EmptyLocalizationId,

    /// Publication id is not numeric
    #[error("publication id '{publication_id}' of localization '{localization_id}' is not numeric")]
    InvalidPublicationId {
        /// Localization id
        localization_id: String,
        /// Offending publication id
        publication_id: String,
    },

    /// Content client setup failed
    #[error("content client setup failed: {0}")]
    Client(#[from] ClientError),
}

impl ConstructionError {
    /// Create invalid publication id error
    pub fn invalid_publication_id(
        localization_id: impl Into<String>,
        publication_id: impl Into<String>,
    ) -> Self {
        Self::InvalidPublicationId {
            localization_id: localization_id.into(),
            publication_id: publication_id.into(),
        }
    }
}

/// A factory operation failed
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// Content service call failed
    #[error("content service error: {0}")]
    Client(#[from] ClientError),

    /// Content payload did not match the model
    #[error("malformed content payload: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Binary retrieval failed
    #[error("binary error: {0}")]
    Binary(#[from] BinaryError),
}
