//! DXA Binary - Binary retrieval
//!
//! Translates a logical binary reference (item id or URL path) into
//! downloaded bytes or a last-published timestamp.
//!
//! # Outcomes
//!
//! Callers see a result, [`BinaryError::NotFound`], [`BinaryError::Canceled`]
//! (async forms only) or [`BinaryError::InvalidPublishDate`]. Transport errors
//! are logged and reported as not found.
//!
//! # Example
//!
//! ```rust,ignore
//! use dxa_binary::BinaryRetriever;
//! use dxa_client::{CancellationToken, GraphQlClientFactory};
//! use dxa_core::{BinaryRef, Localization};
//!
//! let retriever = BinaryRetriever::new(Arc::new(GraphQlClientFactory::new(config)?));
//! let localization = Localization::for_publication("5");
//!
//! let content = retriever
//!     .binary_async(&localization, &BinaryRef::from("/media/logo.png"), &CancellationToken::new())
//!     .await?;
//! println!("{} bytes from {}", content.len(), content.path);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod retriever;

// Re-exports
pub use error::BinaryError;
pub use retriever::{BinaryRetriever, PUBLISH_DATE_FORMAT, SENTINEL_PUBLISH_DATE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
