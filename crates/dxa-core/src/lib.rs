//! DXA Core - Content delivery domain types
//!
//! Shared vocabulary for the content delivery integration:
//! - [`Localization`]: the tenant/content partition every request is scoped to
//! - [`BinaryRef`], [`BinaryMetadata`], [`BinaryVariant`], [`BinaryContent`]:
//!   the binary retrieval model
//! - [`PageModel`], [`ComponentPresentation`], [`ComponentModel`]: content
//!   returned by the factories
//! - [`ContentServiceConfig`]: transport and cache settings
//!
//! # Example
//!
//! ```rust
//! use dxa_core::{BinaryRef, ContentNamespace, Localization};
//!
//! let localization = Localization::new("en-us", ContentNamespace::Sites, "5");
//! let reference = BinaryRef::from("/media/logo.png");
//!
//! assert_eq!(localization.namespace().id(), 1);
//! assert_eq!(reference.to_string(), "/media/logo.png");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod binary;
pub mod config;
pub mod content;
pub mod error;
pub mod localization;

// Re-exports
pub use binary::{BinaryContent, BinaryMetadata, BinaryRef, BinaryVariant, CmUri};
pub use config::ContentServiceConfig;
pub use content::{ComponentModel, ComponentPresentation, PageModel};
pub use error::CoreError;
pub use localization::{ContentNamespace, Localization};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
