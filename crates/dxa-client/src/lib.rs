//! DXA Client - Content service access
//!
//! The content service is consumed through the [`ContentClient`] trait:
//! binary metadata and downloads in blocking and cancellable async forms,
//! plus raw page and component presentation content for the factories.
//!
//! - [`GraphQlContentClient`]: default implementation over GraphQL/HTTP
//! - [`GraphQlClientFactory`]: hands out per-call client handles
//! - [`cancellable`]: races a call against a `CancellationToken`
//!
//! Enable the `mock` feature to get `MockContentClient` for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use dxa_client::{ContentClientFactory, GraphQlClientFactory};
//! use dxa_core::{BinaryRef, ContentNamespace, ContentServiceConfig};
//! use std::sync::Arc;
//!
//! let config = Arc::new(ContentServiceConfig::new().with_endpoint("https://cd.example.com/api"));
//! let factory = GraphQlClientFactory::new(config)?;
//!
//! let client = factory.create_client();
//! let metadata = client
//!     .binary_metadata_async(ContentNamespace::Sites, "5", &BinaryRef::Id(123), &cancel)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod client;
mod error;
mod graphql;
mod query;

// Re-exports
pub use client::{cancellable, ContentClient, ContentClientFactory};
#[cfg(any(test, feature = "mock"))]
pub use client::MockContentClient;
pub use error::ClientError;
pub use graphql::{GraphQlClientFactory, GraphQlContentClient};

pub use tokio_util::sync::CancellationToken;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
