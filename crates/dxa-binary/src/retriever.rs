//! Binary retriever
//!
//! Resolves a [`BinaryRef`] to metadata, picks the first variant and
//! downloads it. Every operation creates its own content client handle; no
//! metadata or bytes are kept between calls.

use crate::error::BinaryError;
use chrono::NaiveDateTime;
use dxa_client::{cancellable, ClientError, ContentClientFactory};
use dxa_core::{BinaryContent, BinaryMetadata, BinaryRef, BinaryVariant, Localization};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Returned as publish date when the binary has no metadata
pub const SENTINEL_PUBLISH_DATE: NaiveDateTime = NaiveDateTime::MIN;

/// Format of `initialPublishDate` (`MM/dd/yyyy HH:mm:ss`)
pub const PUBLISH_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Binary retrieval over the content service
///
/// Blocking methods must be called outside an async runtime; the `_async`
/// methods honor their cancellation token at every network call.
#[derive(Clone)]
pub struct BinaryRetriever {
    clients: Arc<dyn ContentClientFactory>,
}

impl std::fmt::Debug for BinaryRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryRetriever").finish_non_exhaustive()
    }
}

impl BinaryRetriever {
    /// Create retriever over a client factory
    #[inline]
    #[must_use]
    pub fn new(clients: Arc<dyn ContentClientFactory>) -> Self {
        Self { clients }
    }

    /// Last published date of a binary
    ///
    /// # Errors
    /// - `BinaryError::InvalidPublishDate` if the date field is malformed
    /// - `BinaryError::NotFound` if the metadata lookup failed
    pub fn last_published_date(
        &self,
        localization: &Localization,
        reference: &BinaryRef,
    ) -> Result<NaiveDateTime, BinaryError> {
        let client = self.clients.create_client();
        let metadata = client
            .binary_metadata(
                localization.namespace(),
                localization.publication_id(),
                reference,
            )
            .map_err(|err| lookup_failed(err, localization, reference))?;

        publish_date(metadata.as_ref())
    }

    /// Last published date of a binary, without blocking
    ///
    /// # Errors
    /// As [`Self::last_published_date`], plus `BinaryError::Canceled`
    pub async fn last_published_date_async(
        &self,
        localization: &Localization,
        reference: &BinaryRef,
        cancel: &CancellationToken,
    ) -> Result<NaiveDateTime, BinaryError> {
        let client = self.clients.create_client();
        let metadata = cancellable(
            cancel,
            client.binary_metadata_async(
                localization.namespace(),
                localization.publication_id(),
                reference,
                cancel,
            ),
        )
        .await
        .map_err(|err| lookup_failed(err, localization, reference))?;

        publish_date(metadata.as_ref())
    }

    /// Download a binary
    ///
    /// # Errors
    /// `BinaryError::NotFound` if the reference has no metadata, no usable
    /// variant, or the download fails
    pub fn binary(
        &self,
        localization: &Localization,
        reference: &BinaryRef,
    ) -> Result<BinaryContent, BinaryError> {
        let client = self.clients.create_client();
        let metadata = client
            .binary_metadata(
                localization.namespace(),
                localization.publication_id(),
                reference,
            )
            .map_err(|err| lookup_failed(err, localization, reference))?
            .ok_or_else(|| BinaryError::not_found(reference, localization))?;

        let variant = select_variant(&metadata)
            .ok_or_else(|| BinaryError::not_found(reference, localization))?;

        tracing::debug!("Attempting to get binary at: {}", variant.download_url);
        client
            .download(&variant.download_url)
            .map(|bytes| BinaryContent::new(bytes, variant.path.as_str()))
            .map_err(|err| download_failed(err, &metadata, localization, reference))
    }

    /// Download a binary without blocking
    ///
    /// # Errors
    /// As [`Self::binary`], plus `BinaryError::Canceled`
    pub async fn binary_async(
        &self,
        localization: &Localization,
        reference: &BinaryRef,
        cancel: &CancellationToken,
    ) -> Result<BinaryContent, BinaryError> {
        let client = self.clients.create_client();
        let metadata = cancellable(
            cancel,
            client.binary_metadata_async(
                localization.namespace(),
                localization.publication_id(),
                reference,
                cancel,
            ),
        )
        .await
        .map_err(|err| lookup_failed(err, localization, reference))?
        .ok_or_else(|| BinaryError::not_found(reference, localization))?;

        let variant = select_variant(&metadata)
            .ok_or_else(|| BinaryError::not_found(reference, localization))?;

        tracing::debug!("Attempting to get binary at: {}", variant.download_url);
        cancellable(cancel, client.download_async(&variant.download_url, cancel))
            .await
            .map(|bytes| BinaryContent::new(bytes, variant.path.as_str()))
            .map_err(|err| download_failed(err, &metadata, localization, reference))
    }
}

/// First variant with a download URL check; logs why none qualifies
fn select_variant(metadata: &BinaryMetadata) -> Option<&BinaryVariant> {
    let Some(variant) = metadata.variants.first() else {
        tracing::error!(
            "Empty variants returned for binary component: {}",
            metadata.cm_uri
        );
        return None;
    };

    if variant.download_url.trim().is_empty() {
        tracing::error!(
            "Binary variant download URL is missing for binary component: {}",
            metadata.cm_uri
        );
        return None;
    }

    Some(variant)
}

fn publish_date(metadata: Option<&BinaryMetadata>) -> Result<NaiveDateTime, BinaryError> {
    let Some(metadata) = metadata else {
        return Ok(SENTINEL_PUBLISH_DATE);
    };

    NaiveDateTime::parse_from_str(metadata.initial_publish_date.trim(), PUBLISH_DATE_FORMAT)
        .map_err(|source| BinaryError::InvalidPublishDate {
            value: metadata.initial_publish_date.clone(),
            source,
        })
}

fn lookup_failed(
    err: ClientError,
    localization: &Localization,
    reference: &BinaryRef,
) -> BinaryError {
    if err.is_canceled() {
        tracing::debug!("Binary lookup cancelled: {}", reference);
        return BinaryError::Canceled;
    }
    tracing::error!(
        "Unable to get binary metadata for {} in localization {}: {}",
        reference,
        localization.id(),
        err
    );
    BinaryError::not_found(reference, localization)
}

fn download_failed(
    err: ClientError,
    metadata: &BinaryMetadata,
    localization: &Localization,
    reference: &BinaryRef,
) -> BinaryError {
    if err.is_canceled() {
        tracing::debug!("Binary download cancelled: {}", metadata.cm_uri);
        return BinaryError::Canceled;
    }
    tracing::error!(
        "Unable to get binary data for CmUri {}: {}",
        metadata.cm_uri,
        err
    );
    BinaryError::not_found(reference, localization)
}
