//! Content providers: one localization's view of the content service

use crate::services::ProviderServices;
use chrono::NaiveDateTime;
use dxa_binary::{BinaryError, BinaryRetriever};
use dxa_client::{CancellationToken, ClientError, ContentClientFactory};
use dxa_core::{BinaryContent, BinaryRef};
use std::sync::Arc;
use tracing::Instrument;

/// Fetches raw page payloads
#[derive(Clone)]
pub struct PageProvider {
    services: ProviderServices,
    clients: Arc<dyn ContentClientFactory>,
}

impl PageProvider {
    /// Provider over `clients`
    #[must_use]
    pub fn new(services: ProviderServices, clients: Arc<dyn ContentClientFactory>) -> Self {
        Self { services, clients }
    }

    /// Raw payload of the page at `url`
    ///
    /// # Errors
    ///
    /// Propagates content service failures.
    pub async fn page_content(&self, url: &str) -> Result<Option<serde_json::Value>, ClientError> {
        let resolver = self.services.resolver();
        let client = self.clients.create_client();
        client
            .page_content_async(
                resolver.localization().namespace(),
                resolver.localization().publication_id(),
                url,
                &CancellationToken::new(),
            )
            .instrument(self.services.span().clone())
            .await
    }
}

/// Fetches raw component presentation payloads
#[derive(Clone)]
pub struct ComponentPresentationProvider {
    services: ProviderServices,
    clients: Arc<dyn ContentClientFactory>,
}

impl ComponentPresentationProvider {
    /// Provider over `clients`
    #[must_use]
    pub fn new(services: ProviderServices, clients: Arc<dyn ContentClientFactory>) -> Self {
        Self { services, clients }
    }

    /// Raw payload of a presentation
    ///
    /// # Errors
    ///
    /// Propagates content service failures.
    pub async fn presentation_content(
        &self,
        component_id: u32,
        template_id: Option<u32>,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        let resolver = self.services.resolver();
        let client = self.clients.create_client();
        client
            .component_presentation_async(
                resolver.localization().namespace(),
                resolver.localization().publication_id(),
                component_id,
                template_id,
                &CancellationToken::new(),
            )
            .instrument(self.services.span().clone())
            .await
    }
}

/// Fetches binaries through the retriever
#[derive(Clone)]
pub struct BinaryProvider {
    services: ProviderServices,
    retriever: BinaryRetriever,
}

impl BinaryProvider {
    /// Provider over `clients`
    #[must_use]
    pub fn new(services: ProviderServices, clients: Arc<dyn ContentClientFactory>) -> Self {
        Self {
            services,
            retriever: BinaryRetriever::new(clients),
        }
    }

    /// Binary published at `url`
    ///
    /// # Errors
    ///
    /// See [`BinaryRetriever::binary_async`].
    pub async fn binary(&self, url: &str) -> Result<BinaryContent, BinaryError> {
        self.retriever
            .binary_async(
                self.services.resolver().localization(),
                &BinaryRef::from(url),
                &CancellationToken::new(),
            )
            .instrument(self.services.span().clone())
            .await
    }

    /// Initial publish date of the binary at `url`
    ///
    /// # Errors
    ///
    /// See [`BinaryRetriever::last_published_date_async`].
    pub async fn last_published_date(&self, url: &str) -> Result<NaiveDateTime, BinaryError> {
        self.retriever
            .last_published_date_async(
                self.services.resolver().localization(),
                &BinaryRef::from(url),
                &CancellationToken::new(),
            )
            .instrument(self.services.span().clone())
            .await
    }
}

impl std::fmt::Debug for PageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageProvider")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ComponentPresentationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentPresentationProvider")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for BinaryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryProvider")
            .field("services", &self.services)
            .field("retriever", &self.retriever)
            .finish()
    }
}
