//! GraphQL-backed content client
//!
//! Talks to the content service GraphQL endpoint over `reqwest`. The async
//! and blocking HTTP clients are shared by every handle a
//! [`GraphQlClientFactory`] creates; the blocking client is built lazily, on
//! the first blocking call of any handle.
//!
//! The API token is sent to the GraphQL endpoint, and to download URLs only
//! when they share the endpoint's origin.

use crate::client::{cancellable, ContentClient, ContentClientFactory};
use crate::error::ClientError;
use crate::query::{
    BinaryComponentData, ComponentPresentationData, GraphQlRequest, GraphQlResponse, PageData,
};
use async_trait::async_trait;
use dxa_core::{BinaryMetadata, BinaryRef, ContentNamespace, ContentServiceConfig};
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

/// Content client speaking GraphQL to the content service
#[derive(Debug)]
pub struct GraphQlContentClient {
    config: Arc<ContentServiceConfig>,
    http: reqwest::Client,
    blocking: Arc<OnceLock<reqwest::blocking::Client>>,
}

impl GraphQlContentClient {
    /// Create a client with its own HTTP connection pool
    ///
    /// # Errors
    /// Returns `ClientError::Http` if the HTTP client cannot be built
    pub fn new(config: Arc<ContentServiceConfig>) -> Result<Self, ClientError> {
        let http = build_http_client(&config)?;
        Ok(Self::with_http(config, http))
    }

    /// Create a client sharing an existing HTTP connection pool
    #[must_use]
    pub fn with_http(config: Arc<ContentServiceConfig>, http: reqwest::Client) -> Self {
        Self::with_clients(config, http, Arc::default())
    }

    fn with_clients(
        config: Arc<ContentServiceConfig>,
        http: reqwest::Client,
        blocking: Arc<OnceLock<reqwest::blocking::Client>>,
    ) -> Self {
        Self {
            config,
            http,
            blocking,
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ContentServiceConfig {
        &self.config
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, ClientError> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(self.config.user_agent.clone())
            .timeout(self.config.timeout())
            .build()?;
        Ok(self.blocking.get_or_init(|| client))
    }

    /// Token to send with a download from `url`
    fn download_token(&self, url: &str) -> Option<&str> {
        let token = self.config.api_token.as_deref()?;
        let endpoint = reqwest::Url::parse(&self.config.endpoint).ok()?;
        let target = reqwest::Url::parse(url).ok()?;
        (endpoint.origin() == target.origin()).then_some(token)
    }

    fn query_blocking<T: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
    ) -> Result<Option<T>, ClientError> {
        let mut builder = self
            .blocking_client()?
            .post(&self.config.endpoint)
            .json(request);
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), &self.config.endpoint));
        }
        GraphQlResponse::parse(&response.bytes()?)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
    ) -> Result<Option<T>, ClientError> {
        let mut builder = self.http.post(&self.config.endpoint).json(request);
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), &self.config.endpoint));
        }
        GraphQlResponse::parse(&response.bytes().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let mut builder = self.http.get(url);
        if let Some(token) = self.download_token(url) {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), url));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ContentClient for GraphQlContentClient {
    fn binary_metadata(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        reference: &BinaryRef,
    ) -> Result<Option<BinaryMetadata>, ClientError> {
        let request = GraphQlRequest::binary_component(namespace, publication_id, reference)?;
        let data: Option<BinaryComponentData> = self.query_blocking(&request)?;
        Ok(data.and_then(|d| d.into_metadata(namespace)))
    }

    async fn binary_metadata_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        reference: &BinaryRef,
        cancel: &CancellationToken,
    ) -> Result<Option<BinaryMetadata>, ClientError> {
        let request = GraphQlRequest::binary_component(namespace, publication_id, reference)?;
        let data: Option<BinaryComponentData> =
            cancellable(cancel, self.query(&request)).await?;
        Ok(data.and_then(|d| d.into_metadata(namespace)))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let mut builder = self.blocking_client()?.get(url);
        if let Some(token) = self.download_token(url) {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), url));
        }
        Ok(response.bytes()?.to_vec())
    }

    async fn download_async(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError> {
        cancellable(cancel, self.fetch_bytes(url)).await
    }

    async fn page_content_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        let request = GraphQlRequest::page(namespace, publication_id, url)?;
        let data: Option<PageData> = cancellable(cancel, self.query(&request)).await?;
        Ok(data.and_then(PageData::into_content))
    }

    async fn component_presentation_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        component_id: u32,
        template_id: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        let request = GraphQlRequest::component_presentation(
            namespace,
            publication_id,
            component_id,
            template_id,
        )?;
        let data: Option<ComponentPresentationData> =
            cancellable(cancel, self.query(&request)).await?;
        Ok(data.and_then(ComponentPresentationData::into_content))
    }
}

/// Creates [`GraphQlContentClient`] handles over shared connection pools
#[derive(Debug, Clone)]
pub struct GraphQlClientFactory {
    config: Arc<ContentServiceConfig>,
    http: reqwest::Client,
    blocking: Arc<OnceLock<reqwest::blocking::Client>>,
}

impl GraphQlClientFactory {
    /// Create factory from configuration
    ///
    /// # Errors
    /// Returns `ClientError::Http` if the HTTP client cannot be built
    pub fn new(config: Arc<ContentServiceConfig>) -> Result<Self, ClientError> {
        let http = build_http_client(&config)?;
        tracing::debug!("Content client factory for endpoint: {}", config.endpoint);
        Ok(Self {
            config,
            http,
            blocking: Arc::default(),
        })
    }

    fn handle(&self) -> GraphQlContentClient {
        GraphQlContentClient::with_clients(
            Arc::clone(&self.config),
            self.http.clone(),
            Arc::clone(&self.blocking),
        )
    }
}

impl ContentClientFactory for GraphQlClientFactory {
    fn create_client(&self) -> Arc<dyn ContentClient> {
        Arc::new(self.handle())
    }
}

fn build_http_client(config: &ContentServiceConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
