//! Testing utilities for the DXA workspace
//!
//! Shared fixtures, an in-memory content client and an error-log counter.

#![allow(missing_docs)]

use async_trait::async_trait;
use dxa_client::{CancellationToken, ClientError, ContentClient, ContentClientFactory};
use dxa_core::{BinaryMetadata, BinaryRef, BinaryVariant, ContentNamespace, Localization};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub const PNG_URL: &str = "http://x/y.png";
pub const PNG_PATH: &str = "/y.png";
pub const PNG_BYTES: &[u8] = b"\x89PNG fixture";

pub fn sites_localization(id: &str, publication_id: &str) -> Localization {
    Localization::new(id, ContentNamespace::Sites, publication_id)
}

pub fn en_us() -> Localization {
    sites_localization("en-us", "5")
}

pub fn metadata_with(variants: Vec<BinaryVariant>) -> BinaryMetadata {
    BinaryMetadata {
        cm_uri: "tcm:5-123".to_string(),
        variants,
        initial_publish_date: "01/31/2024 13:45:00".to_string(),
    }
}

pub fn png_metadata() -> BinaryMetadata {
    metadata_with(vec![BinaryVariant::new(PNG_URL, PNG_PATH)])
}

/// In-memory content client with call counters
#[derive(Debug, Default)]
pub struct FakeContentClient {
    binaries: HashMap<BinaryRef, BinaryMetadata>,
    downloads: HashMap<String, Vec<u8>>,
    pages: HashMap<String, serde_json::Value>,
    presentations: HashMap<(u32, Option<u32>), serde_json::Value>,
    stall_downloads: bool,
    metadata_calls: AtomicUsize,
    download_calls: AtomicUsize,
    page_calls: AtomicUsize,
    presentation_calls: AtomicUsize,
}

impl FakeContentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard png binary under id 123 and path `/y.png`
    pub fn with_png() -> Self {
        Self::new()
            .with_binary(BinaryRef::Id(123), png_metadata())
            .with_binary(BinaryRef::from(PNG_PATH), png_metadata())
            .with_download(PNG_URL, PNG_BYTES.to_vec())
    }

    pub fn with_binary(mut self, reference: BinaryRef, metadata: BinaryMetadata) -> Self {
        self.binaries.insert(reference, metadata);
        self
    }

    pub fn with_download(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.downloads.insert(url.to_string(), bytes);
        self
    }

    pub fn with_page(mut self, url: &str, content: serde_json::Value) -> Self {
        self.pages.insert(url.to_string(), content);
        self
    }

    pub fn with_presentation(
        mut self,
        component_id: u32,
        template_id: Option<u32>,
        content: serde_json::Value,
    ) -> Self {
        self.presentations.insert((component_id, template_id), content);
        self
    }

    /// Async downloads never complete
    pub fn stalling_downloads(mut self) -> Self {
        self.stall_downloads = true;
        self
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn presentation_calls(&self) -> usize {
        self.presentation_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, reference: &BinaryRef) -> Option<BinaryMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.binaries.get(reference).cloned()
    }

    fn bytes(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.downloads
            .get(url)
            .cloned()
            .ok_or_else(|| ClientError::status(404, url))
    }
}

#[async_trait]
impl ContentClient for FakeContentClient {
    fn binary_metadata(
        &self,
        _namespace: ContentNamespace,
        _publication_id: &str,
        reference: &BinaryRef,
    ) -> Result<Option<BinaryMetadata>, ClientError> {
        Ok(self.lookup(reference))
    }

    async fn binary_metadata_async(
        &self,
        _namespace: ContentNamespace,
        _publication_id: &str,
        reference: &BinaryRef,
        _cancel: &CancellationToken,
    ) -> Result<Option<BinaryMetadata>, ClientError> {
        Ok(self.lookup(reference))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        self.bytes(url)
    }

    async fn download_async(
        &self,
        url: &str,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError> {
        if self.stall_downloads {
            self.download_calls.fetch_add(1, Ordering::SeqCst);
            return std::future::pending().await;
        }
        self.bytes(url)
    }

    async fn page_content_async(
        &self,
        _namespace: ContentNamespace,
        _publication_id: &str,
        url: &str,
        _cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.get(url).cloned())
    }

    async fn component_presentation_async(
        &self,
        _namespace: ContentNamespace,
        _publication_id: &str,
        component_id: u32,
        template_id: Option<u32>,
        _cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        self.presentation_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .presentations
            .get(&(component_id, template_id))
            .cloned())
    }
}

/// Client factory handing out one shared fake, counting handles created
#[derive(Debug, Clone)]
pub struct SharedClientFactory {
    client: Arc<FakeContentClient>,
    created: Arc<AtomicUsize>,
}

impl SharedClientFactory {
    pub fn new(client: Arc<FakeContentClient>) -> Self {
        Self {
            client,
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ContentClientFactory for SharedClientFactory {
    fn create_client(&self) -> Arc<dyn ContentClient> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.client) as Arc<dyn ContentClient>
    }
}

/// Tracing layer counting error-level events
#[derive(Debug, Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Count error events on this thread until the guard drops
pub fn capture_errors() -> (ErrorCounter, tracing::subscriber::DefaultGuard) {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}
