//! Content client seam
//!
//! [`ContentClient`] is the black-box interface to the content service.
//! Handles are cheap and created per call through a [`ContentClientFactory`].

use crate::error::ClientError;
use async_trait::async_trait;
use dxa_core::{BinaryMetadata, BinaryRef, ContentNamespace};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Access to the content service
///
/// Blocking methods must not be called from inside an async runtime; use the
/// `_async` counterparts there. Async methods end with
/// [`ClientError::Canceled`] once `cancel` fires.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Fetch binary metadata, `None` when the reference does not resolve
    fn binary_metadata(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        reference: &BinaryRef,
    ) -> Result<Option<BinaryMetadata>, ClientError>;

    /// Fetch binary metadata without blocking
    async fn binary_metadata_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        reference: &BinaryRef,
        cancel: &CancellationToken,
    ) -> Result<Option<BinaryMetadata>, ClientError>;

    /// Download raw bytes from an absolute URL
    fn download(&self, url: &str) -> Result<Vec<u8>, ClientError>;

    /// Download raw bytes without blocking
    async fn download_async(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError>;

    /// Fetch the raw JSON of a page by URL
    async fn page_content_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError>;

    /// Fetch the raw JSON of a component presentation
    async fn component_presentation_async(
        &self,
        namespace: ContentNamespace,
        publication_id: &str,
        component_id: u32,
        template_id: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Option<serde_json::Value>, ClientError>;
}

/// Creates content client handles
pub trait ContentClientFactory: Send + Sync {
    /// Create a fresh client handle
    fn create_client(&self) -> Arc<dyn ContentClient>;
}

impl<F> ContentClientFactory for F
where
    F: Fn() -> Arc<dyn ContentClient> + Send + Sync,
{
    fn create_client(&self) -> Arc<dyn ContentClient> {
        self()
    }
}

/// Race a content service call against a cancellation token
///
/// Cancellation wins ties, so a token that is already cancelled never
/// starts the call.
pub async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ClientError::Canceled),
        result = call => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let result = cancellable(&cancel, async { Ok::<_, ClientError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn cancellable_precancelled_never_polls_call() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let polled = std::sync::atomic::AtomicBool::new(false);

        let result = cancellable(&cancel, async {
            polled.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, ClientError>(())
        })
        .await;

        assert!(result.unwrap_err().is_canceled());
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancellable_interrupts_pending_call() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result =
            cancellable(&cancel, std::future::pending::<Result<(), ClientError>>()).await;
        assert!(result.unwrap_err().is_canceled());
    }

    #[test]
    fn closure_is_client_factory() {
        let mock: Arc<dyn ContentClient> = Arc::new(MockContentClient::new());
        let factory = move || Arc::clone(&mock);

        let a = factory.create_client();
        let b = factory.create_client();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
