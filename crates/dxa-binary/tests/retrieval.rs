//! Binary retrieval against an in-memory content service

use dxa_binary::{BinaryError, BinaryRetriever, SENTINEL_PUBLISH_DATE};
use dxa_client::CancellationToken;
use dxa_core::{BinaryMetadata, BinaryRef, BinaryVariant};
use dxa_test_utils::{
    capture_errors, en_us, metadata_with, png_metadata, FakeContentClient, SharedClientFactory,
    PNG_BYTES, PNG_PATH,
};
use std::sync::Arc;

fn retriever_over(client: FakeContentClient) -> (BinaryRetriever, Arc<FakeContentClient>) {
    let client = Arc::new(client);
    let factory = SharedClientFactory::new(Arc::clone(&client));
    (BinaryRetriever::new(Arc::new(factory)), client)
}

#[test]
fn png_scenario_by_id_and_path() {
    let (retriever, client) = retriever_over(FakeContentClient::with_png());
    let loc = en_us();

    for reference in [BinaryRef::Id(123), BinaryRef::from(PNG_PATH)] {
        let content = retriever.binary(&loc, &reference).unwrap();
        assert_eq!(content.bytes, PNG_BYTES);
        assert_eq!(content.path, PNG_PATH);
    }
    assert_eq!(client.download_calls(), 2);
}

#[tokio::test]
async fn sync_and_async_forms_agree() {
    let (retriever, _client) = retriever_over(
        FakeContentClient::with_png()
            .with_binary(BinaryRef::Id(7), metadata_with(Vec::new()))
            .with_binary(
                BinaryRef::Id(8),
                metadata_with(vec![BinaryVariant::new("", "/no-url.png")]),
            )
            .with_binary(BinaryRef::Id(9), {
                let mut metadata = png_metadata();
                metadata.initial_publish_date = "2024-01-31T13:45:00Z".to_string();
                metadata
            }),
    );
    let loc = en_us();
    let cancel = CancellationToken::new();

    for id in [123, 7, 8, 9, 404] {
        let reference = BinaryRef::Id(id);

        let sync_binary = retriever.binary(&loc, &reference);
        let async_binary = retriever.binary_async(&loc, &reference, &cancel).await;
        match (sync_binary, async_binary) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(BinaryError::NotFound { .. }), Err(BinaryError::NotFound { .. })) => {}
            (a, b) => panic!("binary {id} diverged: {a:?} vs {b:?}"),
        }

        let sync_date = retriever.last_published_date(&loc, &reference);
        let async_date = retriever
            .last_published_date_async(&loc, &reference, &cancel)
            .await;
        match (sync_date, async_date) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (
                Err(BinaryError::InvalidPublishDate { value: a, .. }),
                Err(BinaryError::InvalidPublishDate { value: b, .. }),
            ) => {
                assert_eq!(id, 9);
                assert_eq!(a, b);
            }
            (a, b) => panic!("publish date of {id} diverged: {a:?} vs {b:?}"),
        }
    }
}

#[tokio::test]
async fn async_malformed_date_is_invalid() {
    let (retriever, _client) = retriever_over(FakeContentClient::new().with_binary(
        BinaryRef::Id(9),
        BinaryMetadata {
            initial_publish_date: "31.01.2024".to_string(),
            ..png_metadata()
        },
    ));

    let err = retriever
        .last_published_date_async(&en_us(), &BinaryRef::Id(9), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BinaryError::InvalidPublishDate { ref value, .. } if value == "31.01.2024"
    ));
}

#[test]
fn unknown_reference_has_sentinel_date() {
    let (retriever, _client) = retriever_over(FakeContentClient::new());

    let date = retriever
        .last_published_date(&en_us(), &BinaryRef::from("/nowhere.pdf"))
        .unwrap();
    assert_eq!(date, SENTINEL_PUBLISH_DATE);
}

#[test]
fn unusable_variants_log_errors_and_skip_download() {
    let (retriever, client) = retriever_over(
        FakeContentClient::new()
            .with_binary(BinaryRef::Id(7), metadata_with(Vec::new()))
            .with_binary(
                BinaryRef::Id(8),
                metadata_with(vec![BinaryVariant::new("", "/no-url.png")]),
            ),
    );
    let (errors, _guard) = capture_errors();
    let loc = en_us();

    assert!(retriever.binary(&loc, &BinaryRef::Id(7)).unwrap_err().is_not_found());
    assert!(retriever.binary(&loc, &BinaryRef::Id(8)).unwrap_err().is_not_found());

    assert_eq!(client.download_calls(), 0);
    assert_eq!(errors.count(), 2);
}

#[test]
fn failed_download_is_logged_not_found() {
    // metadata present, bytes missing: the fake answers 404
    let (retriever, client) = retriever_over(
        FakeContentClient::new().with_binary(BinaryRef::Id(1), dxa_test_utils::png_metadata()),
    );
    let (errors, _guard) = capture_errors();

    let err = retriever.binary(&en_us(), &BinaryRef::Id(1)).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(client.download_calls(), 1);
    assert_eq!(errors.count(), 1);
}
