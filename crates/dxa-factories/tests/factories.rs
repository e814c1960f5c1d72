//! Default factories against an in-memory content service

use chrono::NaiveDate;
use dxa_client::ContentClient;
use dxa_core::{ContentServiceConfig, PageModel};
use dxa_factories::{
    CacheAgent, ConstructionError, FactoryKind, FactoryRegistry, NoOverrides, StaticOverrides,
};
use dxa_test_utils::{
    en_us, sites_localization, FakeContentClient, SharedClientFactory, PNG_BYTES, PNG_PATH,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn registry_over(client: &Arc<FakeContentClient>) -> FactoryRegistry {
    FactoryRegistry::with_defaults(
        Arc::new(ContentServiceConfig::default()),
        Arc::new(SharedClientFactory::new(Arc::clone(client))),
        Arc::new(NoOverrides),
    )
}

fn home_page() -> serde_json::Value {
    json!({
        "Title": "Home",
        "ComponentPresentations": [
            { "ComponentId": 11, "TemplateId": 22, "IsDynamic": true },
            { "ComponentId": 12, "Data": { "Component": { "Title": "static" } } }
        ]
    })
}

#[tokio::test]
async fn page_resolves_dynamic_presentations() {
    let client = Arc::new(
        FakeContentClient::new()
            .with_page("/index.html", home_page())
            .with_presentation(11, Some(22), json!({ "Component": { "Title": "dynamic" } })),
    );
    let registry = registry_over(&client);

    let page = registry
        .page_factory(&en_us())
        .unwrap()
        .find_page("/index.html")
        .await
        .unwrap()
        .expect("page is published");

    assert_eq!(page.url, "/index.html");
    assert_eq!(page.title, "Home");
    assert_eq!(
        page.component_presentations[0].data,
        json!({ "Component": { "Title": "dynamic" } })
    );
    assert_eq!(
        page.component_presentations[1].data,
        json!({ "Component": { "Title": "static" } })
    );
    assert_eq!(client.presentation_calls(), 1);
}

#[tokio::test]
async fn cached_page_skips_content_service() {
    let client = Arc::new(FakeContentClient::new().with_page("/index.html", home_page()));
    let registry = registry_over(&client);
    let pages = registry.page_factory(&en_us()).unwrap();

    let first = pages.find_page("/index.html").await.unwrap();
    let second = pages.find_page("/index.html").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.page_calls(), 1);
}

#[tokio::test]
async fn unpublished_page_is_none() {
    let client = Arc::new(FakeContentClient::new());
    let registry = registry_over(&client);

    let page = registry
        .page_factory(&en_us())
        .unwrap()
        .find_page("/missing.html")
        .await
        .unwrap();

    assert!(page.is_none());
}

#[tokio::test]
async fn component_is_read_from_its_presentation() {
    let client = Arc::new(
        FakeContentClient::new().with_presentation(11, None, json!({ "Component": { "Title": "Teaser" } })),
    );
    let registry = registry_over(&client);
    let components = registry.component_factory(&en_us()).unwrap();

    let component = components.component(11).await.unwrap().expect("component is published");
    assert_eq!(component.id, 11);
    assert_eq!(component.data, json!({ "Title": "Teaser" }));

    // served from the shared presentation factory's cache
    components.component(11).await.unwrap();
    assert_eq!(client.presentation_calls(), 1);

    assert!(components.component(99).await.unwrap().is_none());
}

#[tokio::test]
async fn binary_factory_maps_not_found_to_none() {
    let client = Arc::new(FakeContentClient::with_png());
    let registry = registry_over(&client);
    let binaries = registry.binary_factory(&en_us()).unwrap();

    let binary = binaries.find_binary(PNG_PATH).await.unwrap().expect("binary is published");
    assert_eq!(binary.bytes, PNG_BYTES);
    assert!(binaries.find_binary("/missing.png").await.unwrap().is_none());

    let published = binaries.last_published_date(PNG_PATH).await.unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_opt(13, 45, 0))
        .unwrap();
    assert_eq!(published, expected);
}

#[tokio::test]
async fn overriding_client_serves_default_factories() {
    let fallback = SharedClientFactory::new(Arc::new(FakeContentClient::new()));
    let overriding = Arc::new(FakeContentClient::new().with_page("/index.html", home_page()));
    let overrides = StaticOverrides::new().with_client(Arc::clone(&overriding) as Arc<dyn ContentClient>);
    let registry = FactoryRegistry::with_defaults(
        Arc::new(ContentServiceConfig::default()),
        Arc::new(fallback.clone()),
        Arc::new(overrides),
    );

    let page = registry
        .page_factory(&en_us())
        .unwrap()
        .find_page("/index.html")
        .await
        .unwrap();

    assert!(page.is_some());
    assert_eq!(overriding.page_calls(), 1);
    assert_eq!(fallback.created(), 0);
}

#[tokio::test]
async fn registered_cache_agent_backs_default_factories() {
    let client = Arc::new(FakeContentClient::new().with_page("/index.html", home_page()));
    let cache = CacheAgent::new(100, Duration::from_secs(60));
    let registry = FactoryRegistry::with_defaults(
        Arc::new(ContentServiceConfig::default()),
        Arc::new(SharedClientFactory::new(Arc::clone(&client))),
        Arc::new(StaticOverrides::new().with_cache_agent(cache.clone())),
    );

    registry
        .page_factory(&en_us())
        .unwrap()
        .find_page("/index.html")
        .await
        .unwrap();

    let cached = cache.get::<PageModel>("page:/index.html").await;
    assert_eq!(cached.map(|page| page.title), Some("Home".to_string()));
}

#[test]
fn non_numeric_publication_fails_construction() {
    let registry = registry_over(&Arc::new(FakeContentClient::new()));

    let err = registry
        .binary_factory(&sites_localization("en-gb", "en"))
        .unwrap_err();

    assert!(matches!(err, ConstructionError::InvalidPublicationId { .. }));
    assert_eq!(registry.cached_count(FactoryKind::Binary), 0);
}
