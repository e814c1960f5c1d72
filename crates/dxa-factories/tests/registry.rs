//! Registry caching, concurrency and override behavior

mod common;

use common::{CountingBuilder, PanickingBuilder, StubBinaries, StubPresentations};
use dxa_factories::{
    BinaryFactory, ConstructionError, FactoryBuilder, FactoryHandle, FactoryKind, FactoryRegistry,
    StaticOverrides,
};
use dxa_test_utils::{en_us, sites_localization};
use std::sync::{Arc, Barrier};
use std::time::Duration;

fn registry_over(builder: &Arc<CountingBuilder>) -> FactoryRegistry {
    FactoryRegistry::new(Arc::clone(builder) as Arc<dyn FactoryBuilder>)
}

#[test]
fn contended_lookup_builds_once() {
    const THREADS: usize = 32;
    let builder = Arc::new(CountingBuilder::slow(Duration::from_millis(10)));
    let registry = registry_over(&builder);
    let barrier = Barrier::new(THREADS);
    let loc = en_us();

    let factories: Vec<Arc<dyn BinaryFactory>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.binary_factory(&loc).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(builder.built(), 1);
    assert!(factories.iter().all(|f| Arc::ptr_eq(f, &factories[0])));
}

#[test]
fn contended_lookups_per_localization_build_once_each() {
    const LOCALIZATIONS: usize = 4;
    const THREADS_EACH: usize = 8;
    let builder = Arc::new(CountingBuilder::new());
    let registry = registry_over(&builder);
    let barrier = Barrier::new(LOCALIZATIONS * THREADS_EACH);

    std::thread::scope(|scope| {
        for n in 0..LOCALIZATIONS {
            for _ in 0..THREADS_EACH {
                let (registry, barrier) = (&registry, &barrier);
                scope.spawn(move || {
                    let loc = sites_localization(&format!("loc-{n}"), &n.to_string());
                    barrier.wait();
                    registry.factory(FactoryKind::ComponentPresentation, &loc).unwrap();
                });
            }
        }
    });

    assert_eq!(builder.built(), LOCALIZATIONS);
    assert_eq!(registry.cached_count(FactoryKind::ComponentPresentation), LOCALIZATIONS);
}

#[test]
fn kinds_are_cached_independently() {
    let builder = Arc::new(CountingBuilder::new());
    let registry = registry_over(&builder);
    let loc = en_us();

    registry.binary_factory(&loc).unwrap();
    assert_eq!(registry.cached_count(FactoryKind::Binary), 1);
    assert_eq!(registry.cached_count(FactoryKind::Page), 0);

    let page = registry.factory(FactoryKind::Page, &loc).unwrap();
    let again = registry.factory(FactoryKind::Page, &loc).unwrap();
    assert!(page.same_instance(&again));
    assert_eq!(registry.cached_count(FactoryKind::Page), 1);
}

#[test]
fn page_factory_shares_presentation_factory() {
    let builder = Arc::new(CountingBuilder::new());
    let registry = registry_over(&builder);
    let loc = en_us();

    registry.page_factory(&loc).unwrap();
    let presentations = registry.component_presentation_factory(&loc).unwrap();

    let handed = builder.page_presentations.lock();
    assert_eq!(handed.len(), 1);
    assert!(Arc::ptr_eq(&handed[0], &presentations));
}

#[test]
fn override_wins_over_builder() {
    let binaries: Arc<dyn BinaryFactory> = Arc::new(StubBinaries);
    let overrides = StaticOverrides::new()
        .with_factory(FactoryHandle::Binary(Arc::clone(&binaries)))
        .with_factory(FactoryHandle::ComponentPresentation(Arc::new(StubPresentations)));
    let registry = FactoryRegistry::new(Arc::new(PanickingBuilder)).with_overrides(Arc::new(overrides));

    let resolved = registry.binary_factory(&en_us()).unwrap();
    assert!(Arc::ptr_eq(&resolved, &binaries));

    // cached after the first resolution
    let again = registry.binary_factory(&en_us()).unwrap();
    assert!(Arc::ptr_eq(&again, &binaries));
    assert!(registry.component_presentation_factory(&en_us()).is_ok());
}

#[test]
fn wrong_kind_override_falls_back_to_builder() {
    let builder = Arc::new(CountingBuilder::new());
    let misregistered: Arc<dyn BinaryFactory> = Arc::new(StubBinaries);
    let overrides = StaticOverrides::new()
        .with_factory_for(FactoryKind::Component, FactoryHandle::Binary(misregistered));
    let registry = registry_over(&builder).with_overrides(Arc::new(overrides));

    let handle = registry.factory(FactoryKind::Component, &en_us()).unwrap();

    assert_eq!(handle.kind(), FactoryKind::Component);
    // presentation factory plus the component factory itself
    assert_eq!(builder.built(), 2);
}

#[test]
fn failed_construction_is_not_cached() {
    let builder = Arc::new(CountingBuilder::failing(1));
    let registry = registry_over(&builder);
    let loc = sites_localization("nl-nl", "9");

    let err = registry.binary_factory(&loc).unwrap_err();
    assert!(matches!(err, ConstructionError::InvalidPublicationId { .. }));
    assert!(!registry.is_cached(FactoryKind::Binary, &loc));
    assert_eq!(registry.cached_count(FactoryKind::Binary), 0);

    assert!(registry.binary_factory(&loc).is_ok());
    assert!(registry.is_cached(FactoryKind::Binary, &loc));
    assert_eq!(builder.built(), 1);
}

#[test]
fn failed_page_construction_can_be_retried() {
    let builder = Arc::new(CountingBuilder::failing(1));
    let registry = registry_over(&builder);
    let loc = en_us();

    // the presentation factory is built first and fails
    assert!(registry.page_factory(&loc).is_err());
    assert_eq!(registry.cached_count(FactoryKind::Page), 0);
    assert_eq!(registry.cached_count(FactoryKind::ComponentPresentation), 0);

    registry.page_factory(&loc).unwrap();
    assert_eq!(registry.cached_count(FactoryKind::Page), 1);
    assert_eq!(registry.cached_count(FactoryKind::ComponentPresentation), 1);
    assert_eq!(builder.built(), 2);
}
