//! Stub factories and builders shared by the registry tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dxa_core::{BinaryContent, ComponentModel, ComponentPresentation, Localization, PageModel};
use dxa_factories::{
    BinaryFactory, ComponentFactory, ComponentPresentationFactory, ConstructionError,
    FactoryBuilder, FactoryError, PageFactory,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Page factory remembering the presentation factory it was built with
pub struct StubPages {
    pub presentations: Arc<dyn ComponentPresentationFactory>,
}

#[async_trait]
impl PageFactory for StubPages {
    async fn find_page(&self, url: &str) -> Result<Option<PageModel>, FactoryError> {
        Ok(Some(PageModel {
            url: url.to_string(),
            ..PageModel::default()
        }))
    }
}

pub struct StubPresentations;

#[async_trait]
impl ComponentPresentationFactory for StubPresentations {
    async fn component_presentation(
        &self,
        _component_id: u32,
        _template_id: Option<u32>,
    ) -> Result<Option<ComponentPresentation>, FactoryError> {
        Ok(None)
    }
}

pub struct StubComponents;

#[async_trait]
impl ComponentFactory for StubComponents {
    async fn component(&self, _component_id: u32) -> Result<Option<ComponentModel>, FactoryError> {
        Ok(None)
    }
}

pub struct StubBinaries;

#[async_trait]
impl BinaryFactory for StubBinaries {
    async fn find_binary(&self, _url: &str) -> Result<Option<BinaryContent>, FactoryError> {
        Ok(None)
    }

    async fn last_published_date(&self, _url: &str) -> Result<NaiveDateTime, FactoryError> {
        Ok(NaiveDateTime::MIN)
    }
}

/// Builder counting constructions, optionally slow or failing
#[derive(Default)]
pub struct CountingBuilder {
    built: AtomicUsize,
    delay: Option<Duration>,
    failures_left: Mutex<usize>,
    pub page_presentations: Mutex<Vec<Arc<dyn ComponentPresentationFactory>>>,
}

impl CountingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every construction
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Fail the first `failures` constructions
    pub fn failing(failures: usize) -> Self {
        Self {
            failures_left: Mutex::new(failures),
            ..Self::default()
        }
    }

    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    fn construct(&self, localization: &Localization) -> Result<(), ConstructionError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let mut failures = self.failures_left.lock();
        if *failures > 0 {
            *failures -= 1;
            return Err(ConstructionError::invalid_publication_id(
                localization.id(),
                localization.publication_id(),
            ));
        }
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl FactoryBuilder for CountingBuilder {
    fn component_presentation_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn ComponentPresentationFactory>, ConstructionError> {
        self.construct(localization)?;
        Ok(Arc::new(StubPresentations))
    }

    fn page_factory(
        &self,
        localization: &Localization,
        presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn PageFactory>, ConstructionError> {
        self.construct(localization)?;
        self.page_presentations.lock().push(Arc::clone(&presentations));
        Ok(Arc::new(StubPages { presentations }))
    }

    fn component_factory(
        &self,
        localization: &Localization,
        _presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn ComponentFactory>, ConstructionError> {
        self.construct(localization)?;
        Ok(Arc::new(StubComponents))
    }

    fn binary_factory(
        &self,
        localization: &Localization,
    ) -> Result<Arc<dyn BinaryFactory>, ConstructionError> {
        self.construct(localization)?;
        Ok(Arc::new(StubBinaries))
    }
}

/// Builder that must never be reached
pub struct PanickingBuilder;

impl FactoryBuilder for PanickingBuilder {
    fn component_presentation_factory(
        &self,
        _localization: &Localization,
    ) -> Result<Arc<dyn ComponentPresentationFactory>, ConstructionError> {
        panic!("component presentation factory should come from the overrides")
    }

    fn page_factory(
        &self,
        _localization: &Localization,
        _presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn PageFactory>, ConstructionError> {
        panic!("page factory should come from the overrides")
    }

    fn component_factory(
        &self,
        _localization: &Localization,
        _presentations: Arc<dyn ComponentPresentationFactory>,
    ) -> Result<Arc<dyn ComponentFactory>, ConstructionError> {
        panic!("component factory should come from the overrides")
    }

    fn binary_factory(
        &self,
        _localization: &Localization,
    ) -> Result<Arc<dyn BinaryFactory>, ConstructionError> {
        panic!("binary factory should come from the overrides")
    }
}
