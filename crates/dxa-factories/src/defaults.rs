//! Default factories backed by the content service

use crate::error::FactoryError;
use crate::factory::{BinaryFactory, ComponentFactory, ComponentPresentationFactory, PageFactory};
use crate::provider::{BinaryProvider, ComponentPresentationProvider, PageProvider};
use crate::services::FactoryServices;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use dxa_core::{BinaryContent, ComponentModel, ComponentPresentation, PageModel};
use std::sync::Arc;

fn presentation_key(component_id: u32, template_id: Option<u32>) -> String {
    match template_id {
        Some(template_id) => format!("cp:{component_id}:{template_id}"),
        None => format!("cp:{component_id}"),
    }
}

/// Page factory resolving dynamic presentations on load
#[derive(Debug)]
pub struct DefaultPageFactory {
    provider: PageProvider,
    presentations: Arc<dyn ComponentPresentationFactory>,
    services: FactoryServices,
}

impl DefaultPageFactory {
    /// Create factory
    #[must_use]
    pub fn new(
        provider: PageProvider,
        presentations: Arc<dyn ComponentPresentationFactory>,
        services: FactoryServices,
    ) -> Self {
        Self {
            provider,
            presentations,
            services,
        }
    }

    /// Presentation factory used for dynamic presentations
    #[inline]
    #[must_use]
    pub fn presentations(&self) -> &Arc<dyn ComponentPresentationFactory> {
        &self.presentations
    }

    async fn resolve_dynamic(&self, page: &mut PageModel) -> Result<(), FactoryError> {
        for presentation in page
            .component_presentations
            .iter_mut()
            .filter(|cp| cp.is_unresolved())
        {
            match self
                .presentations
                .component_presentation(presentation.component_id, presentation.template_id)
                .await?
            {
                Some(resolved) => presentation.data = resolved.data,
                None => tracing::warn!(
                    "Dynamic presentation of component {} on page {} is not published",
                    presentation.component_id,
                    page.url
                ),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageFactory for DefaultPageFactory {
    async fn find_page(&self, url: &str) -> Result<Option<PageModel>, FactoryError> {
        let key = format!("page:{url}");
        if let Some(page) = self.services.cache().get::<PageModel>(&key).await {
            return Ok(Some(page));
        }

        let Some(raw) = self.provider.page_content(url).await? else {
            tracing::debug!(parent: self.services.span(), "No page published at {}", url);
            return Ok(None);
        };
        let mut page: PageModel = serde_json::from_value(raw)?;
        if page.url.is_empty() {
            page.url = url.to_string();
        }
        self.resolve_dynamic(&mut page).await?;

        self.services.cache().insert(key, page.clone()).await;
        Ok(Some(page))
    }
}

/// Component presentation factory
#[derive(Debug)]
pub struct DefaultComponentPresentationFactory {
    provider: ComponentPresentationProvider,
    services: FactoryServices,
}

impl DefaultComponentPresentationFactory {
    /// Create factory
    #[must_use]
    pub fn new(provider: ComponentPresentationProvider, services: FactoryServices) -> Self {
        Self { provider, services }
    }
}

#[async_trait]
impl ComponentPresentationFactory for DefaultComponentPresentationFactory {
    async fn component_presentation(
        &self,
        component_id: u32,
        template_id: Option<u32>,
    ) -> Result<Option<ComponentPresentation>, FactoryError> {
        let key = presentation_key(component_id, template_id);
        if let Some(presentation) = self.services.cache().get::<ComponentPresentation>(&key).await {
            return Ok(Some(presentation));
        }

        let Some(data) = self
            .provider
            .presentation_content(component_id, template_id)
            .await?
        else {
            return Ok(None);
        };
        let presentation = ComponentPresentation {
            component_id,
            template_id,
            is_dynamic: true,
            data,
        };

        self.services.cache().insert(key, presentation.clone()).await;
        Ok(Some(presentation))
    }
}

/// Component factory reading components out of their presentations
#[derive(Debug)]
pub struct DefaultComponentFactory {
    presentations: Arc<dyn ComponentPresentationFactory>,
    services: FactoryServices,
}

impl DefaultComponentFactory {
    /// Create factory
    #[must_use]
    pub fn new(
        presentations: Arc<dyn ComponentPresentationFactory>,
        services: FactoryServices,
    ) -> Self {
        Self {
            presentations,
            services,
        }
    }

    /// Presentation factory components are read through
    #[inline]
    #[must_use]
    pub fn presentations(&self) -> &Arc<dyn ComponentPresentationFactory> {
        &self.presentations
    }
}

#[async_trait]
impl ComponentFactory for DefaultComponentFactory {
    async fn component(&self, component_id: u32) -> Result<Option<ComponentModel>, FactoryError> {
        let component = self
            .presentations
            .component_presentation(component_id, None)
            .await?
            .map(ComponentModel::from);
        if component.is_none() {
            tracing::debug!(parent: self.services.span(), "Component {} not published", component_id);
        }
        Ok(component)
    }
}

/// Binary factory backed by the binary retriever
#[derive(Debug)]
pub struct DefaultBinaryFactory {
    provider: BinaryProvider,
    services: FactoryServices,
}

impl DefaultBinaryFactory {
    /// Create factory
    #[must_use]
    pub fn new(provider: BinaryProvider, services: FactoryServices) -> Self {
        Self { provider, services }
    }
}

#[async_trait]
impl BinaryFactory for DefaultBinaryFactory {
    async fn find_binary(&self, url: &str) -> Result<Option<BinaryContent>, FactoryError> {
        let key = format!("binary:{url}");
        if let Some(binary) = self.services.cache().get::<BinaryContent>(&key).await {
            return Ok(Some(binary));
        }

        match self.provider.binary(url).await {
            Ok(binary) => {
                self.services.cache().insert(key, binary.clone()).await;
                Ok(Some(binary))
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn last_published_date(&self, url: &str) -> Result<NaiveDateTime, FactoryError> {
        Ok(self.provider.last_published_date(url).await?)
    }
}
