//! GraphQL request and response payloads

use crate::error::ClientError;
use dxa_core::{BinaryMetadata, BinaryRef, BinaryVariant, CmUri, ContentNamespace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

const BINARY_COMPONENT_QUERY: &str = "query binaryComponent($namespaceId: Int!, $publicationId: Int!, $binaryId: Int, $url: String) { \
binaryComponent(namespaceId: $namespaceId, publicationId: $publicationId, binaryId: $binaryId, url: $url) { \
itemId publicationId initialPublishDate variants { edges { node { downloadUrl path } } } } }";

const PAGE_QUERY: &str = "query page($namespaceId: Int!, $publicationId: Int!, $url: String!) { \
page(namespaceId: $namespaceId, publicationId: $publicationId, url: $url) { \
rawContent(renderContent: false) { data } } }";

const COMPONENT_PRESENTATION_QUERY: &str = "query componentPresentation($namespaceId: Int!, $publicationId: Int!, $componentId: Int!, $templateId: Int) { \
componentPresentation(namespaceId: $namespaceId, publicationId: $publicationId, componentId: $componentId, templateId: $templateId) { \
rawContent(renderContent: false) { data } } }";

/// GraphQL request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlRequest {
    pub(crate) query: &'static str,
    pub(crate) operation_name: &'static str,
    pub(crate) variables: serde_json::Value,
}

impl GraphQlRequest {
    pub(crate) fn binary_component(
        namespace: ContentNamespace,
        publication_id: &str,
        reference: &BinaryRef,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            query: BINARY_COMPONENT_QUERY,
            operation_name: "binaryComponent",
            variables: json!({
                "namespaceId": namespace.id(),
                "publicationId": parse_publication_id(publication_id)?,
                "binaryId": reference.as_id(),
                "url": reference.as_path(),
            }),
        })
    }

    pub(crate) fn page(
        namespace: ContentNamespace,
        publication_id: &str,
        url: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            query: PAGE_QUERY,
            operation_name: "page",
            variables: json!({
                "namespaceId": namespace.id(),
                "publicationId": parse_publication_id(publication_id)?,
                "url": url,
            }),
        })
    }

    pub(crate) fn component_presentation(
        namespace: ContentNamespace,
        publication_id: &str,
        component_id: u32,
        template_id: Option<u32>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            query: COMPONENT_PRESENTATION_QUERY,
            operation_name: "componentPresentation",
            variables: json!({
                "namespaceId": namespace.id(),
                "publicationId": parse_publication_id(publication_id)?,
                "componentId": component_id,
                "templateId": template_id,
            }),
        })
    }
}

fn parse_publication_id(publication_id: &str) -> Result<u32, ClientError> {
    publication_id.trim().parse().map_err(|_| {
        ClientError::InvalidRequest(format!("publication id '{publication_id}' is not numeric"))
    })
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl<T: DeserializeOwned> GraphQlResponse<T> {
    /// Parse a response body and surface GraphQL errors
    pub(crate) fn parse(body: &[u8]) -> Result<Option<T>, ClientError> {
        let response: Self = serde_json::from_slice(body)?;
        if !response.errors.is_empty() {
            let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(ClientError::GraphQl(messages.join("; ")));
        }
        Ok(response.data)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BinaryComponentData {
    binary_component: Option<BinaryComponentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinaryComponentNode {
    item_id: u32,
    publication_id: u32,
    #[serde(default)]
    initial_publish_date: Option<String>,
    #[serde(default)]
    variants: Option<Connection<VariantNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Option<Vec<Edge<T>>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    path: Option<String>,
}

impl BinaryComponentData {
    /// Convert to metadata; a missing variant connection becomes empty
    pub(crate) fn into_metadata(self, namespace: ContentNamespace) -> Option<BinaryMetadata> {
        let node = self.binary_component?;
        let cm_uri = CmUri::new(namespace, node.publication_id, node.item_id);
        let variants = node
            .variants
            .and_then(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| {
                BinaryVariant::new(
                    edge.node.download_url.unwrap_or_default(),
                    edge.node.path.unwrap_or_default(),
                )
            })
            .collect();

        Some(BinaryMetadata {
            cm_uri: cm_uri.to_string(),
            variants,
            initial_publish_date: node.initial_publish_date.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContentNode {
    raw_content: Option<RawContent>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageData {
    page: Option<RawContentNode>,
}

impl PageData {
    pub(crate) fn into_content(self) -> Option<serde_json::Value> {
        self.page?.raw_content.map(|raw| raw.data)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComponentPresentationData {
    component_presentation: Option<RawContentNode>,
}

impl ComponentPresentationData {
    pub(crate) fn into_content(self) -> Option<serde_json::Value> {
        self.component_presentation?.raw_content.map(|raw| raw.data)
    }
}
