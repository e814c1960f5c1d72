//! Content models returned by the factories
//!
//! Payloads stay as JSON; typed view models are built further up the stack.

use serde::{Deserialize, Serialize};

/// A page and its component presentations
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageModel {
    /// Published URL of the page
    #[serde(default)]
    pub url: String,
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Remaining page payload
    #[serde(default)]
    pub data: serde_json::Value,
    /// Presentations in page order; dynamic ones are resolved on load
    #[serde(default)]
    pub component_presentations: Vec<ComponentPresentation>,
}

/// A component rendered with a template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentPresentation {
    /// Component item id
    pub component_id: u32,
    /// Template item id, when known
    #[serde(default)]
    pub template_id: Option<u32>,
    /// Published separately from the page
    #[serde(default)]
    pub is_dynamic: bool,
    /// Presentation payload (includes the `Component`)
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ComponentPresentation {
    /// Whether the payload still has to be fetched
    #[inline]
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.is_dynamic && self.data.is_null()
    }
}

/// A component without presentation context
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentModel {
    /// Component item id
    pub id: u32,
    /// Component payload
    pub data: serde_json::Value,
}

impl From<ComponentPresentation> for ComponentModel {
    fn from(presentation: ComponentPresentation) -> Self {
        let data = match presentation.data {
            serde_json::Value::Object(mut map) => map
                .remove("Component")
                .unwrap_or(serde_json::Value::Object(map)),
            other => other,
        };
        Self {
            id: presentation.component_id,
            data,
        }
    }
}
