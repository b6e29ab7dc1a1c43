//! Reference formatting.
//!
//! A reference is a non-owning pointer to a record elsewhere in the bundle:
//! the string `{ResourceType}/{id}`, optionally a type tag (some document
//! profiles require typed entries), and optionally a display string for
//! header references such as subject and authors.

use crate::handle::{ResourceHandle, ResourceType};
use serde::Serialize;

/// A typed reference to an externally-owned record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Reference string of the form `{ResourceType}/{id}`.
    pub reference: String,

    /// Type tag, present only when the owning profile tags entry types.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<ResourceType>,

    /// Display string for the referenced record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Builds an untagged reference to `{resource_type}/{id}`.
    pub fn new(resource_type: ResourceType, id: &str) -> Self {
        Self {
            reference: format!("{}/{}", resource_type.as_str(), id),
            type_tag: None,
            display: None,
        }
    }

    /// Attaches a display string.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Formats a section entry reference for a handle.
    ///
    /// Deterministic and infallible; the section builder has already rejected
    /// handles with empty ids before formatting.
    pub fn for_handle(handle: &ResourceHandle, tag_type: bool) -> Self {
        let mut entry = Reference::new(handle.resource_type, &handle.id);
        if tag_type {
            entry.type_tag = Some(handle.resource_type);
        }
        if let Some(display) = &handle.display_name {
            entry.display = Some(display.clone());
        }
        entry
    }
}
