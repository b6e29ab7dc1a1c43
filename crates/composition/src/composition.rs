//! Output model for assembled compositions.
//!
//! These are the wire-facing structures handed to the downstream bundle
//! packager. Serialization uses interoperable field names (`resourceType`,
//! `lastUpdated`, `type`); deserialization is not provided because this
//! engine only produces compositions. A returned [`Composition`] is
//! immutable as far as this crate is concerned; any further mutation (for
//! example bundle insertion) happens downstream.

use crate::reference::Reference;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Publication status of an assembled composition.
///
/// This engine only ever emits final documents; draft, amended and
/// entered-in-error variants are intentionally unrepresented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionStatus {
    Final,
}

/// A concept rendered as text, optionally carrying a coding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Concept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Concept {
    /// A text-only concept.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// A coded concept that also carries the text form.
    pub fn coded_with_text(coding: Coding, text: impl Into<String>) -> Self {
        Self {
            coding: vec![coding],
            text: Some(text.into()),
        }
    }
}

/// A single coding within a [`Concept`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

/// Generated narrative used for placeholder sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub status: NarrativeStatus,
    pub div: String,
}

impl Narrative {
    /// A generated narrative wrapping the given text in a div.
    pub fn generated(text: &str) -> Self {
        Self {
            status: NarrativeStatus::Generated,
            div: format!("<div>{text}</div>"),
        }
    }
}

/// Provenance of a narrative. Only generated narratives are produced here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    Generated,
}

/// Document metadata stamped on every composition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositionMeta {
    #[serde(rename = "versionId")]
    pub version_id: String,

    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,

    /// Structural-validation profile URLs this document claims.
    pub profile: Vec<String>,
}

/// Business identifier for the document, distinct from the resource id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositionIdentifier {
    pub system: String,
    pub value: String,
}

/// A named grouping of entry references within a composition.
///
/// A section is labeled either by `title` or by a text `code` depending on
/// the document profile. A section with entries never carries a narrative;
/// a placeholder section carries only the narrative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Concept>,

    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,

    #[serde(rename = "entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Reference>,
}

/// The assembled clinical-document header.
///
/// Owns its section list exclusively; entries are non-owning references into
/// externally-owned records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Composition {
    #[serde(rename = "resourceType")]
    pub resource_type: &'static str,

    pub id: Uuid,

    pub meta: CompositionMeta,

    pub identifier: CompositionIdentifier,

    pub status: CompositionStatus,

    #[serde(rename = "type")]
    pub doc_type: Concept,

    pub title: String,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    pub date: DateTime<Utc>,

    #[serde(rename = "author")]
    pub authors: Vec<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian: Option<Reference>,

    #[serde(rename = "section", default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ResourceType;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(CompositionStatus::Final).expect("serialize");
        assert_eq!(json, "final");
    }

    #[test]
    fn placeholder_narrative_wire_shape() {
        let json = serde_json::to_value(Narrative::generated("No data available")).expect("serialize");
        assert_eq!(json["status"], "generated");
        assert_eq!(json["div"], "<div>No data available</div>");
    }

    #[test]
    fn text_only_concept_omits_coding() {
        let json = serde_json::to_value(Concept::text_only("ChiefComplaints")).expect("serialize");
        assert_eq!(json["text"], "ChiefComplaints");
        assert!(json.get("coding").is_none());
    }

    #[test]
    fn coded_concept_carries_coding_and_text() {
        let concept = Concept::coded_with_text(
            Coding {
                system: "http://snomed.info/sct".into(),
                code: "440545006".into(),
                display: "Prescription record".into(),
            },
            "Prescription record",
        );
        let json = serde_json::to_value(&concept).expect("serialize");
        assert_eq!(json["coding"][0]["code"], "440545006");
        assert_eq!(json["text"], "Prescription record");
    }

    #[test]
    fn populated_section_omits_narrative_on_the_wire() {
        let section = Section {
            title: Some("Medications".into()),
            code: None,
            narrative: None,
            entries: vec![Reference::new(ResourceType::MedicationRequest, "mr-1")],
        };
        let json = serde_json::to_value(&section).expect("serialize");
        assert!(json.get("text").is_none());
        assert_eq!(json["entry"][0]["reference"], "MedicationRequest/mr-1");
    }
}
