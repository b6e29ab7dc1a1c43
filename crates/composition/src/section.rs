//! Section definitions and the section builder.
//!
//! Every per-kind difference in section behaviour is declared data on a
//! [`SectionDefinition`] rather than code in a per-kind builder: which input
//! collections feed the section, how it is labeled, whether an empty section
//! is dropped or rendered with a placeholder narrative, and whether entry
//! references carry type tags.

use std::collections::HashMap;

use crate::composition::{Coding, Concept, Narrative, Section};
use crate::error::{AssemblyError, AssemblyResult};
use crate::handle::ResourceHandle;
use crate::reference::Reference;
use crate::terminology::{TermLookup, TerminologyResolver};

/// Key naming an input collection in the assembly call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    ChiefComplaints,
    PhysicalObservations,
    Allergies,
    MedicalHistory,
    FamilyHistory,
    InvestigationAdvice,
    Medications,
    FollowUps,
    Procedures,
    Referrals,
    OtherObservations,
    Documents,
    CarePlans,
    DiagnosticReports,
    Immunizations,
    VitalSigns,
    BodyMeasurements,
    PhysicalActivities,
    GeneralAssessments,
    WomenHealth,
    Lifestyle,
}

/// What happens to a section whose source collections are all empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// The section is omitted from the composition entirely.
    Drop,
    /// The section is emitted with a generated narrative carrying the given
    /// text, and no entries.
    Placeholder(&'static str),
}

/// How the section label is carried on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionLabel {
    /// Label goes into the section `title`.
    Title,
    /// Label goes into the section `code` as concept text.
    Code,
}

/// Representation of a labeled field: plain text, or text plus a coding
/// resolved through the terminology collaborator at assembly time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCoding {
    TextOnly,
    CodedWithText,
}

/// Static description of one section within a document type profile.
#[derive(Clone, Copy, Debug)]
pub struct SectionDefinition {
    /// Human-facing label, carried as title or code text per `labeling`.
    pub label: &'static str,

    pub labeling: SectionLabel,

    pub coding: FieldCoding,

    pub empty: EmptyPolicy,

    /// Input collections feeding this section, in entry order. Most sections
    /// draw from one collection; some merge attached documents behind the
    /// primary records.
    pub sources: &'static [CollectionKey],

    /// Whether entry references carry a type tag.
    pub tag_entry_types: bool,
}

/// Builds zero or one section from the input collections.
///
/// Absent collections are treated as empty. With at least one entry the
/// section is populated; with none, the empty policy decides between `None`
/// and a placeholder section.
///
/// # Errors
///
/// Returns [`AssemblyError::MalformedHandle`] if any source handle has an
/// empty id.
pub fn build_section(
    definition: &SectionDefinition,
    collections: &HashMap<CollectionKey, Vec<ResourceHandle>>,
    resolver: &dyn TerminologyResolver,
) -> AssemblyResult<Option<Section>> {
    let mut entries = Vec::new();
    for key in definition.sources {
        let Some(handles) = collections.get(key) else {
            continue;
        };
        for handle in handles {
            if handle.id.trim().is_empty() {
                return Err(AssemblyError::MalformedHandle {
                    resource_type: handle.resource_type,
                });
            }
            entries.push(Reference::for_handle(handle, definition.tag_entry_types));
        }
    }

    if entries.is_empty() {
        return Ok(match definition.empty {
            EmptyPolicy::Drop => None,
            EmptyPolicy::Placeholder(text) => Some(labeled_section(
                definition,
                resolver,
                Some(Narrative::generated(text)),
                Vec::new(),
            )),
        });
    }

    Ok(Some(labeled_section(definition, resolver, None, entries)))
}

fn labeled_section(
    definition: &SectionDefinition,
    resolver: &dyn TerminologyResolver,
    narrative: Option<Narrative>,
    entries: Vec<Reference>,
) -> Section {
    let (title, code) = match definition.labeling {
        SectionLabel::Title => (Some(definition.label.to_string()), None),
        SectionLabel::Code => (None, Some(label_concept(definition, resolver))),
    };
    Section {
        title,
        code,
        narrative,
        entries,
    }
}

fn label_concept(definition: &SectionDefinition, resolver: &dyn TerminologyResolver) -> Concept {
    match definition.coding {
        FieldCoding::TextOnly => Concept::text_only(definition.label),
        FieldCoding::CodedWithText => match resolver.resolve(definition.label) {
            TermLookup::Coded(term) => Concept::coded_with_text(
                Coding {
                    system: term.system,
                    code: term.code,
                    display: term.display,
                },
                definition.label,
            ),
            TermLookup::Unknown => {
                tracing::warn!(label = definition.label, "terminology lookup unresolved");
                Concept::text_only(definition.label)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ResourceType;
    use crate::terminology::{CodedTerm, UnresolvedTerminology};

    const DROP_MEDICATIONS: SectionDefinition = SectionDefinition {
        label: "MedicationSummary",
        labeling: SectionLabel::Code,
        coding: FieldCoding::TextOnly,
        empty: EmptyPolicy::Drop,
        sources: &[CollectionKey::Medications],
        tag_entry_types: false,
    };

    const PLACEHOLDER_COMPLAINTS: SectionDefinition = SectionDefinition {
        label: "Chief Complaints",
        labeling: SectionLabel::Code,
        coding: FieldCoding::TextOnly,
        empty: EmptyPolicy::Placeholder("No data available"),
        sources: &[CollectionKey::ChiefComplaints],
        tag_entry_types: false,
    };

    struct FixedResolver;

    impl TerminologyResolver for FixedResolver {
        fn resolve(&self, free_text: &str) -> TermLookup {
            TermLookup::Coded(CodedTerm {
                system: "http://snomed.info/sct".into(),
                code: "422843007".into(),
                display: free_text.to_string(),
            })
        }
    }

    fn handles(resource_type: ResourceType, ids: &[&str]) -> Vec<ResourceHandle> {
        ids.iter()
            .map(|id| ResourceHandle::new(resource_type, *id))
            .collect()
    }

    #[test]
    fn drop_policy_omits_empty_section() {
        let collections = HashMap::new();
        let section = build_section(&DROP_MEDICATIONS, &collections, &UnresolvedTerminology)
            .expect("build succeeds");
        assert!(section.is_none());
    }

    #[test]
    fn drop_policy_omits_section_for_present_but_empty_collection() {
        let mut collections = HashMap::new();
        collections.insert(CollectionKey::Medications, Vec::new());
        let section = build_section(&DROP_MEDICATIONS, &collections, &UnresolvedTerminology)
            .expect("build succeeds");
        assert!(section.is_none());
    }

    #[test]
    fn placeholder_policy_emits_narrative_only_section() {
        let collections = HashMap::new();
        let section = build_section(&PLACEHOLDER_COMPLAINTS, &collections, &UnresolvedTerminology)
            .expect("build succeeds")
            .expect("placeholder section present");
        assert!(section.entries.is_empty());
        let narrative = section.narrative.expect("narrative present");
        assert_eq!(narrative.div, "<div>No data available</div>");
        assert_eq!(
            section.code.expect("code label").text.as_deref(),
            Some("Chief Complaints")
        );
    }

    #[test]
    fn populated_section_has_entries_and_no_narrative() {
        let mut collections = HashMap::new();
        collections.insert(
            CollectionKey::Medications,
            handles(ResourceType::MedicationRequest, &["m1", "m2"]),
        );
        let section = build_section(&DROP_MEDICATIONS, &collections, &UnresolvedTerminology)
            .expect("build succeeds")
            .expect("section present");
        assert!(section.narrative.is_none());
        let refs: Vec<_> = section.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["MedicationRequest/m1", "MedicationRequest/m2"]);
    }

    #[test]
    fn merges_multiple_source_collections_in_declared_order() {
        let definition = SectionDefinition {
            label: "Medications",
            labeling: SectionLabel::Title,
            coding: FieldCoding::TextOnly,
            empty: EmptyPolicy::Drop,
            sources: &[CollectionKey::Medications, CollectionKey::Documents],
            tag_entry_types: true,
        };
        let mut collections = HashMap::new();
        collections.insert(
            CollectionKey::Medications,
            handles(ResourceType::MedicationRequest, &["m1"]),
        );
        collections.insert(CollectionKey::Documents, handles(ResourceType::Binary, &["b1"]));

        let section = build_section(&definition, &collections, &UnresolvedTerminology)
            .expect("build succeeds")
            .expect("section present");
        let refs: Vec<_> = section.entries.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["MedicationRequest/m1", "Binary/b1"]);
        assert_eq!(
            section.entries[0].type_tag,
            Some(ResourceType::MedicationRequest)
        );
        assert_eq!(section.entries[1].type_tag, Some(ResourceType::Binary));
    }

    #[test]
    fn rejects_handle_with_empty_id() {
        let mut collections = HashMap::new();
        collections.insert(
            CollectionKey::Medications,
            vec![ResourceHandle::new(ResourceType::MedicationRequest, "  ")],
        );
        let err = build_section(&DROP_MEDICATIONS, &collections, &UnresolvedTerminology)
            .expect_err("should reject empty id");
        assert!(matches!(
            err,
            AssemblyError::MalformedHandle {
                resource_type: ResourceType::MedicationRequest
            }
        ));
    }

    #[test]
    fn coded_label_attaches_resolved_coding() {
        let definition = SectionDefinition {
            coding: FieldCoding::CodedWithText,
            ..PLACEHOLDER_COMPLAINTS
        };
        let mut collections = HashMap::new();
        collections.insert(
            CollectionKey::ChiefComplaints,
            handles(ResourceType::ChiefComplaints, &["c1"]),
        );
        let section = build_section(&definition, &collections, &FixedResolver)
            .expect("build succeeds")
            .expect("section present");
        let code = section.code.expect("code label");
        assert_eq!(code.coding[0].code, "422843007");
        assert_eq!(code.text.as_deref(), Some("Chief Complaints"));
    }

    #[test]
    fn coded_label_degrades_to_text_when_unresolved() {
        let definition = SectionDefinition {
            coding: FieldCoding::CodedWithText,
            ..PLACEHOLDER_COMPLAINTS
        };
        let mut collections = HashMap::new();
        collections.insert(
            CollectionKey::ChiefComplaints,
            handles(ResourceType::ChiefComplaints, &["c1"]),
        );
        let section = build_section(&definition, &collections, &UnresolvedTerminology)
            .expect("build succeeds")
            .expect("section present");
        let code = section.code.expect("code label");
        assert!(code.coding.is_empty());
        assert_eq!(code.text.as_deref(), Some("Chief Complaints"));
    }
}
