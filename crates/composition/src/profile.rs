//! Document type profile registry.
//!
//! Every kind-specific rule lives here as declared data: section ordering,
//! per-section empty policy and labeling, entry type tagging, mandatory
//! header fields, and the document type representation. The assembler is a
//! single code path driven by these tables, so a policy change for one
//! document kind is a table edit, not a new builder.

use crate::section::{CollectionKey, EmptyPolicy, FieldCoding, SectionDefinition, SectionLabel};

/// SNOMED CT terminology system URL.
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

/// Identifier system stamped on every composition identifier.
pub const IDENTIFIER_SYSTEM: &str = "https://ABDM_WRAPPER/bundle";

/// The closed set of supported document kinds.
///
/// Kinds are fixed at compile time; an unsupported kind cannot be expressed,
/// so profile lookup is total and has no failure path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    OpConsultation,
    DischargeSummary,
    Prescription,
    DiagnosticReport,
    ImmunizationRecord,
    WellnessRecord,
    HealthDocumentRecord,
}

impl DocumentKind {
    /// All supported kinds, in no significant order. Useful for
    /// property-style tests over the whole registry.
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::OpConsultation,
        DocumentKind::DischargeSummary,
        DocumentKind::Prescription,
        DocumentKind::DiagnosticReport,
        DocumentKind::ImmunizationRecord,
        DocumentKind::WellnessRecord,
        DocumentKind::HealthDocumentRecord,
    ];
}

/// How the document type concept is represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRepr {
    /// Text-only concept.
    Text(&'static str),
    /// SNOMED-coded concept; the display doubles as the concept text.
    Coded {
        code: &'static str,
        display: &'static str,
    },
}

/// Structural rules for one document kind.
#[derive(Clone, Copy, Debug)]
pub struct DocumentTypeProfile {
    pub kind: DocumentKind,

    /// Document title.
    pub title: &'static str,

    /// Document type representation.
    pub doc_type: TypeRepr,

    /// Structural-validation profile URL claimed in `meta.profile`.
    pub meta_profile: &'static str,

    /// Whether an encounter reference is mandatory for this kind.
    pub mandatory_encounter: bool,

    /// Whether a custodian organisation is mandatory for this kind.
    pub mandatory_custodian: bool,

    /// Ordered section definitions. Section order is part of the document's
    /// contract, not incidental.
    pub sections: &'static [SectionDefinition],
}

impl DocumentTypeProfile {
    /// Number of sections this profile emits when every input collection is
    /// empty or absent.
    pub fn placeholder_section_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.empty, EmptyPolicy::Placeholder(_)))
            .count()
    }
}

const fn code_section(
    label: &'static str,
    empty: EmptyPolicy,
    sources: &'static [CollectionKey],
) -> SectionDefinition {
    SectionDefinition {
        label,
        labeling: SectionLabel::Code,
        coding: FieldCoding::TextOnly,
        empty,
        sources,
        tag_entry_types: false,
    }
}

const fn title_section(
    label: &'static str,
    sources: &'static [CollectionKey],
    tag_entry_types: bool,
) -> SectionDefinition {
    SectionDefinition {
        label,
        labeling: SectionLabel::Title,
        coding: FieldCoding::TextOnly,
        empty: EmptyPolicy::Drop,
        sources,
        tag_entry_types,
    }
}

// Placeholder text rendered into the narrative of an empty section.
const NO_DATA: &str = "No data available";

// Outpatient consultation: the full visit record. Every section is emitted,
// empty ones with a placeholder narrative, so the note always shows which
// categories were reviewed.
static OP_CONSULTATION_SECTIONS: [SectionDefinition; 12] = [
    code_section(
        "Chief Complaints",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::ChiefComplaints],
    ),
    code_section(
        "Physical Examination",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::PhysicalObservations],
    ),
    code_section(
        "Allergy Record",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::Allergies],
    ),
    code_section(
        "Medical History",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::MedicalHistory],
    ),
    code_section(
        "Family History",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::FamilyHistory],
    ),
    code_section(
        "Order Document",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::InvestigationAdvice],
    ),
    code_section(
        "Medication Summary",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::Medications],
    ),
    code_section(
        "Follow Up",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::FollowUps],
    ),
    code_section(
        "Clinical Procedure",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::Procedures],
    ),
    code_section(
        "Referral To Service",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::Referrals],
    ),
    code_section(
        "Clinical Finding",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::OtherObservations],
    ),
    code_section(
        "Clinical consultation report",
        EmptyPolicy::Placeholder(NO_DATA),
        &[CollectionKey::Documents],
    ),
];

// Discharge summary: only categories with actual content appear.
static DISCHARGE_SECTIONS: [SectionDefinition; 10] = [
    code_section(
        "ChiefComplaints",
        EmptyPolicy::Drop,
        &[CollectionKey::ChiefComplaints],
    ),
    code_section(
        "PhysicalExamination",
        EmptyPolicy::Drop,
        &[CollectionKey::PhysicalObservations],
    ),
    code_section("AllergyRecord", EmptyPolicy::Drop, &[CollectionKey::Allergies]),
    code_section(
        "PastMedicalHistory",
        EmptyPolicy::Drop,
        &[CollectionKey::MedicalHistory],
    ),
    code_section(
        "FamilyHistory",
        EmptyPolicy::Drop,
        &[CollectionKey::FamilyHistory],
    ),
    code_section("CarePlan", EmptyPolicy::Drop, &[CollectionKey::CarePlans]),
    code_section(
        "MedicationSummary",
        EmptyPolicy::Drop,
        &[CollectionKey::Medications],
    ),
    code_section(
        "DiagnosticStudiesReport",
        EmptyPolicy::Drop,
        &[CollectionKey::DiagnosticReports],
    ),
    code_section(
        "ClinicalProcedure",
        EmptyPolicy::Drop,
        &[CollectionKey::Procedures],
    ),
    code_section(
        "DocumentReference",
        EmptyPolicy::Drop,
        &[CollectionKey::Documents],
    ),
];

// Prescription: a single medication section that also carries attached
// documents, with typed entries.
static PRESCRIPTION_SECTIONS: [SectionDefinition; 1] = [title_section(
    "Medications",
    &[CollectionKey::Medications, CollectionKey::Documents],
    true,
)];

static DIAGNOSTIC_SECTIONS: [SectionDefinition; 1] = [title_section(
    "Diagnostic Studies Report",
    &[CollectionKey::DiagnosticReports, CollectionKey::Documents],
    false,
)];

static IMMUNIZATION_SECTIONS: [SectionDefinition; 1] = [title_section(
    "Immunization Record",
    &[CollectionKey::Immunizations, CollectionKey::Documents],
    false,
)];

static WELLNESS_SECTIONS: [SectionDefinition; 8] = [
    title_section("Vital Signs", &[CollectionKey::VitalSigns], false),
    title_section("Body Measurement", &[CollectionKey::BodyMeasurements], false),
    title_section("Physical Activity", &[CollectionKey::PhysicalActivities], false),
    title_section("General Assessment", &[CollectionKey::GeneralAssessments], false),
    title_section("Women Health", &[CollectionKey::WomenHealth], false),
    title_section("Life Style", &[CollectionKey::Lifestyle], false),
    title_section("Other Observations", &[CollectionKey::OtherObservations], false),
    title_section("Document Reference", &[CollectionKey::Documents], false),
];

static HEALTH_DOCUMENT_SECTIONS: [SectionDefinition; 1] =
    [title_section("Record artifact", &[CollectionKey::Documents], false)];

static OP_CONSULTATION: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::OpConsultation,
    title: "Clinical consultation report",
    doc_type: TypeRepr::Coded {
        code: "371530004",
        display: "Clinical consultation report",
    },
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/OPConsultRecord",
    mandatory_encounter: true,
    mandatory_custodian: true,
    sections: &OP_CONSULTATION_SECTIONS,
};

static DISCHARGE_SUMMARY: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::DischargeSummary,
    title: "Discharge summary",
    doc_type: TypeRepr::Coded {
        code: "373942005",
        display: "Discharge summary",
    },
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/DischargeSummaryRecord",
    mandatory_encounter: true,
    mandatory_custodian: true,
    sections: &DISCHARGE_SECTIONS,
};

static PRESCRIPTION: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::Prescription,
    title: "Prescription record",
    doc_type: TypeRepr::Coded {
        code: "440545006",
        display: "Prescription record",
    },
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/PrescriptionRecord",
    mandatory_encounter: false,
    mandatory_custodian: false,
    sections: &PRESCRIPTION_SECTIONS,
};

static DIAGNOSTIC_REPORT: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::DiagnosticReport,
    title: "Diagnostic Studies Report",
    doc_type: TypeRepr::Text("Diagnostic Studies Report"),
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/DiagnosticReportRecord",
    mandatory_encounter: false,
    mandatory_custodian: false,
    sections: &DIAGNOSTIC_SECTIONS,
};

static IMMUNIZATION_RECORD: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::ImmunizationRecord,
    title: "Immunization Record",
    doc_type: TypeRepr::Text("Immunization Record"),
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/ImmunizationRecord",
    mandatory_encounter: false,
    mandatory_custodian: false,
    sections: &IMMUNIZATION_SECTIONS,
};

static WELLNESS_RECORD: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::WellnessRecord,
    title: "Wellness Record",
    doc_type: TypeRepr::Text("Wellness Record"),
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/WellnessRecord",
    mandatory_encounter: true,
    mandatory_custodian: true,
    sections: &WELLNESS_SECTIONS,
};

static HEALTH_DOCUMENT_RECORD: DocumentTypeProfile = DocumentTypeProfile {
    kind: DocumentKind::HealthDocumentRecord,
    title: "Health Document",
    doc_type: TypeRepr::Text("Record artifact"),
    meta_profile: "https://nrces.in/ndhm/fhir/r4/StructureDefinition/HealthDocumentRecord",
    mandatory_encounter: false,
    mandatory_custodian: false,
    sections: &HEALTH_DOCUMENT_SECTIONS,
};

/// Looks up the structural profile for a document kind.
///
/// Pure and total: the registry covers every [`DocumentKind`].
pub fn profile(kind: DocumentKind) -> &'static DocumentTypeProfile {
    match kind {
        DocumentKind::OpConsultation => &OP_CONSULTATION,
        DocumentKind::DischargeSummary => &DISCHARGE_SUMMARY,
        DocumentKind::Prescription => &PRESCRIPTION,
        DocumentKind::DiagnosticReport => &DIAGNOSTIC_REPORT,
        DocumentKind::ImmunizationRecord => &IMMUNIZATION_RECORD,
        DocumentKind::WellnessRecord => &WELLNESS_RECORD,
        DocumentKind::HealthDocumentRecord => &HEALTH_DOCUMENT_RECORD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_BASE: &str = "https://nrces.in/ndhm/fhir/r4/StructureDefinition";

    #[test]
    fn registry_covers_every_kind() {
        for kind in DocumentKind::ALL {
            let p = profile(kind);
            assert_eq!(p.kind, kind);
            assert!(!p.sections.is_empty(), "{kind:?} declares no sections");
            assert!(p.meta_profile.starts_with(PROFILE_BASE));
        }
    }

    #[test]
    fn op_consultation_placeholders_every_section() {
        let p = profile(DocumentKind::OpConsultation);
        assert_eq!(p.sections.len(), 12);
        assert_eq!(p.placeholder_section_count(), 12);
        assert!(p.mandatory_encounter);
        assert!(p.mandatory_custodian);
    }

    #[test]
    fn discharge_drops_every_empty_section() {
        let p = profile(DocumentKind::DischargeSummary);
        assert_eq!(p.sections.len(), 10);
        assert_eq!(p.placeholder_section_count(), 0);
    }

    #[test]
    fn prescription_tags_entry_types() {
        let p = profile(DocumentKind::Prescription);
        assert_eq!(p.sections.len(), 1);
        assert!(p.sections[0].tag_entry_types);
        assert!(!p.mandatory_encounter);
        assert!(!p.mandatory_custodian);
    }

    #[test]
    fn prescription_section_merges_documents_behind_medications() {
        let p = profile(DocumentKind::Prescription);
        assert_eq!(
            p.sections[0].sources,
            &[CollectionKey::Medications, CollectionKey::Documents]
        );
    }

    #[test]
    fn only_coded_kinds_carry_snomed_codings() {
        for kind in DocumentKind::ALL {
            let coded = matches!(profile(kind).doc_type, TypeRepr::Coded { .. });
            let expect_coded = matches!(
                kind,
                DocumentKind::OpConsultation
                    | DocumentKind::DischargeSummary
                    | DocumentKind::Prescription
            );
            assert_eq!(coded, expect_coded, "unexpected type repr for {kind:?}");
        }
    }
}
