//! Opaque handles to externally-owned clinical records.
//!
//! The assembler never sees a full clinical resource. Upstream resource
//! construction hands it a [`ResourceHandle`] per record: the reference
//! prefix under which the record is addressed in the bundle, its id, and an
//! optional display string. Entry references built from handles are
//! non-owning pointers; the underlying records stay owned by the caller.

use std::hash::{Hash, Hasher};

/// Reference prefix for a clinical record within a bundle.
///
/// The closed set mirrors the prefixes used by the bundle packager. Some are
/// interoperable resource type names (`MedicationRequest`, `CarePlan`), others
/// are document-section categories under which a generic resource is filed
/// (`ChiefComplaints` and `MedicalHistory` both address condition records).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    // Header resources
    Patient,
    Practitioner,
    Organisation,
    Encounter,
    // Interoperable resource type prefixes
    AllergyIntolerance,
    MedicationRequest,
    CarePlan,
    Procedure,
    DiagnosticReport,
    DocumentReference,
    Binary,
    Immunization,
    // Section-category prefixes
    ChiefComplaints,
    PhysicalExamination,
    MedicalHistory,
    FamilyHistory,
    InvestigationAdvice,
    FollowUp,
    Referral,
    OtherObservations,
    VitalSigns,
    BodyMeasurement,
    PhysicalActivity,
    GeneralAssessment,
    WomenHealth,
    LifeStyle,
}

impl ResourceType {
    /// The prefix as it appears in entry reference strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::Practitioner => "Practitioner",
            ResourceType::Organisation => "Organisation",
            ResourceType::Encounter => "Encounter",
            ResourceType::AllergyIntolerance => "AllergyIntolerance",
            ResourceType::MedicationRequest => "MedicationRequest",
            ResourceType::CarePlan => "CarePlan",
            ResourceType::Procedure => "Procedure",
            ResourceType::DiagnosticReport => "DiagnosticReport",
            ResourceType::DocumentReference => "DocumentReference",
            ResourceType::Binary => "Binary",
            ResourceType::Immunization => "Immunization",
            ResourceType::ChiefComplaints => "ChiefComplaints",
            ResourceType::PhysicalExamination => "PhysicalExamination",
            ResourceType::MedicalHistory => "MedicalHistory",
            ResourceType::FamilyHistory => "FamilyHistory",
            ResourceType::InvestigationAdvice => "InvestigationAdvice",
            ResourceType::FollowUp => "FollowUp",
            ResourceType::Referral => "Referral",
            ResourceType::OtherObservations => "OtherObservations",
            ResourceType::VitalSigns => "VitalSigns",
            ResourceType::BodyMeasurement => "BodyMeasurement",
            ResourceType::PhysicalActivity => "PhysicalActivity",
            ResourceType::GeneralAssessment => "GeneralAssessment",
            ResourceType::WomenHealth => "WomenHealth",
            ResourceType::LifeStyle => "LifeStyle",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for ResourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Handle to an already-built clinical record.
///
/// Identity is `(resource_type, id)`; the display name does not participate
/// in equality or hashing.
#[derive(Clone, Debug)]
pub struct ResourceHandle {
    /// Reference prefix under which the record is bundled.
    pub resource_type: ResourceType,

    /// Record id within the bundle. Must be non-empty; an empty id is an
    /// upstream contract error surfaced during section building.
    pub id: String,

    /// Optional display string carried onto entry references.
    pub display_name: Option<String>,
}

impl ResourceHandle {
    /// Creates a handle without a display name.
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
            display_name: None,
        }
    }

    /// Attaches a display name to the handle.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display_name = Some(display.into());
        self
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.resource_type == other.resource_type && self.id == other.id
    }
}

impl Eq for ResourceHandle {}

impl Hash for ResourceHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource_type.hash(state);
        self.id.hash(state);
    }
}
