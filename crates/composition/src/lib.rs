//! Composition assembly for health-record bundles.
//!
//! This crate builds the structured document header (a "Composition") that
//! binds previously-constructed clinical records into a single document per
//! visit or record type. The individual clinical resources are built by an
//! upstream layer and reach this crate only as opaque [`ResourceHandle`]s;
//! the finished [`Composition`] is handed to a downstream bundle packager.
//!
//! Each supported document kind (outpatient consultation, discharge summary,
//! prescription, diagnostic report, immunization record, wellness record,
//! health-document record) is described by a declarative
//! [`DocumentTypeProfile`]: which sections exist, in what order, whether an
//! empty section is dropped or rendered with a placeholder narrative, and
//! which header fields are mandatory. A single [`CompositionAssembler`]
//! drives every kind off its profile.

pub mod assembler;
pub mod composition;
pub mod context;
pub mod error;
pub mod handle;
pub mod profile;
pub mod reference;
pub mod section;
pub mod terminology;

// Re-export facade types
pub use assembler::{CompositionAssembler, IdSource, RandomIds};
pub use composition::{
    Coding, Composition, CompositionIdentifier, CompositionMeta, CompositionStatus, Concept,
    Narrative, NarrativeStatus, Section,
};
pub use context::{ClinicalContext, EncounterRef, OrganizationRef, PersonRef};
pub use error::{AssemblyError, AssemblyResult, ContextViolation};
pub use handle::{ResourceHandle, ResourceType};
pub use profile::{
    profile, DocumentKind, DocumentTypeProfile, TypeRepr, IDENTIFIER_SYSTEM, SNOMED_SYSTEM,
};
pub use reference::Reference;
pub use section::{
    build_section, CollectionKey, EmptyPolicy, FieldCoding, SectionDefinition, SectionLabel,
};
pub use terminology::{CodedTerm, TermLookup, TerminologyResolver, UnresolvedTerminology};

// Re-export DisplayName from hrb-types so callers can build contexts without
// a direct dependency on the types crate.
pub use hrb_types::DisplayName;
