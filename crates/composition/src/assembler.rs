//! Top-level composition assembly.
//!
//! One synchronous, side-effect-free code path serves every document kind:
//! validate the mandatory context per profile, build the header references,
//! parse the authored-on date, drive the section builder over the profile's
//! section table, and stamp fresh identifiers and metadata. Safe to invoke
//! concurrently; each call is self-contained and produces its own ids.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::composition::{
    Coding, Composition, CompositionIdentifier, CompositionMeta, CompositionStatus, Concept,
};
use crate::context::ClinicalContext;
use crate::error::{AssemblyError, AssemblyResult, ContextViolation};
use crate::handle::{ResourceHandle, ResourceType};
use crate::profile::{profile, DocumentKind, TypeRepr, IDENTIFIER_SYSTEM, SNOMED_SYSTEM};
use crate::reference::Reference;
use crate::section::{build_section, CollectionKey};
use crate::terminology::{TerminologyResolver, UnresolvedTerminology};

/// Injected identifier-generation capability.
///
/// Production uses [`RandomIds`]; tests can supply a source returning
/// deterministic values.
pub trait IdSource {
    fn next_id(&self) -> Uuid;
}

/// Default id source: fresh random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Assembles compositions for every supported document kind.
pub struct CompositionAssembler {
    ids: Box<dyn IdSource>,
    terminology: Box<dyn TerminologyResolver>,
}

impl Default for CompositionAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionAssembler {
    /// Creates an assembler with random ids and no terminology service.
    pub fn new() -> Self {
        Self {
            ids: Box::new(RandomIds),
            terminology: Box::new(UnresolvedTerminology),
        }
    }

    /// Replaces the id source.
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replaces the terminology resolver.
    pub fn with_terminology(mut self, resolver: impl TerminologyResolver + 'static) -> Self {
        self.terminology = Box::new(resolver);
        self
    }

    /// Assembles a composition of the given kind.
    ///
    /// Construction is all-or-nothing: every mandatory-context violation is
    /// collected before failing, and a section-level contract error aborts
    /// the whole call.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::Validation`] when mandatory context is missing.
    /// - [`AssemblyError::DateFormat`] when `authored_on` cannot be parsed.
    /// - [`AssemblyError::MalformedHandle`] when a handle has an empty id.
    pub fn assemble(
        &self,
        kind: DocumentKind,
        context: &ClinicalContext,
        collections: &HashMap<CollectionKey, Vec<ResourceHandle>>,
    ) -> AssemblyResult<Composition> {
        let profile = profile(kind);

        let mut violations = Vec::new();
        if context.patient.is_none() {
            violations.push(ContextViolation::MissingPatient);
        }
        if context.authors.is_empty() {
            violations.push(ContextViolation::NoAuthors);
        }
        if profile.mandatory_encounter && context.encounter.is_none() {
            violations.push(ContextViolation::MissingEncounter);
        }
        if profile.mandatory_custodian && context.custodian.is_none() {
            violations.push(ContextViolation::MissingCustodian);
        }
        if !violations.is_empty() {
            return Err(AssemblyError::Validation(violations));
        }
        let Some(patient) = context.patient.as_ref() else {
            // unreachable: absence was recorded as a violation above
            return Err(AssemblyError::Validation(vec![ContextViolation::MissingPatient]));
        };
        let subject =
            Reference::new(ResourceType::Patient, &patient.id).with_display(patient.name.as_str());

        let authors: Vec<Reference> = context
            .authors
            .iter()
            .map(|author| {
                Reference::new(ResourceType::Practitioner, &author.id)
                    .with_display(author.name.as_str())
            })
            .collect();

        let custodian = context.custodian.as_ref().map(|org| {
            Reference::new(ResourceType::Organisation, &org.id).with_display(org.name.as_str())
        });

        let encounter = context
            .encounter
            .as_ref()
            .map(|enc| Reference::new(ResourceType::Encounter, &enc.id));

        let date = parse_authored_on(&context.authored_on)?;

        let mut sections = Vec::new();
        for definition in profile.sections {
            if let Some(section) =
                build_section(definition, collections, self.terminology.as_ref())?
            {
                sections.push(section);
            }
        }
        tracing::debug!(
            kind = ?kind,
            sections = sections.len(),
            authors = authors.len(),
            "assembled composition"
        );

        Ok(Composition {
            resource_type: "Composition",
            id: self.ids.next_id(),
            meta: CompositionMeta {
                version_id: "1".to_string(),
                last_updated: Utc::now(),
                profile: vec![profile.meta_profile.to_string()],
            },
            identifier: CompositionIdentifier {
                system: IDENTIFIER_SYSTEM.to_string(),
                value: self.ids.next_id().to_string(),
            },
            status: CompositionStatus::Final,
            doc_type: type_concept(profile.doc_type),
            title: profile.title.to_string(),
            subject,
            encounter,
            date,
            authors,
            custodian,
            sections,
        })
    }
}

fn type_concept(repr: TypeRepr) -> Concept {
    match repr {
        TypeRepr::Text(text) => Concept::text_only(text),
        TypeRepr::Coded { code, display } => Concept::coded_with_text(
            Coding {
                system: SNOMED_SYSTEM.to_string(),
                code: code.to_string(),
                display: display.to_string(),
            },
            display,
        ),
    }
}

/// Parses an authored-on source string into a canonical instant.
///
/// Accepted forms: RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`
/// (both read as UTC), and a bare `YYYY-MM-DD` date (midnight UTC). Anything
/// else is rejected; a wrong document date must never be laundered into a
/// plausible-looking default.
fn parse_authored_on(value: &str) -> AssemblyResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(AssemblyError::DateFormat {
        value: value.to_string(),
    })
}
