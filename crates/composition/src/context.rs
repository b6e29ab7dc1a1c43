//! Clinical context for a single assembly call.
//!
//! The context carries everything a composition header needs beyond the
//! clinical records themselves: subject, authorship, custodian, encounter
//! linkage and the authored-on timestamp. Display names are validated at
//! construction ([`DisplayName`]); the assembler never re-checks identity
//! fields. Presence of patient/authors/encounter/custodian is validated per
//! document profile during assembly, not here.

use hrb_types::{DisplayName, TextError};

/// An identified person (patient or practitioner) with a guaranteed
/// non-empty primary display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRef {
    pub id: String,
    pub name: DisplayName,
}

impl PersonRef {
    /// Creates a person reference, validating the display name.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the name is empty after trimming.
    pub fn new(id: impl Into<String>, name: impl AsRef<str>) -> Result<Self, TextError> {
        Ok(Self {
            id: id.into(),
            name: DisplayName::new(name)?,
        })
    }
}

/// An organisation acting as document custodian.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationRef {
    pub id: String,
    pub name: DisplayName,
}

impl OrganizationRef {
    /// Creates an organisation reference, validating the display name.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the name is empty after trimming.
    pub fn new(id: impl Into<String>, name: impl AsRef<str>) -> Result<Self, TextError> {
        Ok(Self {
            id: id.into(),
            name: DisplayName::new(name)?,
        })
    }
}

/// The visit a document belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterRef {
    pub id: String,
}

impl EncounterRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Document-level context supplied by the upstream resource layer.
///
/// `authored_on` is kept in source form here and parsed to a canonical
/// instant during assembly, so an unparseable date is reported against the
/// assembly call that used it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClinicalContext {
    pub patient: Option<PersonRef>,
    pub encounter: Option<EncounterRef>,
    pub custodian: Option<OrganizationRef>,
    /// Document authors, in order. At least one is required at assembly.
    pub authors: Vec<PersonRef>,
    /// Authored-on timestamp in source form.
    pub authored_on: String,
}

impl ClinicalContext {
    /// Creates an empty context with the given authored-on source string.
    pub fn new(authored_on: impl Into<String>) -> Self {
        Self {
            patient: None,
            encounter: None,
            custodian: None,
            authors: Vec::new(),
            authored_on: authored_on.into(),
        }
    }

    pub fn with_patient(mut self, patient: PersonRef) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn with_encounter(mut self, encounter: EncounterRef) -> Self {
        self.encounter = Some(encounter);
        self
    }

    pub fn with_custodian(mut self, custodian: OrganizationRef) -> Self {
        self.custodian = Some(custodian);
        self
    }

    /// Appends an author; order is preserved into the composition.
    pub fn with_author(mut self, author: PersonRef) -> Self {
        self.authors.push(author);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_ref_rejects_empty_name() {
        let err = PersonRef::new("p-1", "  ").expect_err("should reject blank name");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn organization_ref_trims_name() {
        let org = OrganizationRef::new("org-1", " City Hospital ").expect("valid org");
        assert_eq!(org.name.as_str(), "City Hospital");
    }

    #[test]
    fn builder_preserves_author_order() {
        let ctx = ClinicalContext::new("2024-03-01")
            .with_author(PersonRef::new("pr-1", "Dr A").expect("valid"))
            .with_author(PersonRef::new("pr-2", "Dr B").expect("valid"));
        let ids: Vec<_> = ctx.authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["pr-1", "pr-2"]);
    }
}
