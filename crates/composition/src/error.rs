//! Error taxonomy for composition assembly.
//!
//! Every failure here is a hard input or contract error surfaced to the
//! immediate caller; none are transient, so nothing is retried. Terminology
//! lookup misses are deliberately not represented; an unresolved term
//! degrades the affected field to text-only and assembly continues.

use crate::handle::ResourceType;

/// A missing mandatory context field discovered during validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextViolation {
    /// No patient was supplied; every composition needs a subject.
    MissingPatient,
    /// The author list was empty; at least one author is required.
    NoAuthors,
    /// The document kind requires an encounter and none was supplied.
    MissingEncounter,
    /// The document kind requires a custodian organisation and none was supplied.
    MissingCustodian,
}

impl ContextViolation {
    /// The context field this violation names, for user-facing messages.
    pub fn field(&self) -> &'static str {
        match self {
            ContextViolation::MissingPatient => "patient",
            ContextViolation::NoAuthors => "author",
            ContextViolation::MissingEncounter => "encounter",
            ContextViolation::MissingCustodian => "custodian",
        }
    }
}

impl std::fmt::Display for ContextViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

fn list_fields(violations: &[ContextViolation]) -> String {
    violations
        .iter()
        .map(ContextViolation::field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned by the composition assembly engine.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// One or more mandatory context fields are missing. All violations found
    /// are enumerated; construction is all-or-nothing.
    #[error("mandatory context incomplete, missing: {}", list_fields(.0))]
    Validation(Vec<ContextViolation>),

    /// The authored-on date could not be parsed. A wrong document date is a
    /// correctness bug in a clinical record, so there is no fallback to now.
    #[error("unparseable authored-on date: {value:?}")]
    DateFormat { value: String },

    /// A resource handle reached the engine without an id. This is an
    /// upstream contract error, not a runtime input condition.
    #[error("resource handle of type {resource_type} has an empty id")]
    MalformedHandle { resource_type: ResourceType },
}

/// Type alias for Results that can fail with an [`AssemblyError`].
pub type AssemblyResult<T> = std::result::Result<T, AssemblyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_every_violation() {
        let err = AssemblyError::Validation(vec![
            ContextViolation::MissingPatient,
            ContextViolation::NoAuthors,
        ]);
        let message = err.to_string();
        assert!(message.contains("patient"), "message was: {message}");
        assert!(message.contains("author"), "message was: {message}");
    }

    #[test]
    fn date_error_carries_offending_value() {
        let err = AssemblyError::DateFormat {
            value: "next tuesday".into(),
        };
        assert!(err.to_string().contains("next tuesday"));
    }

    #[test]
    fn malformed_handle_names_the_resource_type() {
        let err = AssemblyError::MalformedHandle {
            resource_type: ResourceType::MedicationRequest,
        };
        assert!(err.to_string().contains("MedicationRequest"));
    }
}
