//! Terminology resolution collaborator interface.
//!
//! Mapping free text to a standardized coded term is delegated to an
//! external service. The engine only depends on this trait; resolution
//! failures and timeouts must be mapped to [`TermLookup::Unknown`] by the
//! adapter, never surfaced as assembly errors. An unknown term degrades the
//! affected field to text-only and assembly continues.

/// A coded term from a terminology system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodedTerm {
    /// Terminology system URL (for example `http://snomed.info/sct`).
    pub system: String,
    /// Code value within the system.
    pub code: String,
    /// Preferred display for the code.
    pub display: String,
}

/// Outcome of a terminology lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermLookup {
    /// The free text resolved to a coded term.
    Coded(CodedTerm),
    /// No coding available; the field stays text-only.
    Unknown,
}

/// External terminology resolution service.
///
/// Implementations may call out over the network; callers bounding the call
/// with a timeout must report the timeout as [`TermLookup::Unknown`].
pub trait TerminologyResolver {
    fn resolve(&self, free_text: &str) -> TermLookup;
}

/// Default adapter used when no terminology service is wired in: every
/// lookup is unknown and coded fields degrade to text-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnresolvedTerminology;

impl TerminologyResolver for UnresolvedTerminology {
    fn resolve(&self, _free_text: &str) -> TermLookup {
        TermLookup::Unknown
    }
}
