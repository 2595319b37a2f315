//! Domain error types.
//!
//! These errors represent invariant violations when building domain values.
//! They are distinct from the conversion errors reported to callers.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Journey range is empty or outside the segment list
    #[error("invalid journey range {start}..={end} over {len} segments")]
    InvalidJourneyRange { start: usize, end: usize, len: usize },
}
