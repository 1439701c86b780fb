use thiserror::Error;

/// The only failures callers ever get to see. The underlying cause is logged
/// where it happens and dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("No problem found.")]
    NotFound,
    #[error("Failed to retrieve the problem description.")]
    ExtractionFailed { url: String },
}
