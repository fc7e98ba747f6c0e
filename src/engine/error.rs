use thiserror::Error;

/// Errors raised by the pacing core. All of them are local and recoverable:
/// the session keeps its previous state when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacerError {
    #[error("Invalid rate {value}: expected whole words per minute in {min}..={max}")]
    InvalidRate { value: String, min: u32, max: u32 },

    #[error("Token {index} is empty")]
    InvalidInput { index: usize },

    #[error("Source text contains no words")]
    EmptySource,
}
