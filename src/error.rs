//! Error types for scanfuse.

use thiserror::Error;

/// Registration error type.
///
/// A pose-solver miss for one scanner pairing is a negative result, not
/// an error; errors arise only from unusable input or a merge that can
/// make no further progress.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Input text could not be parsed into consistent scanner blocks.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// No remaining floating scanner overlaps any fixed scanner enough
    /// to relate their frames.
    #[error("cannot complete registration: {remaining} scanner(s) unresolved")]
    InsufficientOverlap { remaining: usize },
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
