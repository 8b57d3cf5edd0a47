use thiserror::Error;

/// Errors from a number-fact lookup.
///
/// Carried inside `FactResponse` actions, so it is cloneable and
/// comparable rather than wrapping the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    #[error("Fact request failed: {0}")]
    Request(String),

    #[error("Fact service returned status {status}")]
    Status { status: u16 },

    #[error("Failed to decode fact response: {0}")]
    Decode(String),

    #[error("Fact request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("No facts for negative number {number}")]
    NegativeNumber { number: i64 },
}
