//! Error types for effect execution.

use thiserror::Error;

/// Errors an effect operation can end with.
///
/// These never escape the runtime: a failed effect either emits the
/// action produced by its failure mapper or is logged.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Operation reported a failure
    #[error("Effect failed: {0}")]
    Failed(String),

    /// Operation panicked while running
    #[error("Effect panicked: {0}")]
    Panicked(String),
}
