//! Result output port for writing rankings.

use crate::domain::ScoredCandidate;

/// Port for outputting ranked results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single ranked result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &ScoredCandidate) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
