//! Progress reporting port for UI integration.

/// Events emitted while a query is scored against the database.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Scoring started for a candidate.
    Started {
        /// Candidate identifier.
        id: String,
        /// Position in the database (0-based).
        index: usize,
        /// Size of the database.
        total: usize,
    },
    /// A candidate was scored.
    Scored {
        /// Candidate identifier.
        id: String,
        /// Its score.
        score: f64,
    },
    /// A candidate could not be scored and was left out of the ranking.
    Failed {
        /// Candidate identifier.
        id: String,
        /// Reason for the failure.
        reason: String,
    },
    /// Every candidate has been visited.
    Finished {
        /// Candidates scored successfully.
        scored: usize,
        /// Candidates that failed.
        failed: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
