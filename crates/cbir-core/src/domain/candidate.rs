//! Database entries and ranking output.

use serde::{Deserialize, Serialize};

use super::Image;
use crate::error::Error;

/// One database entry: a decoded image and where it came from.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provenance identifier, usually the file path.
    pub id: String,
    /// Decoded image.
    pub image: Image,
}

impl Candidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(id: impl Into<String>, image: Image) -> Self {
        Self {
            id: id.into(),
            image,
        }
    }
}

/// Score of one candidate against the query, for one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Position of the candidate in the database.
    #[serde(skip)]
    pub index: usize,
    /// Candidate identifier.
    #[serde(rename = "path")]
    pub id: String,
    /// Dissimilarity; lower is more similar.
    pub score: f64,
}

/// A candidate the metric could not score.
#[derive(Debug)]
pub struct CandidateFailure {
    /// Position of the candidate in the database.
    pub index: usize,
    /// Candidate identifier.
    pub id: String,
    /// Why scoring failed.
    pub error: Error,
}

/// Outcome of ranking a database against a query.
#[derive(Debug, Default)]
pub struct Ranking {
    /// Scored candidates, most similar first.
    pub results: Vec<ScoredCandidate>,
    /// Candidates excluded because their score could not be computed.
    pub failures: Vec<CandidateFailure>,
}

impl Ranking {
    /// Returns true if nothing was scored and nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty()
    }
}
