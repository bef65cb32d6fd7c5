//! Core domain types for image retrieval.

mod candidate;
mod metric;
mod raster;

pub use candidate::{Candidate, CandidateFailure, Ranking, ScoredCandidate};
pub use metric::Metric;
pub use raster::{Channel, Image};
