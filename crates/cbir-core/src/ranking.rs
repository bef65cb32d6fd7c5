//! Linear-scan ranking of a database against a query.

use tracing::{debug, info, warn};

use crate::domain::{Candidate, CandidateFailure, Image, Metric, Ranking, ScoredCandidate};
use crate::ports::{NoProgress, ProgressEvent, ProgressSink};

/// Scores every candidate against `query` and orders them, most similar first.
///
/// The metric is invoked exactly once per candidate. Ties keep database
/// order. A candidate the metric fails on is recorded in
/// [`Ranking::failures`] and left out of the results; the scan continues.
/// `top_k` truncates the results after sorting and is clamped to the
/// number of scored candidates.
#[must_use]
pub fn rank(
    query: &Image,
    database: &[Candidate],
    metric: &dyn Metric,
    top_k: Option<usize>,
) -> Ranking {
    rank_with_progress(query, database, metric, top_k, &NoProgress)
}

/// [`rank`] with progress events sent to `progress`.
#[must_use]
pub fn rank_with_progress(
    query: &Image,
    database: &[Candidate],
    metric: &dyn Metric,
    top_k: Option<usize>,
    progress: &dyn ProgressSink,
) -> Ranking {
    info!(
        "Ranking {} candidates with {}",
        database.len(),
        metric.name()
    );

    let total = database.len();
    let mut results = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (index, candidate) in database.iter().enumerate() {
        progress.on_event(ProgressEvent::Started {
            id: candidate.id.clone(),
            index,
            total,
        });

        match metric.compute(query, &candidate.image) {
            Ok(score) => {
                debug!("{}: {score}", candidate.id);
                progress.on_event(ProgressEvent::Scored {
                    id: candidate.id.clone(),
                    score,
                });
                results.push(ScoredCandidate {
                    rank: 0,
                    index,
                    id: candidate.id.clone(),
                    score,
                });
            }
            Err(error) => {
                warn!("Skipping {}: {error}", candidate.id);
                progress.on_event(ProgressEvent::Failed {
                    id: candidate.id.clone(),
                    reason: error.to_string(),
                });
                failures.push(CandidateFailure {
                    index,
                    id: candidate.id.clone(),
                    error,
                });
            }
        }
    }

    progress.on_event(ProgressEvent::Finished {
        scored: results.len(),
        failed: failures.len(),
    });

    // Stable: equal scores keep database order
    results.sort_by(|a, b| a.score.total_cmp(&b.score));
    if let Some(k) = top_k {
        results.truncate(k);
    }
    for (position, result) in results.iter_mut().enumerate() {
        result.rank = position + 1;
    }

    Ranking { results, failures }
}
