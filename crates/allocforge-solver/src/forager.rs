//! Foragers for candidate selection
//!
//! Foragers pick one worker among the scored candidates of a unit. They
//! return an index into the candidate slice; the caller commits the unit.

use std::fmt::Debug;

use allocforge_core::{AllocationScore, ScoreBreakdown, Worker};

/// An eligible worker with the score of placing the current unit on it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Index into the problem's worker list.
    pub worker_idx: usize,
    pub worker: &'a Worker,
    pub breakdown: ScoreBreakdown,
}

impl<'a> Candidate<'a> {
    pub fn score(&self) -> AllocationScore {
        self.breakdown.total()
    }

    pub fn worker_id(&self) -> &'a str {
        &self.worker.id
    }
}

/// Trait for selecting a candidate for a unit.
///
/// Implementations must be deterministic and independent of candidate
/// order: ties are broken by worker ID.
pub trait CandidateForager: Send + Sync + Debug {
    /// Picks a candidate index.
    ///
    /// Returns None only when `candidates` is empty.
    fn pick(&self, candidates: &[Candidate<'_>]) -> Option<usize>;
}

/// Best Score forager - picks the highest score.
///
/// Equal scores go to the lexicographically smallest worker ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScoreForager;

impl BestScoreForager {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateForager for BestScoreForager {
    fn pick(&self, candidates: &[Candidate<'_>]) -> Option<usize> {
        let mut best: Option<usize> = None;

        for (idx, candidate) in candidates.iter().enumerate() {
            let is_better = match best {
                None => true,
                Some(b) => {
                    let current = &candidates[b];
                    candidate.score() > current.score()
                        || (candidate.score() == current.score()
                            && candidate.worker_id() < current.worker_id())
                }
            };
            if is_better {
                best = Some(idx);
            }
        }

        best
    }
}

/// First Eligible forager - picks the smallest worker ID, ignoring scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligibleForager;

impl FirstEligibleForager {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateForager for FirstEligibleForager {
    fn pick(&self, candidates: &[Candidate<'_>]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.worker_id().cmp(b.worker_id()))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
#[path = "forager_tests.rs"]
mod tests;
