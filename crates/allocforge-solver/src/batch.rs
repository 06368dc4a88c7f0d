//! Parallel evaluation of independent allocation problems.

use allocforge_core::AllocationProblem;
use rayon::prelude::*;
use tracing::info;

use crate::allocator::Allocator;
use crate::outcome::AllocationOutcome;

/// Allocates every problem on the rayon pool.
///
/// Each problem gets its own ledger, so outcomes are identical to running
/// the problems one after another. Results are returned in input order.
pub fn allocate_batch(
    allocator: &Allocator,
    problems: &[AllocationProblem],
) -> Vec<AllocationOutcome> {
    info!(event = "batch_start", problems = problems.len());

    let outcomes: Vec<AllocationOutcome> = problems
        .par_iter()
        .map(|problem| allocator.allocate(problem))
        .collect();

    info!(
        event = "batch_end",
        problems = outcomes.len(),
        assigned = outcomes.iter().map(|o| o.assignments.len()).sum::<usize>(),
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocforge_config::{AllocatorConfig, SelectionStrategy};
    use allocforge_test::scenarios::{
        co_run_example, co_run_unsatisfiable, team_limits, two_skill_example,
    };

    fn problems() -> Vec<AllocationProblem> {
        [
            two_skill_example(),
            co_run_example(),
            co_run_unsatisfiable(),
            team_limits(),
        ]
        .into_iter()
        .map(|s| s.into_problem().unwrap())
        .collect()
    }

    #[test]
    fn test_batch_matches_sequential() {
        let problems = problems();
        for config in [
            AllocatorConfig::default(),
            AllocatorConfig::default().with_selection(SelectionStrategy::FirstEligible),
        ] {
            let allocator = Allocator::with_config(config);
            let sequential: Vec<_> = problems.iter().map(|p| allocator.allocate(p)).collect();
            assert_eq!(allocate_batch(&allocator, &problems), sequential);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(allocate_batch(&Allocator::new(), &[]).is_empty());
    }
}
