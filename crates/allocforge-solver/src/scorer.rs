//! Weighted candidate scoring.

use allocforge_config::AllocatorConfig;
use allocforge_core::score::SCALE;
use allocforge_core::{AllocationScore, PrioritizationPolicy, ScoreBreakdown, Worker};

use crate::unit::AllocationUnit;

/// Scores a unit on a worker at the worker's current load.
///
/// - fulfillment = `fulfillment_baseline × fulfillmentWeight`
/// - fairness = `fairness_scale × fairnessWeight × (capacity − load) / capacity`
/// - priority = `Σ (priority, else duration) × priorityWeight` over the members
///
/// Terms are computed in milli-points, so the fairness ratio is truncated to
/// three decimal places and comparisons are exact.
///
/// # Examples
///
/// ```
/// use allocforge_config::AllocatorConfig;
/// use allocforge_core::{AllocationScore, PrioritizationPolicy, Task, Worker};
/// use allocforge_solver::{AllocationUnit, Scorer};
///
/// let scorer = Scorer::new(&AllocatorConfig::default(), PrioritizationPolicy::default());
/// let task = Task::new("T2", 1);
/// let worker = Worker::new("W1", [1, 2], 2);
///
/// let breakdown = scorer.score(&AllocationUnit::single(&task), &worker, 2);
/// assert_eq!(breakdown.fairness, AllocationScore::of(25));
/// assert_eq!(breakdown.total(), AllocationScore::of(80));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    fulfillment_baseline: u32,
    fairness_scale: u32,
    policy: PrioritizationPolicy,
}

impl Scorer {
    pub fn new(config: &AllocatorConfig, policy: PrioritizationPolicy) -> Self {
        Self {
            fulfillment_baseline: config.fulfillment_baseline,
            fairness_scale: config.fairness_scale,
            policy,
        }
    }

    pub fn policy(&self) -> PrioritizationPolicy {
        self.policy
    }

    /// Breakdown for placing `unit` on `worker`, which currently holds `load` units.
    pub fn score(&self, unit: &AllocationUnit<'_>, worker: &Worker, load: u64) -> ScoreBreakdown {
        ScoreBreakdown::new(
            self.fulfillment(),
            self.fairness(worker.capacity(), load),
            self.priority(unit.priority_sum()),
        )
    }

    fn fulfillment(&self) -> AllocationScore {
        let points = i128::from(self.fulfillment_baseline)
            * i128::from(self.policy.fulfillment_weight)
            * i128::from(SCALE);
        to_score(points)
    }

    fn fairness(&self, capacity: u64, load: u64) -> AllocationScore {
        if capacity == 0 {
            return AllocationScore::ZERO;
        }
        let headroom = i128::from(capacity.saturating_sub(load));
        let points = (i128::from(self.fairness_scale)
            * i128::from(self.policy.fairness_weight)
            * i128::from(SCALE))
        .checked_mul(headroom)
        .map_or(i128::MAX, |p| p / i128::from(capacity));
        to_score(points)
    }

    fn priority(&self, priority_sum: u64) -> AllocationScore {
        let points =
            i128::from(priority_sum) * i128::from(self.policy.priority_weight) * i128::from(SCALE);
        to_score(points)
    }
}

fn to_score(scaled: i128) -> AllocationScore {
    AllocationScore::of_scaled(i64::try_from(scaled).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocforge_core::{PolicyPreset, Task};

    fn scorer(policy: PrioritizationPolicy) -> Scorer {
        Scorer::new(&AllocatorConfig::default(), policy)
    }

    #[test]
    fn test_unloaded_worker() {
        let task = Task::new("T1", 2);
        let worker = Worker::new("W1", [1, 2], 2);

        let breakdown = scorer(PrioritizationPolicy::default()).score(
            &AllocationUnit::single(&task),
            &worker,
            0,
        );
        assert_eq!(breakdown.fulfillment, AllocationScore::of(50));
        assert_eq!(breakdown.fairness, AllocationScore::of(50));
        assert_eq!(breakdown.priority, AllocationScore::of(10));
        assert_eq!(breakdown.total(), AllocationScore::of(110));
    }

    #[test]
    fn test_explicit_priority_overrides_duration() {
        let task = Task::new("T1", 2).with_priority(5);
        let worker = Worker::new("W1", [1], 3);

        let breakdown = scorer(PolicyPreset::FastestDelivery.policy()).score(
            &AllocationUnit::single(&task),
            &worker,
            0,
        );
        assert_eq!(breakdown.priority, AllocationScore::of(50));
        assert_eq!(breakdown.fulfillment, AllocationScore::of(30));
        assert_eq!(breakdown.fairness, AllocationScore::of(10));
    }

    #[test]
    fn test_fairness_is_fixed_point() {
        let task = Task::new("T1", 1);
        let worker = Worker::new("W1", [1, 2, 3], 1);

        let breakdown = scorer(PrioritizationPolicy::new(0, 1, 0)).score(
            &AllocationUnit::single(&task),
            &worker,
            1,
        );
        // 10 × 2/3, truncated to milli-points
        assert_eq!(breakdown.fairness, AllocationScore::of_scaled(6_666));
    }

    #[test]
    fn test_co_run_priority_sums_members() {
        let a = Task::new("T1", 2);
        let b = Task::new("T2", 1).with_priority(4);
        let worker = Worker::new("W1", [1, 2], 2);

        let breakdown = scorer(PrioritizationPolicy::default()).score(
            &AllocationUnit::co_run([&a, &b]),
            &worker,
            0,
        );
        assert_eq!(breakdown.priority, AllocationScore::of(30));
    }

    #[test]
    fn test_zero_policy_scores_zero() {
        let task = Task::new("T1", 1);
        let worker = Worker::new("W1", [1], 1);

        let breakdown = scorer(PrioritizationPolicy::new(0, 0, 0)).score(
            &AllocationUnit::single(&task),
            &worker,
            0,
        );
        assert!(breakdown.total().is_zero());
    }

    #[test]
    fn test_configured_multipliers() {
        let config = AllocatorConfig::default()
            .with_fulfillment_baseline(1)
            .with_fairness_scale(100);
        let scorer = Scorer::new(&config, PrioritizationPolicy::new(0, 1, 1));
        let task = Task::new("T1", 1);
        let worker = Worker::new("W1", [1, 2], 1);

        let breakdown = scorer.score(&AllocationUnit::single(&task), &worker, 1);
        assert_eq!(breakdown.fulfillment, AllocationScore::of(1));
        assert_eq!(breakdown.fairness, AllocationScore::of(50));
    }
}
