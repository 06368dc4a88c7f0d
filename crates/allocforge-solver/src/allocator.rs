//! Greedy single-pass allocator.

use std::time::Instant;

use allocforge_config::{AllocatorConfig, SelectionStrategy};
use allocforge_core::{AllocationProblem, PrioritizationPolicy, Result, Rule, Task, Worker};
use tracing::{debug, info, trace, warn};

use crate::eligibility::{filter_workers, EligibilityReport};
use crate::forager::{BestScoreForager, Candidate, CandidateForager, FirstEligibleForager};
use crate::ledger::WorkerLedger;
use crate::outcome::{AllocationOutcome, Assignment, Unassigned, UnassignedReason};
use crate::scorer::Scorer;
use crate::unit::{build_units, AllocationUnit};

/// Assigns tasks to workers one unit at a time.
///
/// Units are processed in ascending order of their smallest task ID. For each
/// unit, eligibility is recomputed against the current loads, every eligible
/// worker is scored, and the configured forager picks one. There is no
/// backtracking; a run is a pure function of the problem and configuration.
///
/// # Examples
///
/// ```
/// use allocforge_config::{AllocatorConfig, SelectionStrategy};
/// use allocforge_core::{AllocationProblem, PrioritizationPolicy, Task, Worker};
/// use allocforge_solver::Allocator;
///
/// let problem = AllocationProblem::new(
///     vec![Task::new("T1", 1)],
///     vec![Worker::new("W2", [1], 1), Worker::new("W1", [1], 1)],
///     vec![],
///     PrioritizationPolicy::default(),
/// )
/// .unwrap();
///
/// let allocator = Allocator::with_config(
///     AllocatorConfig::default().with_selection(SelectionStrategy::FirstEligible),
/// );
/// let outcome = allocator.allocate(&problem);
/// assert_eq!(outcome.assignments[0].worker_id, "W1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Validates raw inputs with the configured invalid-rule handling.
    pub fn prepare(
        &self,
        tasks: Vec<Task>,
        workers: Vec<Worker>,
        rules: Vec<Rule>,
        policy: PrioritizationPolicy,
    ) -> Result<AllocationProblem> {
        AllocationProblem::with_rule_handling(
            tasks,
            workers,
            rules,
            policy,
            self.config.invalid_rules,
        )
    }

    /// Validates raw inputs and allocates them.
    ///
    /// Structural errors abort before any assignment is made.
    pub fn solve(
        &self,
        tasks: Vec<Task>,
        workers: Vec<Worker>,
        rules: Vec<Rule>,
        policy: PrioritizationPolicy,
    ) -> Result<AllocationOutcome> {
        let problem = self.prepare(tasks, workers, rules, policy)?;
        Ok(self.allocate(&problem))
    }

    /// Allocates a validated problem.
    pub fn allocate(&self, problem: &AllocationProblem) -> AllocationOutcome {
        match self.config.selection {
            SelectionStrategy::BestScore => self.run(problem, &BestScoreForager::new()),
            SelectionStrategy::FirstEligible => self.run(problem, &FirstEligibleForager::new()),
        }
    }

    fn run<F: CandidateForager>(
        &self,
        problem: &AllocationProblem,
        forager: &F,
    ) -> AllocationOutcome {
        let start = Instant::now();
        let scorer = Scorer::new(&self.config, problem.policy());
        let units = build_units(problem);
        let mut ledger = WorkerLedger::new(problem.workers());
        let mut outcome = AllocationOutcome {
            dropped_rules: problem.dropped_rules().to_vec(),
            ..AllocationOutcome::default()
        };

        info!(
            event = "allocation_start",
            tasks = problem.tasks().len(),
            workers = problem.workers().len(),
            rules = problem.rules().len(),
            units = units.len(),
            selection = ?self.config.selection,
        );

        for dropped in problem.dropped_rules() {
            warn!(
                event = "rule_dropped",
                index = dropped.index,
                rule = %dropped.rule,
                reason = %dropped.reason,
            );
        }

        for unit in &units {
            let report = filter_workers(unit, problem.rules(), &ledger);
            let candidates = score_candidates(unit, &report, &scorer, &ledger);

            match forager.pick(&candidates) {
                Some(idx) => {
                    let chosen = candidates[idx];
                    debug!(
                        event = "unit_assigned",
                        unit = %unit,
                        worker = %chosen.worker.id,
                        candidates = candidates.len(),
                        score = %chosen.score(),
                    );
                    for task in unit.members() {
                        let phases = ledger.place(chosen.worker_idx, task.duration);
                        outcome.assignments.push(Assignment {
                            task_id: task.id.clone(),
                            worker_id: chosen.worker.id.clone(),
                            score: chosen.score(),
                            breakdown: chosen.breakdown,
                            phases,
                        });
                    }
                }
                None => {
                    let reason = report
                        .reason(unit)
                        .unwrap_or(UnassignedReason::NoEligibleWorker);
                    let detail = describe(unit, &report, reason);
                    debug!(
                        event = "unit_unassigned",
                        unit = %unit,
                        reason = %reason,
                        detail = %detail,
                    );
                    outcome
                        .unassigned
                        .extend(unit.members().iter().map(|task| Unassigned {
                            task_id: task.id.clone(),
                            reason,
                            detail: detail.clone(),
                        }));
                }
            }
        }

        info!(
            event = "allocation_end",
            assigned = outcome.assignments.len(),
            unassigned = outcome.unassigned.len(),
            dropped_rules = outcome.dropped_rules.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            score = %outcome.total_score(),
        );

        outcome
    }
}

/// Allocates with the default configuration.
pub fn allocate(problem: &AllocationProblem) -> AllocationOutcome {
    Allocator::new().allocate(problem)
}

fn score_candidates<'a>(
    unit: &AllocationUnit<'_>,
    report: &EligibilityReport,
    scorer: &Scorer,
    ledger: &WorkerLedger<'a>,
) -> Vec<Candidate<'a>> {
    report
        .eligible
        .iter()
        .map(|&worker_idx| {
            let worker = &ledger.workers()[worker_idx];
            let breakdown = scorer.score(unit, worker, ledger.load(worker_idx));
            trace!(
                event = "candidate",
                unit = %unit,
                worker = %worker.id,
                score = %breakdown.total(),
                breakdown = %breakdown,
            );
            Candidate {
                worker_idx,
                worker,
                breakdown,
            }
        })
        .collect()
}

fn describe(
    unit: &AllocationUnit<'_>,
    report: &EligibilityReport,
    reason: UnassignedReason,
) -> String {
    let skills = unit
        .required_skills()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match reason {
        UnassignedReason::NoEligibleWorker => {
            format!("no worker holds all required skills [{}]", skills)
        }
        UnassignedReason::InsufficientCapacity => format!(
            "no skilled worker has {} free phase-units",
            unit.duration()
        ),
        UnassignedReason::SlotRestrictionViolated => {
            "every remaining worker would drop below its group's free-slot floor".to_string()
        }
        UnassignedReason::LoadLimitExceeded => {
            "every remaining worker would exceed its group's load limit".to_string()
        }
        UnassignedReason::CoRunUnsatisfiable => match report.emptied_at {
            Some(stage) => format!(
                "no single worker can take co-run group {} (failed at {})",
                unit, stage
            ),
            None => format!("no single worker can take co-run group {}", unit),
        },
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
