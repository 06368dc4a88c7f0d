//! Allocation results.

use std::fmt;

use allocforge_core::{AllocationScore, DroppedRule, ScoreBreakdown};
use serde::{Deserialize, Serialize};

/// A task placed on a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub task_id: String,
    pub worker_id: String,
    /// Score of the decision that placed the task's unit.
    pub score: AllocationScore,
    pub breakdown: ScoreBreakdown,
    /// Phases the task's units landed in, ascending.
    pub phases: Vec<u32>,
}

/// Why a task was left unassigned.
///
/// Serialized as the variant name. Alongside the four rule and skill codes,
/// consumers must expect `InsufficientCapacity`, reported when skilled
/// workers exist but none has phase capacity left for the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnassignedReason {
    /// No worker holds the required skills, or the worker pool is empty.
    NoEligibleWorker,
    /// Every skilled worker is out of phase capacity.
    InsufficientCapacity,
    /// Every remaining worker would fall below its group's free-slot floor.
    SlotRestrictionViolated,
    /// Every remaining worker would exceed its group's load ceiling.
    LoadLimitExceeded,
    /// No single worker can take every member of the co-run group.
    CoRunUnsatisfiable,
}

impl UnassignedReason {
    pub fn code(&self) -> &'static str {
        match self {
            UnassignedReason::NoEligibleWorker => "NoEligibleWorker",
            UnassignedReason::InsufficientCapacity => "InsufficientCapacity",
            UnassignedReason::SlotRestrictionViolated => "SlotRestrictionViolated",
            UnassignedReason::LoadLimitExceeded => "LoadLimitExceeded",
            UnassignedReason::CoRunUnsatisfiable => "CoRunUnsatisfiable",
        }
    }
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A task the allocator could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unassigned {
    pub task_id: String,
    pub reason: UnassignedReason,
    /// Human-readable explanation.
    pub detail: String,
}

/// Borrowed view of a single task's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome<'a> {
    Assigned(&'a Assignment),
    Unassigned(&'a Unassigned),
}

/// Result of one allocation run.
///
/// Every task of the problem appears exactly once, in either list. Both
/// lists follow unit processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<Unassigned>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_rules: Vec<DroppedRule>,
}

impl AllocationOutcome {
    pub fn assignment_for(&self, task_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    pub fn unassigned_for(&self, task_id: &str) -> Option<&Unassigned> {
        self.unassigned.iter().find(|u| u.task_id == task_id)
    }

    /// Looks up the result for a task.
    pub fn outcome_for(&self, task_id: &str) -> Option<TaskOutcome<'_>> {
        self.assignment_for(task_id)
            .map(TaskOutcome::Assigned)
            .or_else(|| self.unassigned_for(task_id).map(TaskOutcome::Unassigned))
    }

    /// Task IDs placed on `worker_id`, in assignment order.
    pub fn tasks_for(&self, worker_id: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .map(|a| a.task_id.as_str())
            .collect()
    }

    /// Number of tasks with a result.
    pub fn task_count(&self) -> usize {
        self.assignments.len() + self.unassigned.len()
    }

    /// Returns true if every task was assigned.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Sum of assignment scores.
    pub fn total_score(&self) -> AllocationScore {
        self.assignments.iter().map(|a| a.score).sum()
    }

    /// Renders the outcome as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
