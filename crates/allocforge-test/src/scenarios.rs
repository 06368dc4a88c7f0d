//! Reference allocation scenarios.
//!
//! Each scenario documents the outcome the allocator is expected to produce
//! with the default configuration (fulfillment baseline 10, fairness scale
//! 10, best-score selection).

use allocforge_core::{AllocationProblem, PrioritizationPolicy, Result, Rule, Task, Worker};

use crate::builders::{grouped_worker, task, worker};

/// Raw inputs of an allocation run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub tasks: Vec<Task>,
    pub workers: Vec<Worker>,
    pub rules: Vec<Rule>,
    pub policy: PrioritizationPolicy,
}

impl Scenario {
    pub fn new(tasks: Vec<Task>, workers: Vec<Worker>, rules: Vec<Rule>) -> Self {
        Self {
            tasks,
            workers,
            rules,
            policy: PrioritizationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PrioritizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the scenario into a problem.
    pub fn into_problem(self) -> Result<AllocationProblem> {
        AllocationProblem::new(self.tasks, self.workers, self.rules, self.policy)
    }
}

/// Two tasks, two workers, no rules, weights 5/5/5.
///
/// Expected: T1 -> W1 (110), T2 -> W2 (105). W1 is the only Java worker;
/// after T1 its fairness term halves, so T2 goes to W2.
pub fn two_skill_example() -> Scenario {
    Scenario::new(
        vec![task("T1", 2, &["Java"]), task("T2", 1, &["SQL"])],
        vec![
            worker("W1", &["Java", "SQL"], &[1, 2], 2),
            worker("W2", &["SQL"], &[2, 3], 1),
        ],
        vec![],
    )
}

/// `CoRun{T1, T2}` where only W1 holds both skill sets.
///
/// Expected: T1 and T2 both on W1.
pub fn co_run_example() -> Scenario {
    Scenario::new(
        vec![task("T1", 1, &["Java"]), task("T2", 1, &["SQL"])],
        vec![
            worker("W1", &["Java", "SQL"], &[1, 2], 2),
            worker("W2", &["SQL"], &[1, 2, 3], 1),
        ],
        vec![Rule::CoRun {
            tasks: vec!["T1".to_string(), "T2".to_string()],
        }],
    )
}

/// `CoRun{T1, T2}` where no single worker can hold both tasks.
///
/// Expected: T1 and T2 unassigned with `CoRunUnsatisfiable`, T3 -> W2.
pub fn co_run_unsatisfiable() -> Scenario {
    Scenario::new(
        vec![
            task("T1", 1, &["Java"]),
            task("T2", 1, &["SQL"]),
            task("T3", 1, &["SQL"]),
        ],
        vec![
            worker("W1", &["Java"], &[1, 2], 1),
            worker("W2", &["SQL"], &[1, 2], 1),
        ],
        vec![Rule::CoRun {
            tasks: vec!["T1".to_string(), "T2".to_string()],
        }],
    )
}

/// Sales and Ops teams under a load limit and a slot floor.
///
/// Rules: `LoadLimit{Sales, 2}`, `SlotRestriction{Ops, 2}`.
///
/// Expected:
/// - A1 -> O1 (three-way tie at 110, smallest ID wins)
/// - A2 -> S1 (O1 would drop below its slot floor; S1/S2 tie at 105)
/// - A3 -> S2 (S1 would exceed the Sales load limit)
/// - A4 unassigned: `SlotRestrictionViolated` (only O1 has SQL)
/// - A5 unassigned: `LoadLimitExceeded`
/// - A6 unassigned: `InsufficientCapacity`
/// - A7 unassigned: `NoEligibleWorker` (nobody knows Rust)
pub fn team_limits() -> Scenario {
    Scenario::new(
        vec![
            task("A1", 2, &["CRM"]),
            task("A2", 1, &["CRM"]),
            task("A3", 2, &["CRM"]),
            task("A4", 1, &["SQL"]),
            task("A5", 2, &["CRM"]),
            task("A6", 5, &["CRM"]),
            task("A7", 1, &["Rust"]),
        ],
        vec![
            grouped_worker("S1", "Sales", &["CRM"], &[1, 2, 3], 1),
            grouped_worker("S2", "Sales", &["CRM"], &[1, 2], 2),
            grouped_worker("O1", "Ops", &["CRM", "SQL"], &[1, 2, 3, 4], 1),
        ],
        vec![
            Rule::LoadLimit {
                group: "Sales".to_string(),
                max_slots: 2,
            },
            Rule::SlotRestriction {
                group: "Ops".to_string(),
                min_slots: 2,
            },
        ],
    )
}

/// A rule document exercising every rule type, as exported by the editor.
pub const SAMPLE_RULE_DOCUMENT: &str = r#"{
  "rules": [
    {
      "type": "coRun",
      "tasks": ["T1", "T2"]
    },
    {
      "type": "slotRestriction",
      "group": "Ops",
      "minSlots": 2
    },
    {
      "type": "loadLimit",
      "group": "Sales",
      "maxSlots": 3
    }
  ],
  "prioritization": {
    "priorityWeight": 4,
    "fairnessWeight": 10,
    "fulfillmentWeight": 5
  }
}"#;
