//! AllocForge - rule-constrained task allocation in Rust
//!
//! Assign tasks to workers under co-run, slot and load rules, with a
//! weighted, explainable score for every decision.
//!
//! # Example
//!
//! ```rust
//! use allocforge::prelude::*;
//!
//! let document = RuleDocument::from_json_str(r#"{
//!     "rules": [],
//!     "prioritization": {"priorityWeight": 5, "fairnessWeight": 5, "fulfillmentWeight": 5}
//! }"#).unwrap();
//!
//! let outcome = run_allocation_with(
//!     vec![Task::new("T1", 2).with_skills(["Java"])],
//!     vec![Worker::new("W1", [1, 2], 2).with_skills(["Java", "SQL"])],
//!     document,
//!     &AllocatorConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.assignments[0].worker_id, "W1");
//! assert_eq!(outcome.assignments[0].score, AllocationScore::of(110));
//! ```

// Domain, rules and scores
pub use allocforge_core::{
    AllocForgeError, AllocationProblem, AllocationScore, DroppedRule, InvalidRuleError,
    InvalidRuleHandling, PolicyPreset, PrioritizationPolicy, Result, Rule, RuleKind, RuleSet,
    ScoreBreakdown, ScoreTerm, Task, Worker,
};

// Row ingest
pub use allocforge_core::ingest;

// Configuration
pub use allocforge_config::{AllocatorConfig, ConfigError, RuleDocument, SelectionStrategy};

// Allocation
pub use allocforge_solver::{
    allocate, allocate_batch, AllocationOutcome, Allocator, Assignment, TaskOutcome, Unassigned,
    UnassignedReason,
};

#[cfg(feature = "console")]
pub mod console;

mod run;
pub use run::{allocate_records, run_allocation, run_allocation_with, RecordAllocation};

pub mod prelude {
    pub use super::{
        allocate, allocate_records, run_allocation, run_allocation_with, AllocationOutcome,
        AllocationProblem, AllocationScore, Allocator, AllocatorConfig, PolicyPreset,
        PrioritizationPolicy, Rule, RuleDocument, SelectionStrategy, Task, UnassignedReason,
        Worker,
    };
}
