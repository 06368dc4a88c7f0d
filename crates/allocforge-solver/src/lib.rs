//! AllocForge Solver - greedy rule-constrained allocation
//!
//! This crate turns a validated [`AllocationProblem`] into an
//! [`AllocationOutcome`]:
//! - Unit building (singletons and merged co-run groups)
//! - Worker load ledger with phase packing
//! - Staged eligibility filtering (skills, capacity, slot floor, load ceiling)
//! - Weighted scoring with per-term breakdowns
//! - Candidate foragers (best score, first eligible)
//! - Parallel batch execution of independent problems
//!
//! # Example
//!
//! ```
//! use allocforge_core::{AllocationProblem, PrioritizationPolicy, Task, Worker};
//! use allocforge_solver::allocate;
//!
//! let problem = AllocationProblem::new(
//!     vec![Task::new("T1", 2).with_skills(["Java"])],
//!     vec![Worker::new("W1", [1, 2], 2).with_skills(["Java"])],
//!     vec![],
//!     PrioritizationPolicy::default(),
//! )
//! .unwrap();
//!
//! let outcome = allocate(&problem);
//! assert_eq!(outcome.assignments[0].worker_id, "W1");
//! assert!(outcome.unassigned.is_empty());
//! ```
//!
//! [`AllocationProblem`]: allocforge_core::AllocationProblem

pub mod allocator;
pub mod batch;
pub mod eligibility;
pub mod forager;
pub mod ledger;
pub mod outcome;
pub mod scorer;
pub mod unit;

pub use allocator::{allocate, Allocator};
pub use batch::allocate_batch;
pub use eligibility::{EligibilityReport, FilterStage};
pub use forager::{BestScoreForager, Candidate, CandidateForager, FirstEligibleForager};
pub use ledger::WorkerLedger;
pub use outcome::{AllocationOutcome, Assignment, TaskOutcome, Unassigned, UnassignedReason};
pub use scorer::Scorer;
pub use unit::{build_units, AllocationUnit};
