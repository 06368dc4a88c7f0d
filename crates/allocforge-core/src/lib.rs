//! AllocForge Core - Core types for rule-constrained task allocation
//!
//! This crate provides the fundamental abstractions for AllocForge:
//! - Domain types for tasks, workers and validated allocation problems
//! - Declarative rules (co-run, slot restriction, load limit)
//! - The prioritization policy and its presets
//! - Fixed-point score types with per-term breakdowns
//! - Row validation and ingest of decoded spreadsheet records

pub mod domain;
pub mod error;
pub mod ingest;
pub mod policy;
pub mod rule;
pub mod score;

pub use domain::{AllocationProblem, Task, Worker};
pub use error::{AllocForgeError, Result};
pub use policy::{PolicyPreset, PrioritizationPolicy};
pub use rule::{
    DroppedRule, InvalidRuleError, InvalidRuleHandling, Rule, RuleContext, RuleKind, RuleSet,
    RuleTarget,
};
pub use score::{AllocationScore, ScoreBreakdown, ScoreTerm};
