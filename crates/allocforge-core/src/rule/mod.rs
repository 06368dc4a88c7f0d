//! Declarative allocation rules
//!
//! Rules are hard constraints on an allocation run:
//! - `CoRun`: a group of tasks goes to one worker, or none of them is assigned
//! - `SlotRestriction`: workers of a group keep a minimum number of free slots
//! - `LoadLimit`: workers of a group take at most a number of phase-units
//!
//! Rules reference workers only through their group tag. How a rule was
//! authored (structured form, imported document, text parser) does not
//! matter; every producer emits the same [`Rule`] shape.

mod set;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::domain::{Task, Worker};

pub use set::{DroppedRule, InvalidRuleHandling, RuleContext, RuleSet};

/// A single allocation rule.
///
/// The serialized form is the canonical rule document entry:
/// `{"type": "coRun", "tasks": [...]}`,
/// `{"type": "slotRestriction", "group": "...", "minSlots": n}`,
/// `{"type": "loadLimit", "group": "...", "maxSlots": n}`.
///
/// Bounds are signed so that a zero or negative bound survives parsing and
/// is rejected per rule by [`Rule::check_shape`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Rule {
    /// Listed tasks share one worker or stay unassigned together.
    CoRun { tasks: Vec<String> },

    /// Every worker of `group` keeps at least `min_slots` free phase slots.
    SlotRestriction { group: String, min_slots: i64 },

    /// No worker of `group` takes more than `max_slots` phase-units.
    LoadLimit { group: String, max_slots: i64 },
}

/// Discriminant of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    CoRun,
    SlotRestriction,
    LoadLimit,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::CoRun => "coRun",
            RuleKind::SlotRestriction => "slotRestriction",
            RuleKind::LoadLimit => "loadLimit",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something a rule can apply to.
#[derive(Debug, Clone, Copy)]
pub enum RuleTarget<'a> {
    Task(&'a Task),
    Worker(&'a Worker),
}

/// Reasons a rule is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRuleError {
    #[error("co-run rule needs at least 2 distinct tasks, got {distinct}")]
    TooFewCoRunTasks { distinct: usize },

    #[error("co-run rule references unknown task {0}")]
    UnknownTask(String),

    #[error("{kind} rule has a blank group name")]
    BlankGroup { kind: RuleKind },

    #[error("{kind} rule names group {group} with no matching workers")]
    EmptyGroup { kind: RuleKind, group: String },

    #[error("{kind} rule bound must be positive, got {bound}")]
    NonPositiveBound { kind: RuleKind, bound: i64 },
}

impl Rule {
    /// Creates a co-run rule, checking that it names at least 2 distinct tasks.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocforge_core::Rule;
    ///
    /// assert!(Rule::co_run(["T1", "T2"]).is_ok());
    /// assert!(Rule::co_run(["T1", "T1"]).is_err());
    /// ```
    pub fn co_run<I, S>(tasks: I) -> Result<Self, InvalidRuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rule = Rule::CoRun {
            tasks: tasks.into_iter().map(Into::into).collect(),
        };
        rule.check_shape()?;
        Ok(rule)
    }

    /// Creates a slot restriction rule.
    pub fn slot_restriction(
        group: impl Into<String>,
        min_slots: i64,
    ) -> Result<Self, InvalidRuleError> {
        let rule = Rule::SlotRestriction {
            group: group.into(),
            min_slots,
        };
        rule.check_shape()?;
        Ok(rule)
    }

    /// Creates a load limit rule.
    pub fn load_limit(group: impl Into<String>, max_slots: i64) -> Result<Self, InvalidRuleError> {
        let rule = Rule::LoadLimit {
            group: group.into(),
            max_slots,
        };
        rule.check_shape()?;
        Ok(rule)
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::CoRun { .. } => RuleKind::CoRun,
            Rule::SlotRestriction { .. } => RuleKind::SlotRestriction,
            Rule::LoadLimit { .. } => RuleKind::LoadLimit,
        }
    }

    /// Returns the group a slot or load rule targets.
    pub fn group(&self) -> Option<&str> {
        match self {
            Rule::CoRun { .. } => None,
            Rule::SlotRestriction { group, .. } | Rule::LoadLimit { group, .. } => Some(group),
        }
    }

    /// Returns true if the rule constrains `target`.
    ///
    /// Co-run rules apply to their listed tasks; slot and load rules apply
    /// to workers whose group tag equals the rule group.
    pub fn applies_to(&self, target: RuleTarget<'_>) -> bool {
        match (self, target) {
            (Rule::CoRun { tasks }, RuleTarget::Task(task)) => tasks.iter().any(|t| *t == task.id),
            (Rule::SlotRestriction { group, .. }, RuleTarget::Worker(worker))
            | (Rule::LoadLimit { group, .. }, RuleTarget::Worker(worker)) => worker.in_group(group),
            _ => false,
        }
    }

    /// Distinct task identifiers of a co-run rule, sorted.
    pub fn co_run_tasks(&self) -> Option<BTreeSet<&str>> {
        match self {
            Rule::CoRun { tasks } => Some(tasks.iter().map(String::as_str).collect()),
            _ => None,
        }
    }

    /// Context-free checks: member count, group name, bound.
    pub fn check_shape(&self) -> Result<(), InvalidRuleError> {
        let kind = self.kind();
        match self {
            Rule::CoRun { tasks } => {
                let distinct = tasks.iter().collect::<BTreeSet<_>>().len();
                if distinct < 2 {
                    return Err(InvalidRuleError::TooFewCoRunTasks { distinct });
                }
            }
            Rule::SlotRestriction {
                group,
                min_slots: bound,
            }
            | Rule::LoadLimit {
                group,
                max_slots: bound,
            } => {
                if group.trim().is_empty() {
                    return Err(InvalidRuleError::BlankGroup { kind });
                }
                if *bound <= 0 {
                    return Err(InvalidRuleError::NonPositiveBound {
                        kind,
                        bound: *bound,
                    });
                }
            }
        }
        Ok(())
    }

    /// Full validation against the tasks and workers of a run.
    pub fn validate(&self, context: &RuleContext<'_>) -> Result<(), InvalidRuleError> {
        self.check_shape()?;
        match self {
            Rule::CoRun { tasks } => {
                if let Some(unknown) = tasks.iter().find(|id| !context.has_task(id)) {
                    return Err(InvalidRuleError::UnknownTask(unknown.clone()));
                }
            }
            Rule::SlotRestriction { group, .. } | Rule::LoadLimit { group, .. } => {
                if context.group_size(group) == 0 {
                    return Err(InvalidRuleError::EmptyGroup {
                        kind: self.kind(),
                        group: group.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::CoRun { tasks } => write!(f, "coRun[{}]", tasks.join(", ")),
            Rule::SlotRestriction { group, min_slots } => {
                write!(f, "slotRestriction[{} >= {} free]", group, min_slots)
            }
            Rule::LoadLimit { group, max_slots } => {
                write!(f, "loadLimit[{} <= {}]", group, max_slots)
            }
        }
    }
}
