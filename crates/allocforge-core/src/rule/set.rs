//! Validated rule collections and per-worker bound lookups.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Task, Worker};

use super::{InvalidRuleError, Rule, RuleTarget};

/// Task and worker sets a rule is validated against.
#[derive(Debug)]
pub struct RuleContext<'a> {
    task_ids: BTreeSet<&'a str>,
    group_sizes: BTreeMap<&'a str, usize>,
}

impl<'a> RuleContext<'a> {
    pub fn new(tasks: &'a [Task], workers: &'a [Worker]) -> Self {
        let task_ids = tasks.iter().map(|t| t.id.as_str()).collect();
        let mut group_sizes = BTreeMap::new();
        for group in workers.iter().filter_map(|w| w.group.as_deref()) {
            *group_sizes.entry(group).or_insert(0) += 1;
        }
        Self {
            task_ids,
            group_sizes,
        }
    }

    pub fn has_task(&self, id: &str) -> bool {
        self.task_ids.contains(id)
    }

    /// Number of workers tagged with `group`.
    pub fn group_size(&self, group: &str) -> usize {
        self.group_sizes.get(group).copied().unwrap_or(0)
    }
}

/// What to do with a rule that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvalidRuleHandling {
    /// Fail the whole run before any assignment.
    #[default]
    Abort,

    /// Leave the rule out and record it as dropped.
    Drop,
}

/// A rule left out of a run under [`InvalidRuleHandling::Drop`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DroppedRule {
    /// Position in the submitted rule list.
    pub index: usize,
    pub rule: Rule,
    /// Rendered validation error.
    pub reason: String,
}

impl DroppedRule {
    pub fn new(index: usize, rule: Rule, error: &InvalidRuleError) -> Self {
        Self {
            index,
            rule,
            reason: error.to_string(),
        }
    }
}

/// An ordered collection of validated rules.
///
/// # Examples
///
/// ```
/// use allocforge_core::{Rule, RuleSet, Worker};
///
/// let rules = RuleSet::from_rules(vec![
///     Rule::load_limit("Sales", 4).unwrap(),
///     Rule::load_limit("Sales", 3).unwrap(),
///     Rule::slot_restriction("Sales", 1).unwrap(),
/// ]);
/// let worker = Worker::new("W1", [1, 2, 3], 2).with_group("Sales");
///
/// // The strictest bound wins.
/// assert_eq!(rules.load_ceiling(&worker), Some(3));
/// assert_eq!(rules.slot_floor(&worker), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps rules that were already validated.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that constrain `target`.
    pub fn applicable<'a>(&'a self, target: RuleTarget<'a>) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |r| r.applies_to(target))
    }

    /// Largest free-slot floor among slot restrictions on this worker.
    pub fn slot_floor(&self, worker: &Worker) -> Option<u64> {
        self.applicable(RuleTarget::Worker(worker))
            .filter_map(|r| match r {
                Rule::SlotRestriction { min_slots, .. } => u64::try_from(*min_slots).ok(),
                _ => None,
            })
            .max()
    }

    /// Smallest load ceiling among load limits on this worker.
    pub fn load_ceiling(&self, worker: &Worker) -> Option<u64> {
        self.applicable(RuleTarget::Worker(worker))
            .filter_map(|r| match r {
                Rule::LoadLimit { max_slots, .. } => u64::try_from(*max_slots).ok(),
                _ => None,
            })
            .min()
    }

    /// Co-run groups, merged transitively when rules share a task.
    ///
    /// Groups are ordered by their smallest member identifier.
    pub fn co_run_groups(&self) -> Vec<BTreeSet<String>> {
        let mut groups: Vec<BTreeSet<String>> = Vec::new();

        for rule in &self.rules {
            let Rule::CoRun { tasks } = rule else {
                continue;
            };
            let mut merged: BTreeSet<String> = tasks.iter().cloned().collect();
            let mut idx = 0;
            while idx < groups.len() {
                if groups[idx].iter().any(|id| merged.contains(id)) {
                    merged.extend(groups.swap_remove(idx));
                } else {
                    idx += 1;
                }
            }
            groups.push(merged);
        }

        groups.sort_by(|a, b| a.first().cmp(&b.first()));
        groups
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
