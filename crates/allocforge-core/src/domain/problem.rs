//! AllocationProblem - validated input to one allocation run.

use std::collections::BTreeSet;

use crate::error::{AllocForgeError, Result};
use crate::policy::PrioritizationPolicy;
use crate::rule::{DroppedRule, InvalidRuleHandling, Rule, RuleContext, RuleSet};

use super::{Task, Worker};

/// Tasks, workers, rules and policy that passed structural validation.
///
/// Construction checks, in order: task attributes and duplicate task IDs,
/// worker attributes and duplicate worker IDs, then every rule against the
/// task and worker sets. Any failure aborts construction, except invalid
/// rules under [`InvalidRuleHandling::Drop`].
///
/// # Examples
///
/// ```
/// use allocforge_core::{AllocationProblem, PrioritizationPolicy, Rule, Task, Worker};
///
/// let problem = AllocationProblem::new(
///     vec![Task::new("T1", 1), Task::new("T2", 1)],
///     vec![Worker::new("W1", [1, 2], 1)],
///     vec![Rule::co_run(["T1", "T2"]).unwrap()],
///     PrioritizationPolicy::default(),
/// )
/// .unwrap();
/// assert_eq!(problem.tasks().len(), 2);
///
/// let duplicate = AllocationProblem::new(
///     vec![Task::new("T1", 1), Task::new("T1", 2)],
///     vec![],
///     vec![],
///     PrioritizationPolicy::default(),
/// );
/// assert!(duplicate.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AllocationProblem {
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    rules: RuleSet,
    policy: PrioritizationPolicy,
    dropped_rules: Vec<DroppedRule>,
}

impl AllocationProblem {
    /// Validates the inputs, aborting on the first invalid rule.
    pub fn new(
        tasks: Vec<Task>,
        workers: Vec<Worker>,
        rules: Vec<Rule>,
        policy: PrioritizationPolicy,
    ) -> Result<Self> {
        Self::with_rule_handling(tasks, workers, rules, policy, InvalidRuleHandling::Abort)
    }

    /// Validates the inputs with an explicit invalid-rule strategy.
    pub fn with_rule_handling(
        tasks: Vec<Task>,
        workers: Vec<Worker>,
        rules: Vec<Rule>,
        policy: PrioritizationPolicy,
        handling: InvalidRuleHandling,
    ) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.id.as_str()) {
                return Err(AllocForgeError::DuplicateTask(task.id.clone()));
            }
        }

        let mut seen = BTreeSet::new();
        for worker in &workers {
            worker.validate()?;
            if !seen.insert(worker.id.as_str()) {
                return Err(AllocForgeError::DuplicateWorker(worker.id.clone()));
            }
        }

        let (valid, dropped_rules) = {
            let context = RuleContext::new(&tasks, &workers);
            let mut valid = Vec::with_capacity(rules.len());
            let mut dropped = Vec::new();
            for (index, rule) in rules.into_iter().enumerate() {
                match rule.validate(&context) {
                    Ok(()) => valid.push(rule),
                    Err(source) => match handling {
                        InvalidRuleHandling::Abort => {
                            return Err(AllocForgeError::InvalidRule { index, source });
                        }
                        InvalidRuleHandling::Drop => {
                            dropped.push(DroppedRule::new(index, rule, &source));
                        }
                    },
                }
            }
            (valid, dropped)
        };

        Ok(Self {
            tasks,
            workers,
            rules: RuleSet::from_rules(valid),
            policy,
            dropped_rules,
        })
    }

    /// Tasks in submission order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Workers in submission order.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn policy(&self) -> PrioritizationPolicy {
        self.policy
    }

    /// Rules left out under [`InvalidRuleHandling::Drop`].
    pub fn dropped_rules(&self) -> &[DroppedRule] {
        &self.dropped_rules
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::InvalidRuleError;

    #[test]
    fn test_duplicate_worker_aborts() {
        let err = AllocationProblem::new(
            vec![],
            vec![Worker::new("W1", [1], 1), Worker::new("W1", [2], 1)],
            vec![],
            PrioritizationPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, AllocForgeError::DuplicateWorker("W1".to_string()));
    }

    #[test]
    fn test_invalid_rule_aborts_with_index() {
        let err = AllocationProblem::new(
            vec![Task::new("T1", 1), Task::new("T2", 1)],
            vec![Worker::new("W1", [1], 1)],
            vec![
                Rule::co_run(["T1", "T2"]).unwrap(),
                Rule::load_limit("Ghosts", 2).unwrap(),
            ],
            PrioritizationPolicy::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            AllocForgeError::InvalidRule {
                index: 1,
                source: InvalidRuleError::EmptyGroup {
                    kind: crate::rule::RuleKind::LoadLimit,
                    group: "Ghosts".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_invalid_rule_dropped_on_request() {
        let problem = AllocationProblem::with_rule_handling(
            vec![Task::new("T1", 1), Task::new("T2", 1)],
            vec![Worker::new("W1", [1], 1)],
            vec![
                Rule::co_run(["T1", "T9"]).unwrap(),
                Rule::co_run(["T1", "T2"]).unwrap(),
            ],
            PrioritizationPolicy::default(),
            InvalidRuleHandling::Drop,
        )
        .unwrap();

        assert_eq!(problem.rules().len(), 1);
        assert_eq!(problem.dropped_rules().len(), 1);
        assert_eq!(problem.dropped_rules()[0].index, 0);
        assert!(problem.dropped_rules()[0].reason.contains("T9"));
    }

    #[test]
    fn test_invalid_task_aborts_even_when_dropping_rules() {
        let result = AllocationProblem::with_rule_handling(
            vec![Task::new("T1", 0)],
            vec![],
            vec![],
            PrioritizationPolicy::default(),
            InvalidRuleHandling::Drop,
        );
        assert!(matches!(result, Err(AllocForgeError::InvalidTask { .. })));
    }

    #[test]
    fn test_lookup() {
        let problem = AllocationProblem::new(
            vec![Task::new("T1", 1)],
            vec![Worker::new("W1", [1], 1)],
            vec![],
            PrioritizationPolicy::default(),
        )
        .unwrap();
        assert!(problem.task("T1").is_some());
        assert!(problem.worker("W2").is_none());
    }
}
