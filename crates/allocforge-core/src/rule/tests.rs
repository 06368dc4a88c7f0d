//! Tests for rule construction and validation.

use super::*;
use crate::domain::{Task, Worker};

fn tasks() -> Vec<Task> {
    vec![Task::new("T1", 1), Task::new("T2", 1), Task::new("T3", 2)]
}

fn workers() -> Vec<Worker> {
    vec![
        Worker::new("W1", [1, 2], 1).with_group("Sales"),
        Worker::new("W2", [1, 2], 1).with_group("Sales"),
        Worker::new("W3", [1], 1),
    ]
}

#[test]
fn test_co_run_needs_two_distinct_tasks() {
    assert_eq!(
        Rule::co_run(["T1"]).unwrap_err(),
        InvalidRuleError::TooFewCoRunTasks { distinct: 1 }
    );
    assert_eq!(
        Rule::co_run(["T1", "T1"]).unwrap_err(),
        InvalidRuleError::TooFewCoRunTasks { distinct: 1 }
    );
    assert!(Rule::co_run(["T1", "T2"]).is_ok());
}

#[test]
fn test_bounds_must_be_positive() {
    assert_eq!(
        Rule::slot_restriction("Sales", 0).unwrap_err(),
        InvalidRuleError::NonPositiveBound {
            kind: RuleKind::SlotRestriction,
            bound: 0,
        }
    );
    assert_eq!(
        Rule::load_limit("Sales", -1).unwrap_err(),
        InvalidRuleError::NonPositiveBound {
            kind: RuleKind::LoadLimit,
            bound: -1,
        }
    );
    assert_eq!(
        Rule::load_limit("Sales", -1).unwrap_err().to_string(),
        "loadLimit rule bound must be positive, got -1"
    );
    assert!(matches!(
        Rule::load_limit(" ", 3).unwrap_err(),
        InvalidRuleError::BlankGroup { .. }
    ));
}

#[test]
fn test_validate_against_context() {
    let tasks = tasks();
    let workers = workers();
    let context = RuleContext::new(&tasks, &workers);

    assert!(Rule::co_run(["T1", "T3"]).unwrap().validate(&context).is_ok());
    assert_eq!(
        Rule::co_run(["T1", "T9"]).unwrap().validate(&context),
        Err(InvalidRuleError::UnknownTask("T9".to_string()))
    );

    assert!(Rule::load_limit("Sales", 2).unwrap().validate(&context).is_ok());
    assert_eq!(
        Rule::slot_restriction("Ops", 1).unwrap().validate(&context),
        Err(InvalidRuleError::EmptyGroup {
            kind: RuleKind::SlotRestriction,
            group: "Ops".to_string()
        })
    );
}

#[test]
fn test_validate_rechecks_shape() {
    let tasks = tasks();
    let workers = workers();
    let context = RuleContext::new(&tasks, &workers);

    let raw = Rule::LoadLimit {
        group: "Sales".to_string(),
        max_slots: 0,
    };
    assert!(raw.validate(&context).is_err());
}

#[test]
fn test_applies_to() {
    let tasks = tasks();
    let workers = workers();

    let co_run = Rule::co_run(["T1", "T2"]).unwrap();
    assert!(co_run.applies_to(RuleTarget::Task(&tasks[0])));
    assert!(!co_run.applies_to(RuleTarget::Task(&tasks[2])));
    assert!(!co_run.applies_to(RuleTarget::Worker(&workers[0])));

    let limit = Rule::load_limit("Sales", 2).unwrap();
    assert!(limit.applies_to(RuleTarget::Worker(&workers[1])));
    assert!(!limit.applies_to(RuleTarget::Worker(&workers[2])));
    assert!(!limit.applies_to(RuleTarget::Task(&tasks[0])));
}

#[test]
fn test_kind_and_display() {
    let rule = Rule::slot_restriction("Sales", 2).unwrap();
    assert_eq!(rule.kind(), RuleKind::SlotRestriction);
    assert_eq!(rule.group(), Some("Sales"));
    assert_eq!(rule.to_string(), "slotRestriction[Sales >= 2 free]");
    assert_eq!(RuleKind::CoRun.to_string(), "coRun");
}

#[test]
fn test_co_run_groups_merge_transitively() {
    let rules = RuleSet::from_rules(vec![
        Rule::co_run(["T4", "T5"]).unwrap(),
        Rule::co_run(["T2", "T3"]).unwrap(),
        Rule::co_run(["T3", "T5"]).unwrap(),
        Rule::co_run(["T7", "T8"]).unwrap(),
    ]);

    let groups = rules.co_run_groups();
    assert_eq!(groups.len(), 2);

    let first: Vec<&str> = groups[0].iter().map(String::as_str).collect();
    assert_eq!(first, vec!["T2", "T3", "T4", "T5"]);
    let second: Vec<&str> = groups[1].iter().map(String::as_str).collect();
    assert_eq!(second, vec!["T7", "T8"]);
}

#[test]
fn test_bounds_ignore_other_groups() {
    let rules = RuleSet::from_rules(vec![
        Rule::slot_restriction("Sales", 2).unwrap(),
        Rule::slot_restriction("Sales", 1).unwrap(),
        Rule::load_limit("Ops", 1).unwrap(),
    ]);
    let sales = Worker::new("W1", [1, 2, 3], 1).with_group("Sales");
    let free = Worker::new("W2", [1], 1);

    assert_eq!(rules.slot_floor(&sales), Some(2));
    assert_eq!(rules.load_ceiling(&sales), None);
    assert_eq!(rules.slot_floor(&free), None);
}
