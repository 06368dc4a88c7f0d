//! End-to-end tests through the facade entry points.

use allocforge::ingest::Record;
use allocforge::prelude::*;
use allocforge::{AllocForgeError, InvalidRuleHandling};
use allocforge_test::builders::{grouped_worker, task};
use allocforge_test::scenarios::{two_skill_example, SAMPLE_RULE_DOCUMENT};

fn team() -> Vec<Worker> {
    vec![
        grouped_worker("S1", "Sales", &["CRM"], &[1, 2, 3], 1),
        grouped_worker("S2", "Sales", &["CRM"], &[1, 2], 2),
        grouped_worker("O1", "Ops", &["CRM", "SQL"], &[1, 2, 3, 4], 1),
    ]
}

fn row(cells: &[(&str, &str)]) -> Record {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_imported_document_drives_allocation() {
    let document = RuleDocument::from_json_str(SAMPLE_RULE_DOCUMENT).unwrap();
    let outcome = run_allocation_with(
        vec![task("T1", 1, &["CRM"]), task("T2", 1, &["SQL"])],
        team(),
        document,
        &AllocatorConfig::default(),
    )
    .unwrap();

    let t1 = outcome.assignment_for("T1").unwrap();
    let t2 = outcome.assignment_for("T2").unwrap();
    assert_eq!(t1.worker_id, "O1");
    assert_eq!(t2.worker_id, "O1");
    assert_eq!(t1.phases, vec![1]);
    assert_eq!(t2.phases, vec![2]);
    // fulfillment 10 × 5, fairness 10 × 10, priority (1 + 1) × 4
    assert_eq!(t1.score, AllocationScore::of(158));
}

#[test]
fn test_invalid_rule_aborts_by_default() {
    let document = RuleDocument::default().with_rule(Rule::load_limit("Ghosts", 2).unwrap());
    let err = run_allocation_with(
        vec![task("T1", 1, &[])],
        team(),
        document,
        &AllocatorConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, AllocForgeError::InvalidRule { index: 0, .. }));
}

#[test]
fn test_invalid_rule_dropped_when_configured() {
    let document = RuleDocument::default()
        .with_rule(Rule::load_limit("Ghosts", 2).unwrap())
        .with_rule(Rule::load_limit("Sales", 1).unwrap());
    let config = AllocatorConfig::default().with_invalid_rules(InvalidRuleHandling::Drop);

    let outcome =
        run_allocation_with(vec![task("T1", 2, &["CRM"])], team(), document, &config).unwrap();

    assert_eq!(outcome.dropped_rules.len(), 1);
    assert_eq!(outcome.dropped_rules[0].index, 0);
    // The Sales ceiling still applies
    assert_eq!(outcome.assignment_for("T1").unwrap().worker_id, "O1");
}

#[test]
fn test_non_positive_bounds_follow_rule_handling() {
    let json = r#"{"rules": [
        {"type": "loadLimit", "group": "Sales", "maxSlots": -1},
        {"type": "loadLimit", "group": "Ops", "maxSlots": 0},
        {"type": "slotRestriction", "group": "Ops", "minSlots": -3}
    ]}"#;
    let document = RuleDocument::from_json_str(json).unwrap();

    let err = run_allocation_with(
        vec![task("T1", 1, &["CRM"])],
        team(),
        document.clone(),
        &AllocatorConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AllocForgeError::InvalidRule { index: 0, .. }));

    let config = AllocatorConfig::default().with_invalid_rules(InvalidRuleHandling::Drop);
    let outcome =
        run_allocation_with(vec![task("T1", 1, &["CRM"])], team(), document, &config).unwrap();
    let dropped: Vec<usize> = outcome.dropped_rules.iter().map(|d| d.index).collect();
    assert_eq!(dropped, vec![0, 1, 2]);
    assert!(outcome.assignment_for("T1").is_some());
}

#[test]
fn test_run_allocation_without_config_file() {
    let scenario = two_skill_example();
    let outcome = run_allocation(
        scenario.tasks,
        scenario.workers,
        RuleDocument::new(scenario.rules, scenario.policy),
    )
    .unwrap();

    assert_eq!(outcome.assignment_for("T2").unwrap().worker_id, "W2");
}

#[test]
fn test_records_with_errors_are_excluded() {
    let tasks = vec![
        row(&[
            ("TaskID", "T1"),
            ("TaskName", "Report"),
            ("Duration", "2"),
            ("RequiredSkills", "CRM"),
            ("PriorityLevel", "3"),
        ]),
        row(&[
            ("TaskID", "T2"),
            ("TaskName", "Audit"),
            ("Duration", "1"),
            ("RequiredSkills", "SQL"),
            ("PriorityLevel", "9"),
        ]),
    ];
    let workers = vec![
        row(&[
            ("WorkerID", "S1"),
            ("WorkerName", "Sam"),
            ("Skills", "CRM"),
            ("AvailableSlots", "[1,2,3]"),
            ("MaxLoadPerPhase", "1"),
            ("GroupTag", "Sales"),
        ]),
        row(&[("WorkerID", "O1"), ("WorkerName", "Olu")]),
    ];

    let result =
        allocate_records(&tasks, &workers, RuleDocument::default(), &AllocatorConfig::default())
            .unwrap();

    assert_eq!(result.rejected_tasks.len(), 1);
    assert_eq!(result.rejected_tasks[0].row_index, 1);
    assert_eq!(
        result.rejected_tasks[0].errors,
        vec!["PriorityLevel must be between 1 and 5"]
    );
    assert_eq!(result.rejected_workers[0].row_index, 1);

    assert_eq!(result.outcome.task_count(), 1);
    let t1 = result.outcome.assignment_for("T1").unwrap();
    assert_eq!(t1.worker_id, "S1");
    // Explicit PriorityLevel replaces duration in the priority term
    assert_eq!(t1.breakdown.priority, AllocationScore::of(15));
}

#[test]
fn test_outcome_json_round_trip() {
    let scenario = two_skill_example();
    let outcome = run_allocation_with(
        scenario.tasks,
        scenario.workers,
        RuleDocument::new(scenario.rules, scenario.policy),
        &AllocatorConfig::default(),
    )
    .unwrap();

    let json = outcome.to_json().unwrap();
    let parsed: AllocationOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome);
}
