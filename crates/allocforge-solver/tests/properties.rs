//! Property tests for allocation outcomes over generated problems.

use std::collections::{BTreeMap, BTreeSet};

use allocforge_config::{AllocatorConfig, SelectionStrategy};
use allocforge_core::{
    AllocationProblem, InvalidRuleHandling, PrioritizationPolicy, Rule, Task, Worker,
};
use allocforge_solver::{allocate_batch, AllocationOutcome, Allocator, UnassignedReason};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

const SKILLS: [&str; 3] = ["A", "B", "C"];
const GROUPS: [&str; 2] = ["G1", "G2"];

#[derive(Debug, Clone)]
struct Inputs {
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    rules: Vec<Rule>,
    policy: PrioritizationPolicy,
}

impl Inputs {
    fn problem(&self) -> AllocationProblem {
        AllocationProblem::with_rule_handling(
            self.tasks.clone(),
            self.workers.clone(),
            self.rules.clone(),
            self.policy,
            InvalidRuleHandling::Drop,
        )
        .expect("generated tasks and workers are valid")
    }

    fn reversed(&self) -> Self {
        let mut other = self.clone();
        other.tasks.reverse();
        other.workers.reverse();
        other
    }
}

fn arb_task(idx: usize) -> impl Strategy<Value = Task> {
    (
        1u32..4,
        subsequence(SKILLS.to_vec(), 0..=2),
        prop::option::of(1u32..6),
    )
        .prop_map(move |(duration, skills, priority)| {
            let task = Task::new(format!("T{:02}", idx), duration).with_skills(skills);
            match priority {
                Some(p) => task.with_priority(p),
                None => task,
            }
        })
}

fn arb_worker(idx: usize) -> impl Strategy<Value = Worker> {
    (
        subsequence(SKILLS.to_vec(), 0..=3),
        subsequence(vec![1u32, 2, 3, 4, 5, 6], 0..=6),
        1u32..3,
        prop::option::of(select(GROUPS.to_vec())),
    )
        .prop_map(move |(skills, slots, max_load, group)| {
            let worker = Worker::new(format!("W{}", idx), slots, max_load).with_skills(skills);
            match group {
                Some(g) => worker.with_group(g),
                None => worker,
            }
        })
}

fn arb_inputs() -> impl Strategy<Value = Inputs> {
    (0usize..12, 0usize..6)
        .prop_flat_map(|(n_tasks, n_workers)| {
            let tasks: Vec<_> = (0..n_tasks).map(arb_task).collect();
            let workers: Vec<_> = (0..n_workers).map(arb_worker).collect();
            (
                tasks,
                workers,
                prop::collection::vec((0usize..12, 0usize..12), 0..3),
                prop::collection::vec((select(GROUPS.to_vec()), 1i64..8), 0..2),
                prop::collection::vec((select(GROUPS.to_vec()), 1i64..4), 0..2),
                (0u32..11, 0u32..11, 0u32..11),
            )
        })
        .prop_map(|(tasks, workers, pairs, ceilings, floors, weights)| {
            let mut rules = Vec::new();
            if !tasks.is_empty() {
                for (a, b) in pairs {
                    rules.push(Rule::CoRun {
                        tasks: vec![
                            tasks[a % tasks.len()].id.clone(),
                            tasks[b % tasks.len()].id.clone(),
                        ],
                    });
                }
            }
            for (group, max_slots) in ceilings {
                rules.push(Rule::LoadLimit {
                    group: group.to_string(),
                    max_slots,
                });
            }
            for (group, min_slots) in floors {
                rules.push(Rule::SlotRestriction {
                    group: group.to_string(),
                    min_slots,
                });
            }
            Inputs {
                tasks,
                workers,
                rules,
                policy: PrioritizationPolicy::new(weights.0, weights.1, weights.2),
            }
        })
}

fn loads(problem: &AllocationProblem, outcome: &AllocationOutcome) -> BTreeMap<String, u64> {
    let mut loads = BTreeMap::new();
    for assignment in &outcome.assignments {
        let task = problem.task(&assignment.task_id).expect("assigned task exists");
        *loads.entry(assignment.worker_id.clone()).or_insert(0) += u64::from(task.duration);
    }
    loads
}

proptest! {
    #[test]
    fn every_task_has_exactly_one_outcome(inputs in arb_inputs()) {
        let problem = inputs.problem();
        let outcome = Allocator::new().allocate(&problem);

        let mut seen = BTreeSet::new();
        for id in outcome
            .assignments
            .iter()
            .map(|a| &a.task_id)
            .chain(outcome.unassigned.iter().map(|u| &u.task_id))
        {
            prop_assert!(seen.insert(id.clone()), "{} reported twice", id);
        }
        let expected: BTreeSet<String> = problem.tasks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn assigned_workers_hold_required_skills(inputs in arb_inputs()) {
        let problem = inputs.problem();
        let outcome = Allocator::new().allocate(&problem);

        for assignment in &outcome.assignments {
            let task = problem.task(&assignment.task_id).unwrap();
            let worker = problem.worker(&assignment.worker_id).unwrap();
            prop_assert!(worker.has_all_skills(&task.required_skills));
        }
    }

    #[test]
    fn co_run_groups_are_never_split(inputs in arb_inputs()) {
        let problem = inputs.problem();
        let outcome = Allocator::new().allocate(&problem);

        for group in problem.rules().co_run_groups() {
            let workers: BTreeSet<Option<&str>> = group
                .iter()
                .map(|id| outcome.assignment_for(id).map(|a| a.worker_id.as_str()))
                .collect();
            prop_assert_eq!(workers.len(), 1, "group {:?} split across {:?}", group, workers);

            if workers.contains(&None) {
                for id in &group {
                    let reason = outcome.unassigned_for(id).map(|u| u.reason);
                    prop_assert_eq!(reason, Some(UnassignedReason::CoRunUnsatisfiable));
                }
            }
        }
    }

    #[test]
    fn loads_respect_capacity_and_group_bounds(inputs in arb_inputs()) {
        let problem = inputs.problem();
        let outcome = Allocator::new().allocate(&problem);
        let loads = loads(&problem, &outcome);

        for worker in problem.workers() {
            let load = loads.get(&worker.id).copied().unwrap_or(0);
            prop_assert!(load <= worker.capacity());

            if let Some(ceiling) = problem.rules().load_ceiling(worker) {
                prop_assert!(load <= ceiling, "{} holds {} over {}", worker.id, load, ceiling);
            }
            if let Some(floor) = problem.rules().slot_floor(worker) {
                if load > 0 {
                    let per_phase = u64::from(worker.max_load_per_phase);
                    let occupied = load.div_ceil(per_phase);
                    let free = worker.slot_count() as u64 - occupied;
                    prop_assert!(free >= floor, "{} keeps {} free", worker.id, free);
                }
            }
        }
    }

    #[test]
    fn outcome_ignores_input_order(inputs in arb_inputs()) {
        for selection in [SelectionStrategy::BestScore, SelectionStrategy::FirstEligible] {
            let allocator = Allocator::with_config(AllocatorConfig::default().with_selection(selection));
            let forward = allocator.allocate(&inputs.problem()).to_json().unwrap();
            let again = allocator.allocate(&inputs.problem()).to_json().unwrap();
            let reversed = allocator.allocate(&inputs.reversed().problem()).to_json().unwrap();
            prop_assert_eq!(&forward, &again);
            prop_assert_eq!(&forward, &reversed);
        }
    }

    #[test]
    fn batch_matches_sequential(batch in prop::collection::vec(arb_inputs(), 0..5)) {
        let problems: Vec<_> = batch.iter().map(Inputs::problem).collect();
        let allocator = Allocator::new();
        let sequential: Vec<_> = problems.iter().map(|p| allocator.allocate(p)).collect();
        prop_assert_eq!(allocate_batch(&allocator, &problems), sequential);
    }
}
