//! Allocation units: the decisions the allocator makes one at a time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use allocforge_core::{AllocationProblem, Task};
use smallvec::SmallVec;

/// A task, or a merged co-run group, placed as one decision.
///
/// Members are sorted by task ID. Skills are the union of the members'
/// requirements and the duration is their sum.
#[derive(Debug, Clone)]
pub struct AllocationUnit<'a> {
    members: SmallVec<[&'a Task; 4]>,
    required_skills: BTreeSet<String>,
    duration: u64,
    co_run: bool,
}

impl<'a> AllocationUnit<'a> {
    /// A unit holding a single task.
    pub fn single(task: &'a Task) -> Self {
        Self {
            members: SmallVec::from_elem(task, 1),
            required_skills: task.required_skills.clone(),
            duration: u64::from(task.duration),
            co_run: false,
        }
    }

    /// A co-run unit over `tasks`.
    pub fn co_run(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut members: SmallVec<[&'a Task; 4]> = tasks.into_iter().collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members.dedup_by(|a, b| a.id == b.id);

        let required_skills = members
            .iter()
            .flat_map(|t| t.required_skills.iter().cloned())
            .collect();
        let duration = members.iter().map(|t| u64::from(t.duration)).sum();

        Self {
            members,
            required_skills,
            duration,
            co_run: true,
        }
    }

    pub fn members(&self) -> &[&'a Task] {
        &self.members
    }

    pub fn required_skills(&self) -> &BTreeSet<String> {
        &self.required_skills
    }

    /// Summed duration of all members.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn is_co_run(&self) -> bool {
        self.co_run
    }

    /// Smallest member ID; units are processed in ascending order of this key.
    pub fn first_id(&self) -> &'a str {
        self.members.first().copied().map(|t| t.id.as_str()).unwrap_or("")
    }

    pub fn member_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().copied().map(|t| t.id.as_str())
    }

    /// Sum of member priorities (duration when no explicit priority is set).
    pub fn priority_sum(&self) -> u64 {
        self.members.iter().map(|t| u64::from(t.priority_value())).sum()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Display for AllocationUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.co_run {
            return f.write_str(self.first_id());
        }
        f.write_str("[")?;
        for (i, id) in self.member_ids().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(id)?;
        }
        f.write_str("]")
    }
}

/// Groups the problem's tasks into units, ordered by smallest member ID.
///
/// Tasks named by a co-run rule join that rule's merged group; every other
/// task forms a singleton.
///
/// # Examples
///
/// ```
/// use allocforge_core::{AllocationProblem, PrioritizationPolicy, Rule, Task};
/// use allocforge_solver::build_units;
///
/// let problem = AllocationProblem::new(
///     vec![Task::new("T3", 1), Task::new("T2", 1), Task::new("T1", 1)],
///     vec![],
///     vec![Rule::co_run(["T3", "T1"]).unwrap()],
///     PrioritizationPolicy::default(),
/// )
/// .unwrap();
///
/// let units = build_units(&problem);
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[0].to_string(), "[T1, T3]");
/// assert_eq!(units[1].to_string(), "T2");
/// ```
pub fn build_units(problem: &AllocationProblem) -> Vec<AllocationUnit<'_>> {
    let by_id: BTreeMap<&str, &Task> = problem
        .tasks()
        .iter()
        .map(|t| (t.id.as_str(), t))
        .collect();

    let mut grouped: BTreeSet<&str> = BTreeSet::new();
    let mut units = Vec::with_capacity(problem.tasks().len());

    for group in problem.rules().co_run_groups() {
        let members: Vec<&Task> = group
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();
        if members.is_empty() {
            continue;
        }
        grouped.extend(members.iter().map(|t| t.id.as_str()));
        units.push(AllocationUnit::co_run(members));
    }

    units.extend(
        problem
            .tasks()
            .iter()
            .filter(|t| !grouped.contains(t.id.as_str()))
            .map(AllocationUnit::single),
    );

    units.sort_by(|a, b| a.first_id().cmp(b.first_id()));
    units
}
