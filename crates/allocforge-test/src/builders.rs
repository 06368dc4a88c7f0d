//! Terse constructors for tasks and workers.
//!
//! # Example
//!
//! ```
//! use allocforge_test::builders::{task, worker};
//!
//! let t = task("T1", 2, &["Java"]);
//! let w = worker("W1", &["Java", "SQL"], &[1, 2], 2);
//! assert!(w.has_all_skills(&t.required_skills));
//! ```

use allocforge_core::{Task, Worker};

/// Creates a task with the given required skills.
pub fn task(id: &str, duration: u32, skills: &[&str]) -> Task {
    Task::new(id, duration).with_skills(skills.iter().copied())
}

/// Creates a worker with the given skills, slots and per-phase load.
pub fn worker(id: &str, skills: &[&str], slots: &[u32], max_load_per_phase: u32) -> Worker {
    Worker::new(id, slots.iter().copied(), max_load_per_phase).with_skills(skills.iter().copied())
}

/// Creates a worker tagged with `group`.
pub fn grouped_worker(
    id: &str,
    group: &str,
    skills: &[&str],
    slots: &[u32],
    max_load_per_phase: u32,
) -> Worker {
    worker(id, skills, slots, max_load_per_phase).with_group(group)
}
