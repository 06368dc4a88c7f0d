//! Domain model for allocation runs
//!
//! - `Task`: a unit of work with duration and required skills
//! - `Worker`: a resource with skills, phase slots and per-phase load
//! - `AllocationProblem`: the validated combination of tasks, workers, rules
//!   and policy handed to the allocator

mod problem;
mod task;
mod worker;

pub use problem::AllocationProblem;
pub use task::Task;
pub use worker::Worker;
