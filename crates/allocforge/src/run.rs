//! One-call allocation entry points.

use allocforge_config::{AllocatorConfig, RuleDocument};
use allocforge_core::ingest::{ingest_tasks, ingest_workers, Record, RowValidation};
use allocforge_core::{Result, Task, Worker};
use allocforge_solver::{AllocationOutcome, Allocator};

/// Configuration file read by [`run_allocation`].
pub const CONFIG_FILE: &str = "allocforge.toml";

/// Allocates with the configuration from `allocforge.toml`, or defaults when
/// the file is missing or unreadable.
pub fn run_allocation(
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    document: RuleDocument,
) -> Result<AllocationOutcome> {
    let config = AllocatorConfig::load(CONFIG_FILE).unwrap_or_default();
    run_allocation_with(tasks, workers, document, &config)
}

/// Allocates tasks to workers under the rules and weights of `document`.
pub fn run_allocation_with(
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    document: RuleDocument,
    config: &AllocatorConfig,
) -> Result<AllocationOutcome> {
    Allocator::with_config(config.clone()).solve(
        tasks,
        workers,
        document.rules,
        document.prioritization,
    )
}

/// Outcome of allocating decoded sheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAllocation {
    pub outcome: AllocationOutcome,
    /// Task rows left out, with their errors.
    pub rejected_tasks: Vec<RowValidation>,
    /// Worker rows left out, with their errors.
    pub rejected_workers: Vec<RowValidation>,
}

/// Validates task and worker rows, then allocates the clean ones.
///
/// Rows with errors are reported and excluded; they never fail the run.
///
/// # Examples
///
/// ```
/// use allocforge::ingest::Record;
/// use allocforge::{allocate_records, AllocatorConfig, RuleDocument};
///
/// fn row(cells: &[(&str, &str)]) -> Record {
///     cells.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
/// }
///
/// let tasks = vec![
///     row(&[("TaskID", "T1"), ("TaskName", "Report"), ("Duration", "1"), ("RequiredSkills", "SQL")]),
///     row(&[("TaskID", "T2"), ("TaskName", "Audit"), ("Duration", "0"), ("RequiredSkills", "SQL")]),
/// ];
/// let workers = vec![row(&[
///     ("WorkerID", "W1"),
///     ("WorkerName", "Ada"),
///     ("Skills", "SQL"),
///     ("AvailableSlots", "[1,2]"),
///     ("MaxLoadPerPhase", "1"),
/// ])];
///
/// let result = allocate_records(&tasks, &workers, RuleDocument::default(), &AllocatorConfig::default())
///     .unwrap();
/// assert_eq!(result.outcome.assignments.len(), 1);
/// assert_eq!(result.rejected_tasks[0].row_index, 1);
/// ```
pub fn allocate_records(
    task_rows: &[Record],
    worker_rows: &[Record],
    document: RuleDocument,
    config: &AllocatorConfig,
) -> Result<RecordAllocation> {
    let tasks = ingest_tasks(task_rows);
    let workers = ingest_workers(worker_rows);

    let outcome = run_allocation_with(tasks.items, workers.items, document, config)?;

    Ok(RecordAllocation {
        outcome,
        rejected_tasks: tasks.rejected,
        rejected_workers: workers.rejected,
    })
}
