//! Row validation and ingest of decoded spreadsheet records
//!
//! Records are maps from column name to cell text, as produced by whatever
//! decoded the uploaded sheet. Each sheet kind has a schema of required
//! columns and numeric domains. Rows with errors are reported and left out;
//! clean rows are converted into typed values.
//!
//! # Examples
//!
//! ```
//! use allocforge_core::ingest::{ingest_tasks, Record};
//!
//! let rows: Vec<Record> = vec![
//!     [("TaskID", "T1"), ("TaskName", "Report"), ("Duration", "2"), ("RequiredSkills", "Java, SQL")]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect(),
//!     [("TaskID", "T2"), ("TaskName", ""), ("Duration", "x"), ("RequiredSkills", "SQL")]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect(),
//! ];
//!
//! let ingested = ingest_tasks(&rows);
//! assert_eq!(ingested.items.len(), 1);
//! assert_eq!(ingested.rejected[0].row_index, 1);
//! assert_eq!(
//!     ingested.rejected[0].errors,
//!     vec!["Missing TaskName", "Duration must be a positive integer"]
//! );
//! ```

mod parse;


use std::collections::BTreeMap;

use crate::domain::{Task, Worker};

pub use parse::{parse_list, parse_positive};

/// One decoded row: column name to cell text.
pub type Record = BTreeMap<String, String>;

/// Errors found in one row. Only rows with at least one error are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RowValidation {
    pub row_index: usize,
    pub errors: Vec<String>,
}

/// The sheets the upload form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Clients,
    Tasks,
    Workers,
}

/// Lowest accepted `PriorityLevel`.
pub const MIN_PRIORITY_LEVEL: u32 = 1;
/// Highest accepted `PriorityLevel`.
pub const MAX_PRIORITY_LEVEL: u32 = 5;

impl SheetKind {
    /// Columns that must be present and non-blank.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Clients => &["ClientID", "ClientName", "PriorityLevel"],
            SheetKind::Tasks => &["TaskID", "TaskName", "Duration", "RequiredSkills"],
            SheetKind::Workers => &[
                "WorkerID",
                "WorkerName",
                "Skills",
                "AvailableSlots",
                "MaxLoadPerPhase",
            ],
        }
    }

    /// Columns that, when present, must hold a positive integer.
    fn positive_fields(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Clients => &[],
            SheetKind::Tasks => &["Duration"],
            SheetKind::Workers => &["MaxLoadPerPhase"],
        }
    }
}

/// A validated client row.
///
/// Clients are ingested for reporting only; tasks take their priority from
/// their own `PriorityLevel` column, never from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Client {
    pub id: String,
    pub name: String,
    pub priority_level: u32,
}

/// Typed values from clean rows plus the reports of rejected rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested<T> {
    pub items: Vec<T>,
    pub rejected: Vec<RowValidation>,
}

/// Validates every row against the schema of `kind`.
///
/// Returns one entry per row that has errors; an empty result means every
/// row is clean.
pub fn validate_rows(rows: &[Record], kind: SheetKind) -> Vec<RowValidation> {
    rows.iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let errors = row_errors(row, kind);
            (!errors.is_empty()).then_some(RowValidation { row_index, errors })
        })
        .collect()
}

fn row_errors(row: &Record, kind: SheetKind) -> Vec<String> {
    let mut errors = Vec::new();

    for field in kind.required_fields() {
        if cell(row, field).is_none() {
            errors.push(format!("Missing {}", field));
        }
    }

    for field in kind.positive_fields() {
        if let Some(value) = cell(row, field) {
            if parse_positive(value).is_none() {
                errors.push(format!("{} must be a positive integer", field));
            }
        }
    }

    if let Some(value) = cell(row, "PriorityLevel") {
        match parse_positive(value) {
            Some(level) if (MIN_PRIORITY_LEVEL..=MAX_PRIORITY_LEVEL).contains(&level) => {}
            _ => errors.push(format!(
                "PriorityLevel must be between {} and {}",
                MIN_PRIORITY_LEVEL, MAX_PRIORITY_LEVEL
            )),
        }
    }

    if kind == SheetKind::Workers {
        if let Some(value) = cell(row, "AvailableSlots") {
            let slots = parse_list(value);
            if slots.is_empty() || slots.iter().any(|s| parse_positive(s).is_none()) {
                errors.push("AvailableSlots must be a list of positive integers".to_string());
            }
        }
    }

    errors
}

/// Trimmed, non-blank cell text.
fn cell<'a>(row: &'a Record, field: &str) -> Option<&'a str> {
    row.get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Group tag column, accepting the legacy `WorkerGroup` header for workers.
fn group_cell<'a>(row: &'a Record, kind: SheetKind) -> Option<&'a str> {
    cell(row, "GroupTag").or_else(|| match kind {
        SheetKind::Workers => cell(row, "WorkerGroup"),
        SheetKind::Tasks => cell(row, "TaskGroup"),
        SheetKind::Clients => None,
    })
}

fn ingest<T>(
    rows: &[Record],
    kind: SheetKind,
    convert: impl Fn(&Record) -> Option<T>,
) -> Ingested<T> {
    let rejected = validate_rows(rows, kind);
    let mut bad = rejected.iter().map(|r| r.row_index).peekable();

    let mut items = Vec::with_capacity(rows.len() - rejected.len());
    for (idx, row) in rows.iter().enumerate() {
        if bad.peek() == Some(&idx) {
            bad.next();
            continue;
        }
        if let Some(item) = convert(row) {
            items.push(item);
        }
    }

    Ingested { items, rejected }
}

/// Validates task rows and converts the clean ones.
pub fn ingest_tasks(rows: &[Record]) -> Ingested<Task> {
    ingest(rows, SheetKind::Tasks, |row| {
        let mut task = Task::new(cell(row, "TaskID")?, parse_positive(cell(row, "Duration")?)?)
            .with_skills(parse_list(cell(row, "RequiredSkills").unwrap_or_default()));
        task.priority = cell(row, "PriorityLevel").and_then(parse_positive);
        task.group = group_cell(row, SheetKind::Tasks).map(str::to_string);
        Some(task)
    })
}

/// Validates worker rows and converts the clean ones.
pub fn ingest_workers(rows: &[Record]) -> Ingested<Worker> {
    ingest(rows, SheetKind::Workers, |row| {
        let slots = parse_list(cell(row, "AvailableSlots")?)
            .into_iter()
            .map(|s| parse_positive(&s))
            .collect::<Option<Vec<u32>>>()?;
        let mut worker = Worker::new(
            cell(row, "WorkerID")?,
            slots,
            parse_positive(cell(row, "MaxLoadPerPhase")?)?,
        )
        .with_skills(parse_list(cell(row, "Skills")?));
        worker.group = group_cell(row, SheetKind::Workers).map(str::to_string);
        Some(worker)
    })
}

/// Validates client rows and converts the clean ones.
pub fn ingest_clients(rows: &[Record]) -> Ingested<Client> {
    ingest(rows, SheetKind::Clients, |row| {
        Some(Client {
            id: cell(row, "ClientID")?.to_string(),
            name: cell(row, "ClientName")?.to_string(),
            priority_level: parse_positive(cell(row, "PriorityLevel")?)?,
        })
    })
}
