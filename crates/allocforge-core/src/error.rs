//! Error types for AllocForge

use thiserror::Error;

use crate::rule::InvalidRuleError;

/// Structural errors that abort an allocation run before any assignment.
///
/// Per-task failures (no eligible worker, exhausted limits) are never
/// reported through this type; they end up in the outcome's unassigned list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocForgeError {
    /// A rule failed validation against the task and worker sets.
    #[error("Invalid rule #{index}: {source}")]
    InvalidRule {
        /// Position of the rule in the submitted rule list.
        index: usize,
        #[source]
        source: InvalidRuleError,
    },

    /// Two tasks share the same identifier.
    #[error("Duplicate task identifier: {0}")]
    DuplicateTask(String),

    /// Two workers share the same identifier.
    #[error("Duplicate worker identifier: {0}")]
    DuplicateWorker(String),

    /// A task carries an attribute outside its domain.
    #[error("Invalid task {id}: {reason}")]
    InvalidTask { id: String, reason: String },

    /// A worker carries an attribute outside its domain.
    #[error("Invalid worker {id}: {reason}")]
    InvalidWorker { id: String, reason: String },
}

/// Result type alias for AllocForge operations
pub type Result<T> = std::result::Result<T, AllocForgeError>;
