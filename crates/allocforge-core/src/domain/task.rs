//! Task - a unit of work waiting for a worker.

use std::collections::BTreeSet;

use crate::error::{AllocForgeError, Result};

/// A task submitted to an allocation run.
///
/// # Examples
///
/// ```
/// use allocforge_core::Task;
///
/// let task = Task::new("T1", 2).with_skills(["Java", "SQL"]);
/// assert_eq!(task.duration, 2);
/// assert!(task.required_skills.contains("Java"));
/// assert_eq!(task.priority_value(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Task {
    /// Unique identifier.
    pub id: String,
    /// Length in phase-units.
    pub duration: u32,
    /// Skills a worker must hold to take this task.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_skills: BTreeSet<String>,
    /// Explicit priority, overriding duration in the priority term.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub priority: Option<u32>,
    /// Optional group tag.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub group: Option<String>,
}

impl Task {
    /// Creates a task with no skill requirements.
    pub fn new(id: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            duration,
            required_skills: BTreeSet::new(),
            priority: None,
            group: None,
        }
    }

    /// Adds required skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills
            .extend(skills.into_iter().map(Into::into));
        self
    }

    /// Sets an explicit priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The value fed into the priority term: explicit priority, else duration.
    #[inline]
    pub fn priority_value(&self) -> u32 {
        self.priority.unwrap_or(self.duration)
    }

    /// Checks attribute domains.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AllocForgeError::InvalidTask {
                id: self.id.clone(),
                reason: "identifier is blank".to_string(),
            });
        }
        if self.duration == 0 {
            return Err(AllocForgeError::InvalidTask {
                id: self.id.clone(),
                reason: "duration must be positive".to_string(),
            });
        }
        if self.priority == Some(0) {
            return Err(AllocForgeError::InvalidTask {
                id: self.id.clone(),
                reason: "priority must be positive".to_string(),
            });
        }
        Ok(())
    }
}
