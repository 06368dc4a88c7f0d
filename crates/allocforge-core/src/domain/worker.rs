//! Worker - a resource with skills and phase availability.

use std::collections::BTreeSet;

use crate::error::{AllocForgeError, Result};

/// A worker that can take tasks during its available phases.
///
/// Capacity is `available_slots.len() * max_load_per_phase` phase-units.
///
/// # Examples
///
/// ```
/// use allocforge_core::Worker;
///
/// let worker = Worker::new("W1", [1, 2], 2).with_skills(["Java", "SQL"]);
/// assert_eq!(worker.capacity(), 4);
/// assert!(worker.has_skill("SQL"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Worker {
    /// Unique identifier.
    pub id: String,
    /// Skills held.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: BTreeSet<String>,
    /// Phases in which the worker accepts work, ascending.
    pub available_slots: BTreeSet<u32>,
    /// Phase-units the worker can absorb in a single phase.
    pub max_load_per_phase: u32,
    /// Group tag referenced by slot and load rules.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub group: Option<String>,
}

impl Worker {
    /// Creates a worker without skills or group.
    pub fn new(
        id: impl Into<String>,
        available_slots: impl IntoIterator<Item = u32>,
        max_load_per_phase: u32,
    ) -> Self {
        Self {
            id: id.into(),
            skills: BTreeSet::new(),
            available_slots: available_slots.into_iter().collect(),
            max_load_per_phase,
            group: None,
        }
    }

    /// Adds skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Total phase-units this worker can take in one run.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.available_slots.len() as u64 * u64::from(self.max_load_per_phase)
    }

    /// Number of phases the worker is available in.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.available_slots.len()
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Returns true if every required skill is held.
    pub fn has_all_skills(&self, required: &BTreeSet<String>) -> bool {
        required.is_subset(&self.skills)
    }

    /// Returns true if the worker's group tag equals `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.group.as_deref() == Some(group)
    }

    /// Checks attribute domains.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| AllocForgeError::InvalidWorker {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("identifier is blank"));
        }
        if self.max_load_per_phase == 0 {
            return Err(invalid("max load per phase must be at least 1"));
        }
        if self.available_slots.contains(&0) {
            return Err(invalid("phase slots must be positive"));
        }
        Ok(())
    }
}
