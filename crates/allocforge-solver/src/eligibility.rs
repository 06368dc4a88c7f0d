//! Staged eligibility filtering.
//!
//! Workers are filtered for a unit in four stages: skills, capacity, slot
//! floor, load ceiling. The report keeps the survivors in worker input order
//! and remembers which stage emptied the set, which determines the reason
//! reported for unassigned tasks.

use std::fmt;

use allocforge_core::RuleSet;

use crate::ledger::WorkerLedger;
use crate::outcome::UnassignedReason;
use crate::unit::AllocationUnit;

/// A hard filter applied to the candidate workers of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// Worker holds every required skill.
    Skills,
    /// Load plus unit duration fits the worker's phases.
    Capacity,
    /// Free slots after placement stay at or above the group floor.
    SlotFloor,
    /// Load plus unit duration stays at or below the group ceiling.
    LoadCeiling,
}

impl FilterStage {
    /// All stages, in application order.
    pub const ALL: [FilterStage; 4] = [
        FilterStage::Skills,
        FilterStage::Capacity,
        FilterStage::SlotFloor,
        FilterStage::LoadCeiling,
    ];

    /// Reason reported when this stage leaves a single task without candidates.
    pub fn reason(&self) -> UnassignedReason {
        match self {
            FilterStage::Skills => UnassignedReason::NoEligibleWorker,
            FilterStage::Capacity => UnassignedReason::InsufficientCapacity,
            FilterStage::SlotFloor => UnassignedReason::SlotRestrictionViolated,
            FilterStage::LoadCeiling => UnassignedReason::LoadLimitExceeded,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterStage::Skills => "skills",
            FilterStage::Capacity => "capacity",
            FilterStage::SlotFloor => "slot floor",
            FilterStage::LoadCeiling => "load ceiling",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Eligible workers for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityReport {
    /// Indices of eligible workers, in input order.
    pub eligible: Vec<usize>,
    /// Stage that removed the last candidate, if the set ended up empty.
    pub emptied_at: Option<FilterStage>,
}

impl EligibilityReport {
    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    /// Reason to report for a unit left without candidates.
    pub fn reason(&self, unit: &AllocationUnit<'_>) -> Option<UnassignedReason> {
        if !self.eligible.is_empty() {
            return None;
        }
        if unit.is_co_run() {
            return Some(UnassignedReason::CoRunUnsatisfiable);
        }
        Some(
            self.emptied_at
                .unwrap_or(FilterStage::Skills)
                .reason(),
        )
    }
}

/// Filters the ledger's workers for `unit` against the current loads.
///
/// An empty worker pool reports as emptied at [`FilterStage::Skills`].
pub fn filter_workers(
    unit: &AllocationUnit<'_>,
    rules: &RuleSet,
    ledger: &WorkerLedger<'_>,
) -> EligibilityReport {
    let workers = ledger.workers();
    let duration = unit.duration();
    let mut eligible: Vec<usize> = (0..workers.len()).collect();

    for stage in FilterStage::ALL {
        eligible.retain(|&idx| {
            let worker = &workers[idx];
            match stage {
                FilterStage::Skills => worker.has_all_skills(unit.required_skills()),
                FilterStage::Capacity => ledger.fits(idx, duration),
                FilterStage::SlotFloor => rules.slot_floor(worker).map_or(true, |floor| {
                    ledger.free_slots_after(idx, duration) >= floor
                }),
                FilterStage::LoadCeiling => rules
                    .load_ceiling(worker)
                    .map_or(true, |ceiling| ledger.load(idx) + duration <= ceiling),
            }
        });
        if eligible.is_empty() {
            return EligibilityReport {
                eligible,
                emptied_at: Some(stage),
            };
        }
    }

    EligibilityReport {
        eligible,
        emptied_at: None,
    }
}
