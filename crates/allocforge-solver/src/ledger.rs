//! Worker load ledger.
//!
//! The ledger is the only mutable state of an allocation run. Load is packed
//! into each worker's available phases in ascending order, every phase
//! holding at most `max_load_per_phase` units, so a worker's phase occupancy
//! is fully determined by its total load.

use allocforge_core::Worker;

/// Per-run record of worker loads, indexed like the worker slice.
///
/// # Examples
///
/// ```
/// use allocforge_core::Worker;
/// use allocforge_solver::WorkerLedger;
///
/// let workers = vec![Worker::new("W1", [1, 2, 3], 2)];
/// let mut ledger = WorkerLedger::new(&workers);
///
/// assert_eq!(ledger.place(0, 3), vec![1, 2]);
/// assert_eq!(ledger.load(0), 3);
/// assert_eq!(ledger.free_slots(0), 1);
/// assert_eq!(ledger.place(0, 1), vec![2]);
/// ```
#[derive(Debug, Clone)]
pub struct WorkerLedger<'a> {
    workers: &'a [Worker],
    loads: Vec<u64>,
}

impl<'a> WorkerLedger<'a> {
    /// Creates an empty ledger for `workers`.
    pub fn new(workers: &'a [Worker]) -> Self {
        Self {
            workers,
            loads: vec![0; workers.len()],
        }
    }

    pub fn workers(&self) -> &'a [Worker] {
        self.workers
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Phase-units assigned to the worker so far.
    pub fn load(&self, worker_idx: usize) -> u64 {
        self.loads[worker_idx]
    }

    /// Phase-units the worker can still absorb.
    pub fn remaining_capacity(&self, worker_idx: usize) -> u64 {
        self.workers[worker_idx]
            .capacity()
            .saturating_sub(self.loads[worker_idx])
    }

    /// Returns true if `extra` more units can be packed into the worker's phases.
    pub fn fits(&self, worker_idx: usize, extra: u64) -> bool {
        self.loads[worker_idx] + extra <= self.workers[worker_idx].capacity()
    }

    /// Number of phases holding any load once `extra` more units are packed.
    pub fn occupied_slots_after(&self, worker_idx: usize, extra: u64) -> u64 {
        let per_phase = self.per_phase(worker_idx);
        (self.loads[worker_idx] + extra).div_ceil(per_phase)
    }

    /// Free phases once `extra` more units are packed.
    pub fn free_slots_after(&self, worker_idx: usize, extra: u64) -> u64 {
        let slots = self.workers[worker_idx].slot_count() as u64;
        slots.saturating_sub(self.occupied_slots_after(worker_idx, extra))
    }

    /// Free phases at the current load.
    pub fn free_slots(&self, worker_idx: usize) -> u64 {
        self.free_slots_after(worker_idx, 0)
    }

    /// Load held in each available phase, ascending by phase.
    pub fn phase_loads(&self, worker_idx: usize) -> Vec<(u32, u64)> {
        let per_phase = self.per_phase(worker_idx);
        let mut rest = self.loads[worker_idx];
        self.workers[worker_idx]
            .available_slots
            .iter()
            .map(|&slot| {
                let held = rest.min(per_phase);
                rest -= held;
                (slot, held)
            })
            .collect()
    }

    /// Packs `duration` units onto the worker and returns the phases they landed in.
    ///
    /// Callers check [`fits`](Self::fits) first; units beyond capacity are
    /// still counted as load but land in no phase.
    pub fn place(&mut self, worker_idx: usize, duration: u32) -> Vec<u32> {
        let per_phase = self.per_phase(worker_idx);
        let start = self.loads[worker_idx];
        let end = start + u64::from(duration);
        debug_assert!(
            end <= self.workers[worker_idx].capacity(),
            "placement exceeds capacity of {}",
            self.workers[worker_idx].id
        );
        self.loads[worker_idx] = end;

        if duration == 0 {
            return Vec::new();
        }
        let first = start / per_phase;
        let last = (end - 1) / per_phase;
        self.workers[worker_idx]
            .available_slots
            .iter()
            .skip(first as usize)
            .take((last - first + 1) as usize)
            .copied()
            .collect()
    }

    /// Total load across all workers.
    pub fn total_load(&self) -> u64 {
        self.loads.iter().sum()
    }

    fn per_phase(&self, worker_idx: usize) -> u64 {
        u64::from(self.workers[worker_idx].max_load_per_phase).max(1)
    }
}
