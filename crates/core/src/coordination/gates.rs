// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-workplace gates

use super::semaphore::Semaphore;
use super::transition::GateEffect;

/// Synchronization objects owned by one workplace
#[derive(Debug)]
pub struct WorkplaceGates {
    /// Occupancy; parked claimants are served in arrival order
    pub entry: Semaphore,
    /// Guards the actual execution of the workplace's payload
    pub work: Semaphore,
    /// Wakes the occupant parked waiting to move out
    pub moved: Semaphore,
}

impl WorkplaceGates {
    pub fn new() -> Self {
        Self {
            entry: Semaphore::new(1),
            work: Semaphore::new(1),
            moved: Semaphore::new(0),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.entry.available() == 0
    }
}

impl Default for WorkplaceGates {
    fn default() -> Self {
        Self::new()
    }
}

/// Gates for every workplace, indexed densely
#[derive(Debug)]
pub struct GateSet {
    gates: Vec<WorkplaceGates>,
}

impl GateSet {
    pub fn new(workplaces: usize) -> Self {
        Self {
            gates: (0..workplaces).map(|_| WorkplaceGates::new()).collect(),
        }
    }

    pub fn get(&self, wid: usize) -> &WorkplaceGates {
        &self.gates[wid]
    }

    /// Apply a gate signal produced by the transition state machine
    pub fn apply(&self, effect: GateEffect) {
        match effect {
            GateEffect::ReleaseEntry(wid) => self.gates[wid].entry.release(),
            GateEffect::Wake(wid) => self.gates[wid].moved.release(),
        }
    }

    pub fn occupied(&self) -> usize {
        self.gates.iter().filter(|g| g.is_occupied()).count()
    }
}
