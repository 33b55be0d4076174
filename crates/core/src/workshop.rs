// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workshop coordinator
//!
//! Locking discipline:
//! - `transitions` (the transition lock) guards the wait-for graph, waiting
//!   queues and rotation marks. Gate signals are applied while it is held.
//!   It is never held while parking on a move signal, an entry gate, a work
//!   permit or the admission throttle.
//! - The throttle and the worker table each sit behind their own short-lived
//!   lock and are never held across a blocking wait.

use crate::config::WorkshopConfig;
use crate::coordination::{ActionKind, AdmissionThrottle, GateSet, TransitionState};
use crate::error::WorkshopError;
use crate::handle::WorkplaceHandle;
use crate::worker::WorkerId;
use crate::workplace::{Workplace, WorkplaceId};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Per-worker bookkeeping, created on enter and dropped on leave
#[derive(Clone, Copy, Debug)]
pub(crate) struct WorkerContext {
    pub current: usize,
    /// Workplace whose work permit this worker still holds
    pub held_permit: Option<usize>,
    /// Enter/switch actions not yet marked finished in the throttle
    pub unfinished_actions: usize,
}

/// Point-in-time view of the workshop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkshopStats {
    pub workplaces: usize,
    pub workers_inside: usize,
    /// Workplaces whose entry gate is held
    pub occupied: usize,
    pub admission_limit: usize,
    /// Enters counted behind the head of the action sequence and not parked;
    /// never exceeds `admission_limit`
    pub admitted_enters: usize,
    pub parked_enters: usize,
    pub pending_actions: usize,
    pub waiting_moves: usize,
    pub rotations: u64,
    pub direct_handoffs: u64,
    pub gate_releases: u64,
}

/// Coordinates workers over a fixed set of mutually exclusive workplaces
pub struct Workshop<W> {
    pub(crate) workplaces: Vec<W>,
    index: BTreeMap<WorkplaceId, usize>,
    pub(crate) gates: GateSet,
    transitions: Mutex<TransitionState>,
    pub(crate) throttle: AdmissionThrottle,
    pub(crate) workers: Mutex<HashMap<WorkerId, WorkerContext>>,
}

impl<W: Workplace> Workshop<W> {
    pub fn new(workplaces: impl IntoIterator<Item = W>) -> Result<Self, WorkshopError> {
        Self::with_config(workplaces, WorkshopConfig::default())
    }

    pub fn with_config(
        workplaces: impl IntoIterator<Item = W>,
        config: WorkshopConfig,
    ) -> Result<Self, WorkshopError> {
        let mut workplaces: Vec<W> = workplaces.into_iter().collect();
        if workplaces.is_empty() {
            return Err(WorkshopError::Empty);
        }
        workplaces.sort_by(|a, b| a.id().cmp(b.id()));

        let mut index = BTreeMap::new();
        for (wid, workplace) in workplaces.iter().enumerate() {
            if index.insert(workplace.id().clone(), wid).is_some() {
                return Err(WorkshopError::DuplicateWorkplace(workplace.id().clone()));
            }
        }

        let limit = config.admission_limit_for(workplaces.len())?;
        tracing::debug!(workplaces = workplaces.len(), limit, "workshop opened");

        Ok(Self {
            gates: GateSet::new(workplaces.len()),
            transitions: Mutex::new(TransitionState::new(workplaces.len())),
            throttle: AdmissionThrottle::new(limit),
            workers: Mutex::new(HashMap::new()),
            workplaces,
            index,
        })
    }

    /// Enter the workshop at `id`, blocking until admitted and the workplace
    /// is free
    pub fn enter(&self, id: &WorkplaceId) -> Result<WorkplaceHandle<'_, W>, WorkshopError> {
        let wid = self.index_of(id)?;
        let worker = WorkerId::current();

        self.throttle.register(worker, ActionKind::Enter);
        self.gates.get(wid).entry.acquire();

        self.workers.lock().insert(
            worker,
            WorkerContext {
                current: wid,
                held_permit: None,
                unfinished_actions: 1,
            },
        );
        tracing::debug!(%worker, workplace = %id, "entered");

        Ok(WorkplaceHandle::new(self, wid))
    }

    /// Move the calling worker to `id`, blocking until the move completes.
    ///
    /// A move that closes a cycle of waiting workers rotates the whole cycle
    /// at once and returns immediately.
    pub fn switch_to(&self, id: &WorkplaceId) -> Result<WorkplaceHandle<'_, W>, WorkshopError> {
        let target = self.index_of(id)?;
        let worker = WorkerId::current();
        let current = self
            .workers
            .lock()
            .get(&worker)
            .map(|ctx| ctx.current)
            .ok_or(WorkshopError::NotInside)?;

        self.throttle.register(worker, ActionKind::Switch);

        let mut state = self.transitions.lock();
        if let Some(len) = state.cycle_len(target, current) {
            for effect in state.rotate(target, len) {
                self.gates.apply(effect);
            }
            tracing::debug!(%worker, to = %id, cycle = len + 1, "rotated");
        } else {
            if !self.gates.get(target).entry.try_acquire() {
                state.wait_for(current, target);
                drop(state);
                tracing::debug!(%worker, to = %id, "waiting to move");

                self.gates.get(current).moved.acquire();

                state = self.transitions.lock();
                state.stop_waiting(current);
            }
            // A rotation refills the vacated workplace itself
            if !state.take_rotated(current) {
                self.gates.apply(state.handoff(current));
            }
            tracing::debug!(%worker, to = %id, "moved");
        }
        drop(state);

        if let Some(ctx) = self.workers.lock().get_mut(&worker) {
            ctx.current = target;
            ctx.unfinished_actions += 1;
        }

        Ok(WorkplaceHandle::new(self, target))
    }

    /// Leave the workshop, handing the current workplace to its successor
    pub fn leave(&self) -> Result<(), WorkshopError> {
        let worker = WorkerId::current();
        let ctx = self
            .workers
            .lock()
            .remove(&worker)
            .ok_or(WorkshopError::NotInside)?;

        {
            let mut state = self.transitions.lock();
            self.gates.apply(state.handoff(ctx.current));
        }
        for _ in 0..ctx.unfinished_actions {
            self.throttle.mark_finished(worker);
        }
        if let Some(held) = ctx.held_permit {
            self.gates.get(held).work.release();
        }

        tracing::debug!(%worker, workplace = %self.id_of(ctx.current), "left");
        Ok(())
    }

    /// Workplace the calling worker currently occupies
    pub fn current_workplace(&self) -> Option<&WorkplaceId> {
        let worker = WorkerId::current();
        let current = self.workers.lock().get(&worker)?.current;
        Some(self.id_of(current))
    }

    pub fn workplace(&self, id: &WorkplaceId) -> Option<&W> {
        self.index.get(id).map(|&wid| &self.workplaces[wid])
    }

    /// Workplace ids in their total order
    pub fn workplace_ids(&self) -> impl Iterator<Item = &WorkplaceId> {
        self.index.keys()
    }

    pub fn len(&self) -> usize {
        self.workplaces.len()
    }

    /// Always false: construction rejects an empty set. Present to pair
    /// with `len`.
    pub fn is_empty(&self) -> bool {
        self.workplaces.is_empty()
    }

    pub fn admission_limit(&self) -> usize {
        self.throttle.limit()
    }

    pub fn stats(&self) -> WorkshopStats {
        let admission = self.throttle.stats();
        let transitions = self.transitions.lock().stats();
        WorkshopStats {
            workplaces: self.workplaces.len(),
            workers_inside: self.workers.lock().len(),
            occupied: self.gates.occupied(),
            admission_limit: self.throttle.limit(),
            admitted_enters: admission.admitted_enters,
            parked_enters: admission.parked_enters,
            pending_actions: admission.pending_actions,
            waiting_moves: transitions.waiting_moves,
            rotations: transitions.rotations,
            direct_handoffs: transitions.direct_handoffs,
            gate_releases: transitions.gate_releases,
        }
    }

    fn index_of(&self, id: &WorkplaceId) -> Result<usize, WorkshopError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| WorkshopError::UnknownWorkplace(id.clone()))
    }

    pub(crate) fn id_of(&self, wid: usize) -> &WorkplaceId {
        self.workplaces[wid].id()
    }
}

#[cfg(test)]
#[path = "workshop_tests.rs"]
mod tests;
