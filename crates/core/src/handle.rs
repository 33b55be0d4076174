// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handle returned by enter and switch_to
//!
//! Executing through the handle runs the handoff protocol before the payload:
//! 1. release the work permit still held for the previous workplace, so its
//!    next occupant can start while this worker is still moving
//! 2. mark this worker's pending actions finished in the admission throttle
//! 3. acquire the work permit of the current workplace

use crate::error::WorkshopError;
use crate::worker::WorkerId;
use crate::workplace::{Workplace, WorkplaceId};
use crate::workshop::Workshop;

/// A workplace the calling worker has been granted
pub struct WorkplaceHandle<'w, W> {
    workshop: &'w Workshop<W>,
    wid: usize,
}

impl<'w, W: Workplace> WorkplaceHandle<'w, W> {
    pub(crate) fn new(workshop: &'w Workshop<W>, wid: usize) -> Self {
        Self { workshop, wid }
    }

    pub fn id(&self) -> &'w WorkplaceId {
        self.workshop.id_of(self.wid)
    }

    pub fn workplace(&self) -> &'w W {
        &self.workshop.workplaces[self.wid]
    }

    /// Run the workplace's payload on behalf of the calling worker.
    ///
    /// Fails without running anything if the calling worker is no longer at
    /// this workplace.
    pub fn execute(&self) -> Result<(), WorkshopError> {
        self.prepare()?;
        self.workplace().execute();
        Ok(())
    }

    fn prepare(&self) -> Result<(), WorkshopError> {
        let worker = WorkerId::current();
        let (release, finish, acquire) = {
            let mut workers = self.workshop.workers.lock();
            let Some(ctx) = workers.get_mut(&worker).filter(|ctx| ctx.current == self.wid) else {
                tracing::warn!(%worker, workplace = %self.id(), "execute on stale handle");
                return Err(WorkshopError::StaleHandle(self.id().clone()));
            };
            let held = ctx.held_permit.replace(self.wid);
            (
                held.filter(|&previous| previous != self.wid),
                std::mem::take(&mut ctx.unfinished_actions),
                held != Some(self.wid),
            )
        };

        let gates = &self.workshop.gates;
        if let Some(previous) = release {
            gates.get(previous).work.release();
            tracing::trace!(%worker, previous = %self.workshop.id_of(previous), "permit released");
        }
        for _ in 0..finish {
            self.workshop.throttle.mark_finished(worker);
        }
        if acquire {
            gates.get(self.wid).work.acquire();
            tracing::trace!(%worker, workplace = %self.id(), "permit acquired");
        }
        Ok(())
    }
}

impl<W: Workplace> std::fmt::Debug for WorkplaceHandle<'_, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkplaceHandle")
            .field("workplace", self.id())
            .finish()
    }
}
