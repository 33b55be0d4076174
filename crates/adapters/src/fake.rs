// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake workplace for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use workshop_core::{WorkerId, Workplace, WorkplaceId};

type Hook = Arc<dyn Fn(ExecuteCall) + Send + Sync>;

/// Recorded execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteCall {
    pub worker: WorkerId,
    /// Start order at this workplace, from zero
    pub seq: usize,
}

#[derive(Default)]
struct FakeState {
    calls: Mutex<Vec<ExecuteCall>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    overlaps: AtomicUsize,
}

/// Fake workplace that records executions and detects overlapping ones.
///
/// Clones share their recordings.
#[derive(Clone)]
pub struct FakeWorkplace {
    id: WorkplaceId,
    hold: Option<Duration>,
    hook: Option<Hook>,
    state: Arc<FakeState>,
}

impl FakeWorkplace {
    pub fn new(id: impl Into<WorkplaceId>) -> Self {
        Self {
            id: id.into(),
            hold: None,
            hook: None,
            state: Arc::default(),
        }
    }

    /// Keep each execution busy for `hold`
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    /// Run `hook` inside each execution, after it is recorded
    pub fn with_hook(mut self, hook: impl Fn(ExecuteCall) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Get all recorded executions in start order
    pub fn calls(&self) -> Vec<ExecuteCall> {
        self.state.calls.lock().clone()
    }

    pub fn runs(&self) -> usize {
        self.state.calls.lock().len()
    }

    /// Executions that started while another was still running
    pub fn overlaps(&self) -> usize {
        self.state.overlaps.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously running executions seen
    pub fn max_active(&self) -> usize {
        self.state.max_active.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst) > 0
    }
}

impl Workplace for FakeWorkplace {
    fn id(&self) -> &WorkplaceId {
        &self.id
    }

    fn execute(&self) {
        let worker = WorkerId::current();
        let active = self.state.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_active.fetch_max(active, Ordering::SeqCst);
        if active > 1 {
            self.state.overlaps.fetch_add(1, Ordering::SeqCst);
            tracing::error!(workplace = %self.id, %worker, active, "overlapping execution");
        }
        let call = {
            let mut calls = self.state.calls.lock();
            let call = ExecuteCall {
                worker,
                seq: calls.len(),
            };
            calls.push(call);
            call
        };

        if let Some(hook) = &self.hook {
            hook(call);
        }
        if let Some(hold) = self.hold {
            std::thread::sleep(hold);
        }

        self.state.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FakeWorkplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeWorkplace")
            .field("id", &self.id)
            .field("runs", &self.runs())
            .finish()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
