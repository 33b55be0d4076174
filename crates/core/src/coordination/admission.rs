// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission throttle
//!
//! Every enter and switch registers an action in a global FIFO sequence.
//! Actions are marked finished by the execution wrapper and drained from the
//! head while contiguous entries are finished. Enter actions behind the head
//! are counted; once that count exceeds the limit, new entrants park on a
//! private wait cell and are released in sequence order as the count drains.
//!
//! The head of the sequence is exempt from the count, so at most `limit + 1`
//! enters are granted and unfinished at any time.

use super::semaphore::WaitCell;
use crate::worker::WorkerId;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Kind of action registered in the global sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Entry into the workshop; subject to the admission limit
    Enter,
    /// Completion marker for a switch; never parks
    Switch,
}

#[derive(Clone, Copy, Debug)]
struct Action {
    worker: WorkerId,
    kind: ActionKind,
}

/// Outcome of registering an action
#[derive(Debug)]
pub enum Admission {
    Granted,
    Parked(Arc<WaitCell>),
}

impl Admission {
    /// Block until the action is admitted
    pub fn wait(self) {
        if let Admission::Parked(cell) = self {
            cell.wait();
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Admission::Granted)
    }
}

#[derive(Debug, Default)]
struct ThrottleState {
    actions: VecDeque<Action>,
    /// Finished-but-not-drained action count per worker
    finished: HashMap<WorkerId, usize>,
    /// Enter actions in the sequence, not counting the head
    enters: usize,
    parked: VecDeque<Arc<WaitCell>>,
}

/// Point-in-time view of the throttle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionStats {
    /// Enters counted behind the head of the sequence that are not parked.
    /// An enter at the head itself is not included.
    pub admitted_enters: usize,
    pub parked_enters: usize,
    pub pending_actions: usize,
}

/// Bounds and orders concurrently in-flight enter actions
#[derive(Debug)]
pub struct AdmissionThrottle {
    limit: usize,
    state: Mutex<ThrottleState>,
}

impl AdmissionThrottle {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            state: Mutex::new(ThrottleState::default()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Register an action without blocking
    pub fn admit(&self, worker: WorkerId, kind: ActionKind) -> Admission {
        let mut state = self.state.lock();

        if kind == ActionKind::Enter && !state.actions.is_empty() {
            state.enters += 1;
        }
        state.actions.push_back(Action { worker, kind });

        if kind == ActionKind::Enter && state.enters > self.limit {
            let cell = Arc::new(WaitCell::new());
            state.parked.push_back(Arc::clone(&cell));
            tracing::trace!(%worker, enters = state.enters, "admission parked");
            Admission::Parked(cell)
        } else {
            tracing::trace!(%worker, ?kind, enters = state.enters, "action registered");
            Admission::Granted
        }
    }

    /// Register an action, parking until it is admitted
    pub fn register(&self, worker: WorkerId, kind: ActionKind) {
        self.admit(worker, kind).wait();
    }

    /// Mark the worker's oldest outstanding action finished.
    ///
    /// Only the worker owning the head of the sequence drains it; everyone
    /// else just records completion for a later drain.
    pub fn mark_finished(&self, worker: WorkerId) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        *state.finished.entry(worker).or_insert(0) += 1;
        let head_uncounted = match state.actions.front() {
            Some(head) if head.worker == worker => usize::from(head.kind == ActionKind::Enter),
            _ => return,
        };

        let mut drained_enters = 0;
        while let Some(&head) = state.actions.front() {
            let Some(count) = state.finished.get_mut(&head.worker) else {
                break;
            };
            *count -= 1;
            if *count == 0 {
                state.finished.remove(&head.worker);
            }
            if head.kind == ActionKind::Enter {
                drained_enters += 1;
            }
            state.actions.pop_front();
        }

        let new_head_uncounted = state
            .actions
            .front()
            .map_or(0, |head| usize::from(head.kind == ActionKind::Enter));

        let released = (drained_enters + new_head_uncounted).saturating_sub(head_uncounted);
        state.enters = state.enters.saturating_sub(released);

        let mut woken = 0;
        while woken < released {
            let Some(cell) = state.parked.pop_front() else {
                break;
            };
            cell.release();
            woken += 1;
        }

        tracing::trace!(
            %worker,
            released,
            woken,
            pending = state.actions.len(),
            "action sequence drained"
        );
    }

    pub fn stats(&self) -> AdmissionStats {
        let state = self.state.lock();
        AdmissionStats {
            admitted_enters: state.enters.saturating_sub(state.parked.len()),
            parked_enters: state.parked.len(),
            pending_actions: state.actions.len(),
        }
    }
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
