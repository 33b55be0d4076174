// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking primitives used by the coordinator
//!
//! - **WaitCell** - one-shot wake for a single parked thread
//! - **Semaphore** - counting semaphore with FIFO handoff to parked acquirers
//!
//! Neither primitive can be interrupted: a parked thread only resumes once
//! another participant releases it.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

/// A one-shot wake shared between a parked thread and its releaser.
///
/// Releasing before the owner starts waiting is remembered, so the wait
/// returns immediately.
#[derive(Debug, Default)]
pub struct WaitCell {
    released: Mutex<bool>,
    wake: Condvar,
}

impl WaitCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake the owner of this cell
    pub fn release(&self) {
        let mut released = self.released.lock();
        *released = true;
        self.wake.notify_one();
    }

    /// Park until released
    pub fn wait(&self) {
        let mut released = self.released.lock();
        while !*released {
            self.wake.wait(&mut released);
        }
    }

    pub fn is_released(&self) -> bool {
        *self.released.lock()
    }
}

#[derive(Debug, Default)]
struct SemaphoreState {
    permits: usize,
    /// Parked acquirers in arrival order. Non-empty only while `permits == 0`.
    waiters: VecDeque<Arc<WaitCell>>,
}

/// Counting semaphore that hands released permits to the oldest parked
/// acquirer.
///
/// A released permit never returns to the pool while someone is parked, so
/// `try_acquire` cannot overtake a blocked `acquire`.
#[derive(Debug, Default)]
pub struct Semaphore {
    state: Mutex<SemaphoreState>,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            state: Mutex::new(SemaphoreState {
                permits,
                waiters: VecDeque::new(),
            }),
        }
    }

    /// Take a permit, parking until one is handed over
    pub fn acquire(&self) {
        let cell = {
            let mut state = self.state.lock();
            if state.permits > 0 {
                state.permits -= 1;
                return;
            }
            let cell = Arc::new(WaitCell::new());
            state.waiters.push_back(Arc::clone(&cell));
            cell
        };
        cell.wait();
    }

    /// Take a permit only if one is free right now
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        if state.permits > 0 {
            state.permits -= 1;
            true
        } else {
            false
        }
    }

    /// Return a permit, handing it straight to the oldest parked acquirer
    pub fn release(&self) {
        let mut state = self.state.lock();
        match state.waiters.pop_front() {
            Some(cell) => cell.release(),
            None => state.permits += 1,
        }
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.state.lock().permits
    }

    /// Threads currently parked in `acquire`
    pub fn waiting(&self) -> usize {
        self.state.lock().waiters.len()
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
