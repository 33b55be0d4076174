// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker identity

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WORKER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT_WORKER: WorkerId = WorkerId(NEXT_WORKER.fetch_add(1, Ordering::Relaxed));
}

/// Identifies the thread driving a worker through the workshop.
///
/// Every thread gets a distinct id on first use; ids are never reused within
/// a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub u64);

impl WorkerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Id of the calling thread
    pub fn current() -> Self {
        CURRENT_WORKER.with(|id| *id)
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}
