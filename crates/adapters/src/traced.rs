// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced workplace wrapper for consistent observability

use workshop_core::{WorkerId, Workplace, WorkplaceId};

/// Wrapper that adds tracing to any Workplace
#[derive(Clone, Debug)]
pub struct TracedWorkplace<W> {
    inner: W,
}

impl<W> TracedWorkplace<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Workplace> Workplace for TracedWorkplace<W> {
    fn id(&self) -> &WorkplaceId {
        self.inner.id()
    }

    fn execute(&self) {
        let span = tracing::info_span!(
            "workplace.execute",
            workplace = %self.inner.id(),
            worker = %WorkerId::current()
        );
        let _guard = span.enter();

        tracing::debug!("starting");
        let start = std::time::Instant::now();
        self.inner.execute();
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "finished");
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
