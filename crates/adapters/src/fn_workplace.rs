// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Closure-backed workplace

use workshop_core::{Workplace, WorkplaceId};

type Payload = Box<dyn Fn() + Send + Sync>;

/// Workplace whose payload is an arbitrary closure
pub struct FnWorkplace {
    id: WorkplaceId,
    payload: Payload,
}

impl FnWorkplace {
    pub fn new(id: impl Into<WorkplaceId>, payload: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            id: id.into(),
            payload: Box::new(payload),
        }
    }

    /// Workplace whose payload does nothing
    pub fn idle(id: impl Into<WorkplaceId>) -> Self {
        Self::new(id, || {})
    }
}

impl Workplace for FnWorkplace {
    fn id(&self) -> &WorkplaceId {
        &self.id
    }

    fn execute(&self) {
        (self.payload)()
    }
}

impl std::fmt::Debug for FnWorkplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnWorkplace").field("id", &self.id).finish()
    }
}
