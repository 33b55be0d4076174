// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workplace capability supplied by callers

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unique, totally ordered identifier of a workplace
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkplaceId(pub String);

impl WorkplaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkplaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkplaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A place where at most one worker executes at a time.
///
/// `execute` is never invoked concurrently for the same workplace by the
/// workshop. It may run for any length of time and must not call back into
/// the workshop.
pub trait Workplace: Send + Sync {
    fn id(&self) -> &WorkplaceId;

    fn execute(&self);
}

impl<W: Workplace + ?Sized> Workplace for Arc<W> {
    fn id(&self) -> &WorkplaceId {
        (**self).id()
    }

    fn execute(&self) {
        (**self).execute()
    }
}

impl<W: Workplace + ?Sized> Workplace for Box<W> {
    fn id(&self) -> &WorkplaceId {
        (**self).id()
    }

    fn execute(&self) {
        (**self).execute()
    }
}

#[cfg(test)]
#[path = "workplace_tests.rs"]
mod tests;
