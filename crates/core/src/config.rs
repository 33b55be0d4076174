// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workshop configuration

use crate::error::WorkshopError;
use serde::{Deserialize, Serialize};

/// Workshop configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopConfig {
    /// Maximum number of enter actions admitted but not yet finished.
    /// `None` uses `2N - 1` for N workplaces.
    #[serde(default)]
    pub admission_limit: Option<usize>,
}

impl WorkshopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admission_limit(mut self, limit: usize) -> Self {
        self.admission_limit = Some(limit);
        self
    }

    /// Default bound for a workshop of `workplaces` workplaces
    pub fn default_admission_limit(workplaces: usize) -> usize {
        (2 * workplaces).saturating_sub(1)
    }

    /// Resolve the admission limit for a workshop of `workplaces` workplaces
    pub fn admission_limit_for(&self, workplaces: usize) -> Result<usize, WorkshopError> {
        match self.admission_limit {
            Some(0) => Err(WorkshopError::InvalidAdmissionLimit),
            Some(limit) => Ok(limit),
            None => Ok(Self::default_admission_limit(workplaces)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
