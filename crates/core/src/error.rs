// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the workshop coordinator

use crate::workplace::WorkplaceId;
use thiserror::Error;

/// Errors surfaced at the workshop boundary.
///
/// Blocking waits never fail; these only report construction problems and
/// calls that name something the workshop does not know about.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkshopError {
    #[error("a workshop needs at least one workplace")]
    Empty,
    #[error("duplicate workplace: {0}")]
    DuplicateWorkplace(WorkplaceId),
    #[error("unknown workplace: {0}")]
    UnknownWorkplace(WorkplaceId),
    #[error("admission limit must be at least 1")]
    InvalidAdmissionLimit,
    #[error("calling worker is not inside the workshop")]
    NotInside,
    #[error("handle for {0} is not the calling worker's current workplace")]
    StaleHandle(WorkplaceId),
}
