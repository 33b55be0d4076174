// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! workshop-core: deadlock-free coordination of workers over shared workplaces
//!
//! This crate provides:
//! - The `Workplace` capability and its identifiers
//! - Uninterruptible blocking primitives and an admission throttle
//! - A transition state machine that detects wait-for cycles and rotates them
//! - The `Workshop` coordinator with enter / switch_to / leave

pub mod config;
pub mod coordination;
pub mod error;
pub mod handle;
pub mod worker;
pub mod workplace;
pub mod workshop;

pub use config::WorkshopConfig;
pub use error::WorkshopError;
pub use handle::WorkplaceHandle;
pub use worker::WorkerId;
pub use workplace::{Workplace, WorkplaceId};
pub use workshop::{Workshop, WorkshopStats};
