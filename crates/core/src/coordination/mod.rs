// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives behind the workshop
//!
//! This module provides:
//! - **Semaphore / WaitCell** - uninterruptible blocking primitives
//! - **AdmissionThrottle** - bounds and orders in-flight enter actions
//! - **GateSet** - entry gate, work permit and move signal per workplace
//! - **TransitionState** - wait-for graph, waiting queues and rotations

pub mod admission;
pub mod gates;
pub mod semaphore;
pub mod transition;

pub use admission::{ActionKind, Admission, AdmissionStats, AdmissionThrottle};
pub use gates::{GateSet, WorkplaceGates};
pub use semaphore::{Semaphore, WaitCell};
pub use transition::{GateEffect, TransitionState, TransitionStats};
