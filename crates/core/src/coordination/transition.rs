// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition state machine
//!
//! Owns the wait-for graph, the per-workplace waiting queues and the
//! rotation bookkeeping. Workplaces are addressed by dense index. Every
//! method runs under the workshop's transition lock and reports the gate
//! signals it needs as [`GateEffect`]s for the caller to apply.

use serde::Serialize;
use std::collections::VecDeque;

/// Gate signal produced by a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEffect {
    /// Free the workplace's entry gate for the next direct claimant
    ReleaseEntry(usize),
    /// Wake the occupant of the workplace parked on its move signal
    Wake(usize),
}

/// Transition counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransitionStats {
    pub waiting_moves: usize,
    pub rotations: u64,
    pub direct_handoffs: u64,
    pub gate_releases: u64,
}

#[derive(Clone, Debug)]
pub struct TransitionState {
    /// Wait-for edge: occupant of `i` wants to move to `next[i]`
    next: Vec<Option<usize>>,
    /// Occupied workplaces whose occupants wait to move into `i`
    queues: Vec<VecDeque<usize>>,
    /// Workplaces vacated by a rotation rather than a handoff
    rotated: Vec<bool>,
    rotations: u64,
    direct_handoffs: u64,
    gate_releases: u64,
}

impl TransitionState {
    pub fn new(workplaces: usize) -> Self {
        Self {
            next: vec![None; workplaces],
            queues: vec![VecDeque::new(); workplaces],
            rotated: vec![false; workplaces],
            rotations: 0,
            direct_handoffs: 0,
            gate_releases: 0,
        }
    }

    pub fn next_of(&self, wid: usize) -> Option<usize> {
        self.next[wid]
    }

    pub fn queue(&self, wid: usize) -> impl Iterator<Item = usize> + '_ {
        self.queues[wid].iter().copied()
    }

    /// Follow wait-for edges from `target`.
    ///
    /// Returns the number of workplaces visited before reaching `current`
    /// when the walk closes a cycle, `None` when it runs off the graph.
    /// `target == current` is a cycle of length zero. The walk visits at most
    /// N workplaces and does not allocate.
    pub fn cycle_len(&self, target: usize, current: usize) -> Option<usize> {
        let mut at = target;
        for hops in 0..self.next.len() {
            if at == current {
                return Some(hops);
            }
            at = self.next[at]?;
        }
        tracing::error!(
            to = target,
            from = current,
            hops = self.next.len(),
            "wait-for walk exceeded bound"
        );
        None
    }

    /// Advance every occupant on the `len` workplaces from `target` by one
    /// hop.
    ///
    /// Each of those workplaces is vacated by its parked occupant, who moves
    /// into the next one; the caller closing the cycle takes `target`.
    pub fn rotate(&mut self, target: usize, len: usize) -> Vec<GateEffect> {
        if len > 0 {
            self.rotations += 1;
        }
        let mut effects = Vec::with_capacity(len);
        let mut at = Some(target);
        for _ in 0..len {
            let Some(wid) = at else {
                break;
            };
            self.rotated[wid] = true;
            effects.push(GateEffect::Wake(wid));
            at = self.next[wid];
        }
        effects
    }

    /// Record that the occupant of `from` waits to move into `to`
    pub fn wait_for(&mut self, from: usize, to: usize) {
        self.next[from] = Some(to);
        self.queues[to].push_back(from);
    }

    /// Drop the wait-for edge of a woken occupant
    pub fn stop_waiting(&mut self, from: usize) {
        self.next[from] = None;
    }

    /// Whether `wid` was vacated by a rotation; clears the mark
    pub fn take_rotated(&mut self, wid: usize) -> bool {
        std::mem::take(&mut self.rotated[wid])
    }

    /// Hand a vacated workplace to its oldest live waiter, or free its gate.
    ///
    /// Queue entries whose occupant no longer wants `wid` are dropped.
    pub fn handoff(&mut self, wid: usize) -> GateEffect {
        while let Some(waiter) = self.queues[wid].pop_front() {
            if self.next[waiter] == Some(wid) {
                self.direct_handoffs += 1;
                return GateEffect::Wake(waiter);
            }
        }
        self.gate_releases += 1;
        GateEffect::ReleaseEntry(wid)
    }

    pub fn stats(&self) -> TransitionStats {
        TransitionStats {
            waiting_moves: self.next.iter().filter(|edge| edge.is_some()).count(),
            rotations: self.rotations,
            direct_handoffs: self.direct_handoffs,
            gate_releases: self.gate_releases,
        }
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
