//! Lifecycle event recording.
//!
//! Every process state transition (created, enters ready, starts running,
//! enters blocked, completes) is recorded as a `LifecycleEvent` with the
//! simulated timestamp at which it happened. The log is append-only; the
//! reporting collaborator consumes a stably time-sorted view to build the
//! per-process timeline.

use std::fmt;

use crate::types::{Pid, Ticks};

/// The closed set of lifecycle states a process transitions through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Created,
    Ready,
    Running,
    Blocked,
    Completed,
}

impl ProcState {
    /// All states, in timeline column order.
    pub const ALL: [ProcState; 5] = [
        ProcState::Created,
        ProcState::Ready,
        ProcState::Running,
        ProcState::Blocked,
        ProcState::Completed,
    ];

    /// Timeline column index for this state.
    pub fn column(self) -> usize {
        match self {
            ProcState::Created => 0,
            ProcState::Ready => 1,
            ProcState::Running => 2,
            ProcState::Blocked => 3,
            ProcState::Completed => 4,
        }
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcState::Created => "CREATED",
            ProcState::Ready => "READY",
            ProcState::Running => "RUNNING",
            ProcState::Blocked => "BLOCKED",
            ProcState::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}

/// A single recorded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub pid: Pid,
    pub time: Ticks,
    pub state: ProcState,
}

/// Append-only log of lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleLog {
    events: Vec<LifecycleEvent>,
}

impl LifecycleLog {
    pub fn new() -> LifecycleLog {
        LifecycleLog { events: Vec::new() }
    }

    pub fn record(&mut self, pid: Pid, time: Ticks, state: ProcState) {
        log::debug!("t={time} {pid} -> {state}");
        self.events.push(LifecycleEvent { pid, time, state });
    }

    /// Events in emission order.
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Events sorted by time, stable with respect to emission order.
    ///
    /// Several transitions can land on the same tick (a context switch
    /// records the outgoing and incoming process back to back); ties keep
    /// their emission order, not pid order.
    pub fn sorted(&self) -> Vec<LifecycleEvent> {
        let mut sorted = self.events.clone();
        sorted.sort_by_key(|e| e.time);
        sorted
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
