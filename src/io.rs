//! I/O service for blocked processes.
//!
//! All blocked processes make progress in parallel: every occupant of the
//! blocked queue has its remaining I/O decremented once per tick.
//! Completions are detected before the decrement, so a process that hits
//! zero on one tick re-enters the ready queue at the start of the next
//! service pass.

use log::debug;

use crate::clock::Clock;
use crate::lifecycle::{LifecycleLog, ProcState};
use crate::queue::ProcessQueue;
use crate::types::Ticks;

/// One service pass over the blocked queue.
pub fn advance(
    blocked: &mut ProcessQueue,
    ready: &mut ProcessQueue,
    clock: &Clock,
    log: &mut LifecycleLog,
) {
    let mut i = 0;
    while i < blocked.len() {
        if blocked.get(i).map_or(false, |p| p.io_left.is_zero()) {
            let done = blocked.remove(i);
            debug!("t={} {} finished I/O", clock.now(), done.pid);
            log.record(done.pid, clock.now(), ProcState::Ready);
            ready.push_back(done);
        } else {
            i += 1;
        }
    }
    for pcb in blocked.iter_mut() {
        pcb.io_left = pcb.io_left.saturating_sub(Ticks::ONE);
    }
}
