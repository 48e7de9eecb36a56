//! Context-switch protocol.
//!
//! Applies a positive scheduler decision: pulls the candidate out of the
//! ready queue, installs it on the CPU, and routes the evicted occupant to
//! the blocked queue (if it still needs I/O) or the ready-queue tail,
//! charging the fixed switch overhead. At most one switch is applied per
//! tick, and only when the scheduler latched an interrupt.

use log::debug;

use crate::clock::Clock;
use crate::cpu::CpuUnit;
use crate::lifecycle::{LifecycleLog, ProcState};
use crate::queue::ProcessQueue;
use crate::types::Ticks;

/// Perform the switch for the candidate at `index` in the ready queue.
///
/// When the CPU was busy, the switch consumes simulated time: the outgoing
/// process is charged one context switch, the incoming one a tick of wait
/// overhead, and the clock advances by exactly one tick before the
/// outgoing descriptor is routed. When the CPU was idle there is no
/// outgoing descriptor and no overhead; the `RUNNING` event is still
/// emitted. The membership invariant holds across the sub-steps: each
/// descriptor is moved, never copied.
pub fn context_switch(
    index: usize,
    cpu: &mut CpuUnit,
    ready: &mut ProcessQueue,
    blocked: &mut ProcessQueue,
    clock: &mut Clock,
    log: &mut LifecycleLog,
) {
    let incoming = ready.remove(index);
    let outgoing = cpu.take();
    debug!(
        "t={} dispatch {} (slot {}), evicting {:?}",
        clock.now(),
        incoming.pid,
        index,
        outgoing.as_ref().map(|p| p.pid.0)
    );
    cpu.install(incoming);

    if let Some(mut out) = outgoing {
        out.num_context += 1;
        // The switch itself consumes one tick; the process that just got
        // the CPU spends it waiting for the switch to complete.
        cpu.occupant_mut().unwrap().wait_time += Ticks::ONE;
        clock.advance();

        if out.needs_io() {
            log.record(out.pid, clock.now(), ProcState::Blocked);
            blocked.push_back(out);
        } else {
            log.record(out.pid, clock.now(), ProcState::Ready);
            ready.push_back(out);
        }
    }

    let running = cpu.occupant().unwrap().pid;
    log.record(running, clock.now(), ProcState::Running);
}
