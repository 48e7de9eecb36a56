//! Simulated single-processor unit.

use log::debug;

use crate::clock::Clock;
use crate::lifecycle::{LifecycleLog, ProcState};
use crate::pcb::Pcb;
use crate::queue::ProcessQueue;
use crate::types::Ticks;

/// The processor: holds at most one process descriptor in execution.
#[derive(Debug, Default)]
pub struct CpuUnit {
    occupant: Option<Pcb>,
}

impl CpuUnit {
    pub fn new() -> CpuUnit {
        CpuUnit { occupant: None }
    }

    pub fn is_idle(&self) -> bool {
        self.occupant.is_none()
    }

    /// The descriptor currently in execution, if any.
    pub fn occupant(&self) -> Option<&Pcb> {
        self.occupant.as_ref()
    }

    pub fn occupant_mut(&mut self) -> Option<&mut Pcb> {
        self.occupant.as_mut()
    }

    /// Detach the current occupant, leaving the CPU idle.
    pub fn take(&mut self) -> Option<Pcb> {
        self.occupant.take()
    }

    /// Install a descriptor. The caller must have detached any previous
    /// occupant first; overwriting one would drop a live process.
    pub fn install(&mut self, pcb: Pcb) {
        assert!(
            self.occupant.is_none(),
            "install on a busy CPU would lose {}",
            self.occupant.as_ref().map(|p| p.pid).unwrap()
        );
        self.occupant = Some(pcb);
    }

    /// Advance the occupant's execution by one tick. No-op when idle.
    ///
    /// On the first advance of a process the response time is captured.
    /// When the remaining work reaches zero the process completes: the
    /// completion itself is charged one tick of bookkeeping overhead on
    /// `finish_time`, the descriptor moves to the finished queue, and the
    /// CPU goes idle. Completion is irreversible.
    pub fn advance(&mut self, clock: &Clock, finished: &mut ProcessQueue, log: &mut LifecycleLog) {
        let Some(pcb) = self.occupant.as_mut() else {
            return;
        };

        if !pcb.started {
            pcb.started = true;
            pcb.resp_time = clock.now() - pcb.arrival;
        }
        pcb.time_left = pcb.time_left.saturating_sub(Ticks::ONE);

        if pcb.time_left.is_zero() {
            let mut done = self.occupant.take().unwrap();
            done.finish_time = clock.now() + Ticks::ONE;
            debug!("t={} {} completed (finish {})", clock.now(), done.pid, done.finish_time);
            log.record(done.pid, done.finish_time, ProcState::Completed);
            finished.push_back(done);
        }
    }
}
