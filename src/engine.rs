//! The simulation core.
//!
//! [`Simulation`] owns the clock, the three queues, the CPU, the scheduler
//! and the lifecycle log, and drives them through the fixed per-tick
//! pipeline: scheduling decision, context switch, CPU execution, I/O
//! service, wait accounting, clock advance. Callers admit processes at or
//! before their arrival tick, close admission once the workload is
//! exhausted, and tick until [`Simulation::is_done`].

use std::collections::HashSet;

use anyhow::{bail, Result};
use log::debug;

use crate::clock::Clock;
use crate::cpu::CpuUnit;
use crate::dispatcher;
use crate::io;
use crate::lifecycle::{LifecycleLog, ProcState};
use crate::pcb::Pcb;
use crate::policy::Scheduler;
use crate::queue::ProcessQueue;
use crate::types::{Pid, Ticks};

pub struct Simulation {
    clock: Clock,
    cpu: CpuUnit,
    scheduler: Scheduler,
    ready: ProcessQueue,
    blocked: ProcessQueue,
    finished: ProcessQueue,
    log: LifecycleLog,
    admitted: HashSet<Pid>,
    admission_closed: bool,
    last_accrual: Ticks,
}

impl Simulation {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            clock: Clock::new(),
            cpu: CpuUnit::new(),
            scheduler,
            ready: ProcessQueue::new(),
            blocked: ProcessQueue::new(),
            finished: ProcessQueue::new(),
            log: LifecycleLog::new(),
            admitted: HashSet::new(),
            admission_closed: false,
            last_accrual: Ticks::ZERO,
        }
    }

    /// Admit a process into the ready queue.
    ///
    /// The arrival tick must not lie in the past. Admission records both
    /// the `CREATED` and `READY` events at the current clock time: a
    /// newborn process is runnable immediately. The stamp can land after
    /// the arrival tick when a context switch advanced the clock past it.
    pub fn admit(&mut self, pcb: Pcb) -> Result<()> {
        if self.admission_closed {
            bail!("admission is closed, cannot admit {}", pcb.pid);
        }
        if !self.admitted.insert(pcb.pid) {
            bail!("duplicate pid {}", pcb.pid);
        }
        if pcb.arrival > self.clock.now() {
            bail!(
                "{} admitted at t={} but arrives at t={}",
                pcb.pid,
                self.clock.now(),
                pcb.arrival
            );
        }
        if pcb.burst.is_zero() {
            bail!("{} has a zero-length burst", pcb.pid);
        }
        debug!("t={} admit {}", self.clock.now(), pcb.pid);
        self.log.record(pcb.pid, self.clock.now(), ProcState::Created);
        self.log.record(pcb.pid, self.clock.now(), ProcState::Ready);
        self.ready.push_back(pcb);
        Ok(())
    }

    /// Mark the workload as exhausted; no further admissions are accepted.
    pub fn close_admission(&mut self) {
        self.admission_closed = true;
    }

    /// True once admission is closed and every admitted process has
    /// completed.
    pub fn is_done(&self) -> bool {
        self.admission_closed
            && self.ready.is_empty()
            && self.blocked.is_empty()
            && self.cpu.is_idle()
    }

    /// Run one cycle of the pipeline.
    pub fn tick(&mut self) {
        self.scheduler.decide(&self.ready, &self.cpu);
        if let Some(index) = self.scheduler.take_interrupt() {
            dispatcher::context_switch(
                index,
                &mut self.cpu,
                &mut self.ready,
                &mut self.blocked,
                &mut self.clock,
                &mut self.log,
            );
        }
        self.cpu
            .advance(&self.clock, &mut self.finished, &mut self.log);
        io::advance(&mut self.blocked, &mut self.ready, &self.clock, &mut self.log);
        self.accrue_wait();
        self.clock.advance();
        self.check_membership();
    }

    /// Charge ready-queue residents the time elapsed since the last pass.
    ///
    /// The elapsed delta is usually one tick, but a context switch advances
    /// the clock mid-cycle, so the accrual is computed from the clock
    /// rather than assumed.
    fn accrue_wait(&mut self) {
        let now = self.clock.now();
        let elapsed = now - self.last_accrual;
        if !elapsed.is_zero() {
            for pcb in self.ready.iter_mut() {
                pcb.wait_time += elapsed;
            }
        }
        self.last_accrual = now;
    }

    // Every admitted process must live in exactly one place.
    fn check_membership(&self) {
        let on_cpu = if self.cpu.is_idle() { 0 } else { 1 };
        let total = self.ready.len() + self.blocked.len() + self.finished.len() + on_cpu;
        assert_eq!(
            total,
            self.admitted.len(),
            "process descriptor lost or duplicated"
        );
    }

    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    pub fn finished(&self) -> &ProcessQueue {
        &self.finished
    }

    pub fn log(&self) -> &LifecycleLog {
        &self.log
    }

    #[cfg(test)]
    pub fn ready(&self) -> &ProcessQueue {
        &self.ready
    }

    #[cfg(test)]
    pub fn blocked(&self) -> &ProcessQueue {
        &self.blocked
    }
}
