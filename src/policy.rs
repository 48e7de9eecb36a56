//! Scheduling decision engine.
//!
//! Once per tick the scheduler looks at the ready queue and the CPU
//! occupant and decides whether a context switch must happen now, and
//! which ready-queue slot is the candidate. The decision is latched as a
//! pending interrupt that the dispatcher consumes later in the same tick,
//! decoupling decision from application.

use anyhow::{bail, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cpu::CpuUnit;
use crate::queue::ProcessQueue;
use crate::types::{Policy, Ticks};

/// Decision engine for one of the five policies.
///
/// The countdown `timer` ticks down by one on every `decide()` call
/// regardless of outcome, floored at zero; quantum-based policies reset it
/// to the quantum whenever they trigger a switch.
pub struct Scheduler {
    policy: Policy,
    quantum: Ticks,
    timer: Ticks,
    pending: Option<usize>,
    rng: SmallRng,
}

impl Scheduler {
    /// Build a scheduler for `policy`.
    ///
    /// `quantum` is given in simulated time units and is required (and must
    /// be positive) for Round Robin, Preemptive Priority and Preemptive
    /// Random; it is rejected as a configuration error otherwise missing.
    /// `seed` fixes the Preemptive Random pick sequence so runs are
    /// reproducible.
    pub fn new(policy: Policy, quantum: Option<Ticks>, seed: u64) -> Result<Scheduler> {
        let quantum = match quantum {
            Some(q) if policy.needs_quantum() => {
                if q.is_zero() {
                    bail!("{policy} requires a positive time quantum");
                }
                q
            }
            None if policy.needs_quantum() => {
                bail!("{policy} requires a time quantum");
            }
            // FCFS and SRTF never consult the timer.
            _ => Ticks::ZERO,
        };

        Ok(Scheduler {
            policy,
            quantum,
            timer: quantum,
            pending: None,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Consume the pending interrupt, if any.
    pub fn take_interrupt(&mut self) -> Option<usize> {
        self.pending.take()
    }

    /// Run the per-tick decision. An empty ready queue yields no decision;
    /// the timer still ticks down.
    pub fn decide(&mut self, ready: &ProcessQueue, cpu: &CpuUnit) {
        self.timer = self.timer.saturating_sub(Ticks::ONE);
        if ready.is_empty() {
            return;
        }
        match self.policy {
            Policy::Fcfs => self.fcfs(cpu),
            Policy::Srtf => self.srtf(ready, cpu),
            Policy::RoundRobin => self.round_robin(cpu),
            Policy::Priority => self.priority(ready, cpu),
            Policy::Random => self.random(ready, cpu),
        }
    }

    /// Candidate is always the queue head; switch only when the CPU is
    /// idle. A running process is never evicted.
    fn fcfs(&mut self, cpu: &CpuUnit) {
        if cpu.is_idle() {
            self.pending = Some(0);
        }
    }

    /// Candidate is the minimum remaining time in the ready queue, ties
    /// broken by lowest index. A busy CPU is only preempted by a strictly
    /// shorter candidate.
    fn srtf(&mut self, ready: &ProcessQueue, cpu: &CpuUnit) {
        let (mut shortest, mut index) = match cpu.occupant() {
            Some(running) => (running.time_left, None),
            None => (ready.get(0).unwrap().time_left, Some(0)),
        };
        for (i, pcb) in ready.iter().enumerate() {
            if pcb.time_left < shortest {
                shortest = pcb.time_left;
                index = Some(i);
            }
        }
        if index.is_some() {
            self.pending = index;
        }
    }

    /// Switch on idle CPU or timer expiry; candidate is always the head.
    /// Rotation comes from the dispatcher appending the evicted process to
    /// the queue tail.
    fn round_robin(&mut self, cpu: &CpuUnit) {
        if cpu.is_idle() || self.timer.is_zero() {
            self.timer = self.quantum;
            self.pending = Some(0);
        }
    }

    /// Candidate is the best (lowest) priority in the ready queue, ties
    /// broken by lowest index. Three independent triggers:
    ///
    /// 1. the CPU is idle;
    /// 2. the running process still needs I/O and has consumed at least
    ///    half its quantum (eviction routes it to the blocked queue);
    /// 3. the best candidate is at least as good as the running process
    ///    and either the quantum elapsed or it is strictly better.
    ///
    /// Under trigger 3 equal-priority processes round-robin on quantum
    /// expiry while a strictly better arrival preempts immediately. The
    /// timer resets on any trigger.
    fn priority(&mut self, ready: &ProcessQueue, cpu: &CpuUnit) {
        let running = cpu.occupant();
        let io_needed = running.is_some_and(|p| p.needs_io()) && self.timer <= self.quantum.half();

        let mut best_index = 0;
        let mut best_prio = ready.get(0).unwrap().priority;
        for (i, pcb) in ready.iter().enumerate() {
            if pcb.priority < best_prio {
                best_prio = pcb.priority;
                best_index = i;
            }
        }

        // A busy CPU with no pending I/O eviction only yields to a
        // candidate at least as good as the running process.
        let candidate = match running {
            Some(p) if !io_needed && best_prio > p.priority => None,
            _ => Some(best_index),
        };

        let preempt = match (running, candidate) {
            (None, _) => true,
            _ if io_needed => true,
            (Some(p), Some(_)) => self.timer.is_zero() || best_prio < p.priority,
            (Some(_), None) => false,
        };

        if preempt {
            self.timer = self.quantum;
            self.pending = candidate;
        }
    }

    /// Switch on idle CPU or timer expiry; candidate is a uniformly random
    /// ready-queue index.
    fn random(&mut self, ready: &ProcessQueue, cpu: &CpuUnit) {
        if cpu.is_idle() || self.timer.is_zero() {
            self.timer = self.quantum;
            self.pending = Some(self.rng.gen_range(0..ready.len()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcb::Pcb;
    use crate::types::{Pid, Priority};

    fn pcb(pid: u32, time_left: u64, priority: Priority, io: u64) -> Pcb {
        Pcb::new(Pid(pid), Ticks::ZERO, Ticks(time_left), priority, Ticks(io))
    }

    fn busy_cpu(pcb: Pcb) -> CpuUnit {
        let mut cpu = CpuUnit::new();
        cpu.install(pcb);
        cpu
    }

    #[test]
    fn empty_ready_queue_yields_no_decision() {
        let mut sched = Scheduler::new(Policy::Fcfs, None, 0).unwrap();
        let ready = ProcessQueue::new();
        sched.decide(&ready, &CpuUnit::new());
        assert_eq!(sched.take_interrupt(), None);
    }

    #[test]
    fn fcfs_never_preempts_a_running_process() {
        let mut sched = Scheduler::new(Policy::Fcfs, None, 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 1, 0, 0));

        let cpu = busy_cpu(pcb(1, 8, 0, 0));
        sched.decide(&ready, &cpu);
        assert_eq!(sched.take_interrupt(), None);

        sched.decide(&ready, &CpuUnit::new());
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn srtf_picks_minimum_remaining_breaking_ties_by_index() {
        let mut sched = Scheduler::new(Policy::Srtf, None, 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(1, 4, 0, 0));
        ready.push_back(pcb(2, 2, 0, 0));
        ready.push_back(pcb(3, 2, 0, 0));

        sched.decide(&ready, &CpuUnit::new());
        // P2 and P3 tie at 2 ticks; the earlier-enqueued index wins.
        assert_eq!(sched.take_interrupt(), Some(1));
    }

    #[test]
    fn srtf_preempts_only_a_strictly_shorter_candidate() {
        let mut sched = Scheduler::new(Policy::Srtf, None, 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 0, 0));

        let cpu = busy_cpu(pcb(1, 4, 0, 0));
        sched.decide(&ready, &cpu);
        assert_eq!(sched.take_interrupt(), None, "equal remaining must not preempt");

        let cpu = busy_cpu(pcb(1, 6, 0, 0));
        sched.decide(&ready, &cpu);
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn round_robin_fires_on_idle_and_on_expiry() {
        // Quantum 1.0 units = 2 ticks.
        let mut sched = Scheduler::new(Policy::RoundRobin, Some(Ticks(2)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 0, 0));

        let cpu = busy_cpu(pcb(1, 8, 0, 0));
        sched.decide(&ready, &cpu); // timer 2 -> 1, no trigger
        assert_eq!(sched.take_interrupt(), None);
        sched.decide(&ready, &cpu); // timer 1 -> 0, trigger
        assert_eq!(sched.take_interrupt(), Some(0));

        // Idle CPU triggers regardless of the timer.
        sched.decide(&ready, &CpuUnit::new());
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn priority_idle_trigger_selects_best_priority() {
        let mut sched = Scheduler::new(Policy::Priority, Some(Ticks(4)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(1, 4, 5, 0));
        ready.push_back(pcb(2, 4, 1, 0));
        ready.push_back(pcb(3, 4, 1, 0));

        sched.decide(&ready, &CpuUnit::new());
        // P2 and P3 tie at priority 1; lowest index wins.
        assert_eq!(sched.take_interrupt(), Some(1));
    }

    #[test]
    fn priority_better_arrival_preempts_immediately() {
        let mut sched = Scheduler::new(Policy::Priority, Some(Ticks(4)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 1, 0));

        let cpu = busy_cpu(pcb(1, 8, 3, 0));
        sched.decide(&ready, &cpu); // timer still running, but prio 1 < 3
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn priority_worse_candidate_never_preempts() {
        let mut sched = Scheduler::new(Policy::Priority, Some(Ticks(2)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 9, 0));

        let cpu = busy_cpu(pcb(1, 8, 1, 0));
        sched.decide(&ready, &cpu);
        sched.decide(&ready, &cpu);
        sched.decide(&ready, &cpu); // timer long since zero
        assert_eq!(sched.take_interrupt(), None);
    }

    #[test]
    fn priority_equal_candidate_preempts_on_expiry_only() {
        let mut sched = Scheduler::new(Policy::Priority, Some(Ticks(2)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 3, 0));

        let cpu = busy_cpu(pcb(1, 8, 3, 0));
        sched.decide(&ready, &cpu); // timer 2 -> 1
        assert_eq!(sched.take_interrupt(), None);
        sched.decide(&ready, &cpu); // timer 1 -> 0
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn priority_io_eviction_after_half_quantum() {
        // Quantum 2.0 units = 4 ticks; half = 2 ticks.
        let mut sched = Scheduler::new(Policy::Priority, Some(Ticks(4)), 0).unwrap();
        let mut ready = ProcessQueue::new();
        ready.push_back(pcb(2, 4, 9, 0));

        // Running process still needs I/O and is higher priority than the
        // candidate; only the I/O clause can trigger.
        let cpu = busy_cpu(pcb(1, 8, 1, 2));
        sched.decide(&ready, &cpu); // timer 4 -> 3
        assert_eq!(sched.take_interrupt(), None);
        sched.decide(&ready, &cpu); // timer 3 -> 2 == half
        assert_eq!(sched.take_interrupt(), Some(0));
    }

    #[test]
    fn random_is_reproducible_for_a_fixed_seed() {
        let mut ready = ProcessQueue::new();
        for pid in 1..=5 {
            ready.push_back(pcb(pid, 4, 0, 0));
        }

        let picks = |seed: u64| -> Vec<usize> {
            let mut sched = Scheduler::new(Policy::Random, Some(Ticks(2)), seed).unwrap();
            (0..8)
                .map(|_| {
                    sched.decide(&ready, &CpuUnit::new());
                    sched.take_interrupt().unwrap()
                })
                .collect()
        };

        assert_eq!(picks(42), picks(42));
        assert!(picks(42).iter().all(|&i| i < 5));
    }

    #[test]
    fn config_errors_are_fatal_at_construction() {
        assert!(Scheduler::new(Policy::RoundRobin, None, 0).is_err());
        assert!(Scheduler::new(Policy::Priority, Some(Ticks::ZERO), 0).is_err());
        assert!(Scheduler::new(Policy::Random, None, 0).is_err());
        assert!(Scheduler::new(Policy::Fcfs, None, 0).is_ok());
        assert!(Scheduler::new(Policy::Srtf, None, 0).is_ok());
    }
}
