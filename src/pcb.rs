//! Process descriptor: the mutable record each process carries through
//! the simulation.

use crate::types::{Pid, Priority, Ticks};

/// Process control block.
///
/// Static parameters (`pid`, `arrival`, `burst`, `priority`) are fixed at
/// construction. Dynamic state is mutated only by the component that owns
/// the corresponding transition: `time_left` by the CPU, `wait_time` by the
/// engine's accrual and the dispatcher's switch overhead, `io_left` by the
/// I/O completion server.
#[derive(Debug, Clone)]
pub struct Pcb {
    pub pid: Pid,
    /// Time the process first becomes eligible for the ready queue.
    pub arrival: Ticks,
    /// Total required execution time. Immutable; reported in the summary.
    pub burst: Ticks,
    /// Remaining execution time. Decremented one tick per CPU advance,
    /// terminal at zero.
    pub time_left: Ticks,
    /// Lower value = higher priority.
    pub priority: Priority,
    /// Remaining I/O time. A process evicted while incomplete goes to the
    /// blocked queue iff this is non-zero; drained there one tick at a time.
    pub io_left: Ticks,
    /// Set the first time the process occupies the CPU.
    pub started: bool,
    /// Time of first execution minus arrival. Set exactly once.
    pub resp_time: Ticks,
    /// Accumulated time spent in the ready queue, plus the one-tick switch
    /// overhead charged on each dispatch that evicts a predecessor.
    pub wait_time: Ticks,
    /// Completion time, including the one-tick completion overhead.
    pub finish_time: Ticks,
    /// Number of times this process was evicted from the CPU while still
    /// incomplete.
    pub num_context: u32,
}

impl Pcb {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks, priority: Priority, io_burst: Ticks) -> Pcb {
        Pcb {
            pid,
            arrival,
            burst,
            time_left: burst,
            priority,
            io_left: io_burst,
            started: false,
            resp_time: Ticks::ZERO,
            wait_time: Ticks::ZERO,
            finish_time: Ticks::ZERO,
            num_context: 0,
        }
    }

    /// Whether the process still needs an I/O burst before it completes.
    pub fn needs_io(&self) -> bool {
        !self.io_left.is_zero()
    }

    /// Turnaround time. Meaningful only after completion.
    pub fn turnaround(&self) -> Ticks {
        self.finish_time - self.arrival
    }
}
