//! Deterministic discrete-event simulator for single-CPU process
//! scheduling.
//!
//! The simulator advances a virtual clock in half-unit ticks and runs a
//! fixed pipeline each tick: the scheduling policy inspects the ready
//! queue and the CPU, the dispatcher applies at most one context switch,
//! the CPU executes one tick of the running process, blocked processes
//! make I/O progress, and wait time accrues to ready-queue residents.
//! Five policies are supported behind one decision interface: FCFS, SRTF,
//! Round Robin, Preemptive Priority and Preemptive Random. Every state
//! transition lands in an append-only lifecycle log, which together with
//! the finished-process records feeds the summary and timeline reports.

pub mod clock;
pub mod cpu;
pub mod dispatcher;
pub mod engine;
pub mod io;
pub mod lifecycle;
pub mod pcb;
pub mod policy;
pub mod queue;
pub mod report;
pub mod stats;
pub mod types;
pub mod workload;

pub use engine::Simulation;
pub use lifecycle::{LifecycleEvent, LifecycleLog, ProcState};
pub use pcb::Pcb;
pub use policy::Scheduler;
pub use queue::ProcessQueue;
pub use stats::RunSummary;
pub use types::{Pid, Policy, Priority, Ticks};
pub use workload::Workload;
