#![allow(dead_code)]

use procsim::lifecycle::ProcState;
use procsim::{Pcb, Pid, Policy, Scheduler, Simulation, Ticks};

pub const TEST_SEED: u64 = 42;

/// Build a process descriptor with all times in ticks.
pub fn proc_spec(pid: u32, arrival: u64, burst: u64, priority: i32, io: u64) -> Pcb {
    Pcb::new(Pid(pid), Ticks(arrival), Ticks(burst), priority, Ticks(io))
}

/// Run a workload to completion and hand back the finished simulation.
///
/// `procs` must be ordered by arrival time; each process is admitted on
/// the first cycle at or after its arrival tick.
pub fn run(policy: Policy, quantum: Option<u64>, procs: Vec<Pcb>) -> Simulation {
    run_seeded(policy, quantum, TEST_SEED, procs)
}

pub fn run_seeded(
    policy: Policy,
    quantum: Option<u64>,
    seed: u64,
    procs: Vec<Pcb>,
) -> Simulation {
    let scheduler = Scheduler::new(policy, quantum.map(Ticks), seed).unwrap();
    let mut sim = Simulation::new(scheduler);
    let mut next = 0;
    for _ in 0..10_000 {
        while next < procs.len() && procs[next].arrival <= sim.now() {
            sim.admit(procs[next].clone()).unwrap();
            next += 1;
        }
        if next == procs.len() {
            sim.close_admission();
        }
        if sim.is_done() {
            return sim;
        }
        sim.tick();
    }
    panic!("simulation did not terminate");
}

/// Look up a completed process by pid.
pub fn finished(sim: &Simulation, pid: u32) -> &Pcb {
    sim.finished()
        .iter()
        .find(|p| p.pid == Pid(pid))
        .unwrap_or_else(|| panic!("P{pid} did not complete"))
}

/// The times at which `pid` entered `state`, in log order.
pub fn times_in_state(sim: &Simulation, pid: u32, state: ProcState) -> Vec<Ticks> {
    sim.log()
        .events()
        .iter()
        .filter(|e| e.pid == Pid(pid) && e.state == state)
        .map(|e| e.time)
        .collect()
}
