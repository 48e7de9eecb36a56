//! Workload file parsing and timed admission.
//!
//! A workload file holds one process per line, five whitespace-separated
//! columns: pid, arrival, burst, priority, I/O burst. Times are in
//! simulated units and must lie on the half-unit grid. Blank lines and
//! lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::engine::Simulation;
use crate::pcb::Pcb;
use crate::types::{Pid, Ticks};

#[derive(Debug)]
pub struct Workload {
    pending: Vec<Pcb>,
    next: usize,
}

impl Workload {
    pub fn from_file(path: &Path) -> Result<Workload> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read workload file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid workload file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Workload> {
        let mut pending = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let pcb = parse_line(line).with_context(|| format!("line {}", lineno + 1))?;
            pending.push(pcb);
        }
        if pending.is_empty() {
            bail!("workload contains no processes");
        }

        // Arrival order is the admission order; the file must already be
        // sorted so the admission cursor can be a plain index.
        for pair in pending.windows(2) {
            if pair[1].arrival < pair[0].arrival {
                bail!(
                    "{} (arrival {}) listed after {} (arrival {})",
                    pair[1].pid,
                    pair[1].arrival,
                    pair[0].pid,
                    pair[0].arrival
                );
            }
        }
        for (i, a) in pending.iter().enumerate() {
            if pending[i + 1..].iter().any(|b| b.pid == a.pid) {
                bail!("duplicate pid {}", a.pid);
            }
        }

        info!("loaded {} processes", pending.len());
        Ok(Workload { pending, next: 0 })
    }

    /// Admit every process whose arrival time has been reached.
    pub fn admit_due(&mut self, sim: &mut Simulation) -> Result<()> {
        while let Some(pcb) = self.pending.get(self.next) {
            if pcb.arrival > sim.now() {
                break;
            }
            sim.admit(pcb.clone())?;
            self.next += 1;
        }
        Ok(())
    }

    pub fn exhausted(&self) -> bool {
        self.next == self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

fn parse_line(line: &str) -> Result<Pcb> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        bail!("expected 5 fields (pid arrival burst priority io), got {}", fields.len());
    }
    let pid: u32 = fields[0]
        .parse()
        .with_context(|| format!("bad pid {:?}", fields[0]))?;
    let arrival = parse_units(fields[1], "arrival")?;
    let burst = parse_units(fields[2], "burst")?;
    let priority: i32 = fields[3]
        .parse()
        .with_context(|| format!("bad priority {:?}", fields[3]))?;
    let io = parse_units(fields[4], "io burst")?;
    if burst.is_zero() {
        bail!("P{pid} has a zero-length burst");
    }
    Ok(Pcb::new(Pid(pid), arrival, burst, priority, io))
}

fn parse_units(field: &str, what: &str) -> Result<Ticks> {
    let units: f64 = field
        .parse()
        .with_context(|| format!("bad {what} {field:?}"))?;
    Ticks::from_units(units).with_context(|| format!("bad {what}"))
}
