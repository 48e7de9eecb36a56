//! Post-run accounting.
//!
//! Reduces the finished queue and the lifecycle log into the per-process
//! rows, run-wide averages and state-timeline grid the reports are built
//! from. Everything here is read-only over the simulation's output.

use crate::lifecycle::LifecycleLog;
use crate::pcb::Pcb;
use crate::queue::ProcessQueue;
use crate::types::{Pid, Priority, Ticks};

/// One summary row, in simulated units of time.
#[derive(Debug, Clone)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub finish: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
    pub response: Ticks,
    pub num_context: u32,
}

impl ProcessRow {
    fn from_pcb(pcb: &Pcb) -> Self {
        Self {
            pid: pcb.pid,
            arrival: pcb.arrival,
            burst: pcb.burst,
            priority: pcb.priority,
            finish: pcb.finish_time,
            waiting: pcb.wait_time,
            turnaround: pcb.turnaround(),
            response: pcb.resp_time,
            num_context: pcb.num_context,
        }
    }
}

/// Per-process rows plus run-wide aggregates.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: Vec<ProcessRow>,
    pub total_burst: Ticks,
    pub avg_burst: f64,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    pub total_context_switches: u32,
}

impl RunSummary {
    /// Build the summary from the finished queue, rows ordered by pid.
    pub fn from_finished(finished: &ProcessQueue) -> Self {
        let mut rows: Vec<ProcessRow> = finished.iter().map(ProcessRow::from_pcb).collect();
        rows.sort_by_key(|r| r.pid);

        let n = rows.len() as f64;
        let mut summary = Self {
            total_burst: rows.iter().fold(Ticks::ZERO, |acc, r| acc + r.burst),
            avg_burst: 0.0,
            avg_waiting: 0.0,
            avg_turnaround: 0.0,
            avg_response: 0.0,
            total_context_switches: rows.iter().map(|r| r.num_context).sum(),
            rows,
        };
        if n > 0.0 {
            summary.avg_burst = summary.total_burst.as_units() / n;
            summary.avg_waiting =
                summary.rows.iter().map(|r| r.waiting.as_units()).sum::<f64>() / n;
            summary.avg_turnaround =
                summary.rows.iter().map(|r| r.turnaround.as_units()).sum::<f64>() / n;
            summary.avg_response =
                summary.rows.iter().map(|r| r.response.as_units()).sum::<f64>() / n;
        }
        summary
    }
}

/// One timeline row: the processes that entered each state at `time`.
#[derive(Debug, Clone, Default)]
pub struct TimelineRow {
    pub time: Ticks,
    pub cells: [Vec<Pid>; 5],
}

/// Collapse the sorted lifecycle log into a grid with one row per
/// distinct event time. Within a cell, pids keep the order the events
/// were emitted in.
pub fn timeline(log: &LifecycleLog) -> Vec<TimelineRow> {
    let mut rows: Vec<TimelineRow> = Vec::new();
    for event in log.sorted() {
        if rows.last().map(|r| r.time) != Some(event.time) {
            rows.push(TimelineRow {
                time: event.time,
                ..Default::default()
            });
        }
        let row = rows.last_mut().unwrap();
        row.cells[event.state.column()].push(event.pid);
    }
    rows
}
