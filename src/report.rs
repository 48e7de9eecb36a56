//! Plain-text report rendering.
//!
//! Two artifacts per run: a fixed-width summary table with per-process
//! accounting and run-wide averages, and a lifecycle timeline showing
//! which processes entered which state at each point in time. Both are
//! rendered to strings; the caller decides where they go.

use std::fmt::Write;

use crate::lifecycle::{LifecycleLog, ProcState};
use crate::stats::{timeline, RunSummary};
use crate::types::{Policy, Ticks};

const COL: usize = 11;

/// Render the per-process summary table.
pub fn summary(policy: Policy, quantum: Option<Ticks>, run: &RunSummary) -> String {
    let mut out = String::new();
    match quantum {
        Some(q) => writeln!(out, "Scheduling algorithm: {policy} (quantum {q})"),
        None => writeln!(out, "Scheduling algorithm: {policy}"),
    }
    .ok();
    out.push('\n');

    let headers = [
        "PID", "Arrival", "Burst", "Priority", "Finish", "Waiting", "Turnaround", "Response",
        "Switches",
    ];
    for h in headers {
        let _ = write!(out, "{h:<COL$}");
    }
    out.push('\n');

    for row in &run.rows {
        let _ = writeln!(
            out,
            "{:<COL$}{:<COL$}{:<COL$}{:<COL$}{:<COL$}{:<COL$}{:<COL$}{:<COL$}{:<COL$}",
            row.pid.to_string(),
            row.arrival.to_string(),
            row.burst.to_string(),
            row.priority,
            row.finish.to_string(),
            row.waiting.to_string(),
            row.turnaround.to_string(),
            row.response.to_string(),
            row.num_context,
        );
    }

    out.push('\n');
    let _ = writeln!(out, "Total burst time:        {}", run.total_burst);
    let _ = writeln!(out, "Average CPU burst time:  {:.2}", run.avg_burst);
    let _ = writeln!(out, "Average waiting time:    {:.2}", run.avg_waiting);
    let _ = writeln!(out, "Average turnaround time: {:.2}", run.avg_turnaround);
    let _ = writeln!(out, "Average response time:   {:.2}", run.avg_response);
    let _ = writeln!(out, "Total context switches:  {}", run.total_context_switches);
    out
}

/// Render the lifecycle timeline grid, one row per event time.
pub fn lifecycle(log: &LifecycleLog) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<COL$}", "Time");
    for state in ProcState::ALL {
        let _ = write!(out, "{:<COL$}", state.to_string());
    }
    out.push('\n');

    for row in timeline(log) {
        let _ = write!(out, "{:<COL$}", row.time.to_string());
        for cell in &row.cells {
            let joined = cell
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let _ = write!(out, "{joined:<COL$}");
        }
        out.push('\n');
    }
    out
}
