use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use procsim::policy::Scheduler;
use procsim::stats::RunSummary;
use procsim::types::{Policy, Ticks};
use procsim::{report, Simulation, Workload};

/// Simulate a workload of processes on a single CPU under a chosen
/// scheduling policy.
///
/// The workload file holds one process per line: pid, arrival time,
/// CPU burst, priority and I/O burst, with times in simulated units on
/// a half-unit grid. Two reports are produced: a per-process summary
/// (written to the output path) and a lifecycle timeline (written next
/// to it with a `-lifecycle` suffix).
#[derive(Debug, Parser)]
struct Opts {
    /// Workload file to simulate.
    input: PathBuf,

    /// Where to write the summary report.
    output: PathBuf,

    /// Scheduling policy.
    #[clap(short = 'p', long, value_enum, default_value = "fcfs")]
    policy: Policy,

    /// Time quantum in simulated units, for the quantum-based policies.
    #[clap(short = 'q', long)]
    quantum: Option<f64>,

    /// Seed for the Preemptive Random policy.
    #[clap(long, default_value = "42")]
    seed: u64,

    /// Enable verbose output.
    #[clap(short = 'v', long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let loglevel = if verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        loglevel,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn lifecycle_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let mut name = format!("{stem}-lifecycle");
    if let Some(ext) = output.extension().and_then(|s| s.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    output.with_file_name(name)
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    let quantum = opts
        .quantum
        .map(Ticks::from_units)
        .transpose()
        .context("invalid quantum")?;
    if quantum.is_some() && !opts.policy.needs_quantum() {
        bail!("{} does not take a quantum", opts.policy);
    }

    let mut workload = Workload::from_file(&opts.input)?;
    let scheduler = Scheduler::new(opts.policy, quantum, opts.seed)?;
    let mut sim = Simulation::new(scheduler);
    info!(
        "simulating {} processes under {}",
        workload.len(),
        opts.policy
    );

    loop {
        workload.admit_due(&mut sim)?;
        if workload.exhausted() {
            sim.close_admission();
        }
        if sim.is_done() {
            break;
        }
        sim.tick();
    }
    info!("run complete at t={}", sim.now());

    let run = RunSummary::from_finished(sim.finished());
    let summary = report::summary(opts.policy, quantum, &run);
    fs::write(&opts.output, &summary)
        .with_context(|| format!("failed to write {}", opts.output.display()))?;

    let timeline_path = lifecycle_path(&opts.output);
    fs::write(&timeline_path, report::lifecycle(sim.log()))
        .with_context(|| format!("failed to write {}", timeline_path.display()))?;

    print!("{summary}");
    Ok(())
}
