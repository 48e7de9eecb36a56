//! Newtype wrappers and type aliases for domain concepts.
//!
//! Newtypes for process identifiers and simulated time prevent silent
//! type confusion between pids, tick counts and priorities.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use anyhow::{bail, Result};

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Static process priority. Lower value = higher priority.
pub type Priority = i32;

/// Simulated time, counted in ticks.
///
/// One tick is half a simulated time unit; the clock advances by exactly
/// one tick per simulation step. Durations and timestamps share this type,
/// so all components agree on a single granularity and comparisons are
/// exact integer arithmetic (no float drift in the accounting rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const ZERO: Ticks = Ticks(0);
    /// One tick = 0.5 simulated time units.
    pub const ONE: Ticks = Ticks(1);

    /// Convert a duration given in simulated time units into ticks.
    ///
    /// Workload files express arrival, burst and I/O times in units;
    /// anything that is not a multiple of the half-unit tick cannot be
    /// represented on the simulation clock and is rejected.
    pub fn from_units(units: f64) -> Result<Ticks> {
        if !units.is_finite() || units < 0.0 {
            bail!("time value {units} must be a non-negative number");
        }
        let ticks = units * 2.0;
        if (ticks - ticks.round()).abs() > 1e-9 {
            bail!("time value {units} is not a multiple of the 0.5 tick");
        }
        Ok(Ticks(ticks.round() as u64))
    }

    /// The duration expressed in simulated time units.
    pub fn as_units(self) -> f64 {
        self.0 as f64 * 0.5
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, rhs: Ticks) -> Ticks {
        Ticks(self.0.saturating_sub(rhs.0))
    }

    /// Half of this duration, rounded down to whole ticks.
    pub fn half(self) -> Ticks {
        Ticks(self.0 / 2)
    }
}

impl Add for Ticks {
    type Output = Ticks;

    fn add(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 + rhs.0)
    }
}

impl AddAssign for Ticks {
    fn add_assign(&mut self, rhs: Ticks) {
        self.0 += rhs.0;
    }
}

impl Sub for Ticks {
    type Output = Ticks;

    fn sub(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 - rhs.0)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// The five interchangeable scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Policy {
    /// First come, first served (non-preemptive).
    Fcfs,
    /// Shortest remaining time first (preemptive).
    Srtf,
    /// Round Robin with a fixed quantum.
    #[clap(name = "rr")]
    RoundRobin,
    /// Preemptive Priority (lower number = higher priority).
    Priority,
    /// Preemptive Random: uniform random pick on idle or quantum expiry.
    Random,
}

impl Policy {
    /// Whether this policy requires a time quantum at construction.
    pub fn needs_quantum(self) -> bool {
        matches!(self, Policy::RoundRobin | Policy::Priority | Policy::Random)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin => "Round Robin",
            Policy::Priority => "Preemptive Priority",
            Policy::Random => "Preemptive Random",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_from_units_accepts_half_steps() {
        assert_eq!(Ticks::from_units(0.0).unwrap(), Ticks(0));
        assert_eq!(Ticks::from_units(0.5).unwrap(), Ticks(1));
        assert_eq!(Ticks::from_units(2.0).unwrap(), Ticks(4));
        assert_eq!(Ticks::from_units(2.5).unwrap(), Ticks(5));
    }

    #[test]
    fn ticks_from_units_rejects_off_grid_values() {
        assert!(Ticks::from_units(0.3).is_err());
        assert!(Ticks::from_units(-1.0).is_err());
        assert!(Ticks::from_units(f64::NAN).is_err());
    }

    #[test]
    fn ticks_display_in_units() {
        assert_eq!(Ticks(4).to_string(), "2");
        assert_eq!(Ticks(5).to_string(), "2.5");
        assert_eq!(Ticks(0).to_string(), "0");
    }

    #[test]
    fn quantum_requirement_per_policy() {
        assert!(!Policy::Fcfs.needs_quantum());
        assert!(!Policy::Srtf.needs_quantum());
        assert!(Policy::RoundRobin.needs_quantum());
        assert!(Policy::Priority.needs_quantum());
        assert!(Policy::Random.needs_quantum());
    }
}
