//! Insertion-ordered process queues.

use crate::pcb::Pcb;
use crate::types::Pid;

/// An ordered collection of process descriptors.
///
/// Ready, blocked and finished queues are all `ProcessQueue`s: FIFO unless
/// a component removes by index (the scheduler's candidate selection and
/// the I/O completion server both do).
#[derive(Debug, Default)]
pub struct ProcessQueue {
    procs: Vec<Pcb>,
}

impl ProcessQueue {
    pub fn new() -> ProcessQueue {
        ProcessQueue { procs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// Append to the tail.
    pub fn push_back(&mut self, pcb: Pcb) {
        self.procs.push(pcb);
    }

    /// Remove and return the descriptor at `index`, shifting later entries
    /// forward. Panics if out of range; callers index from their own scan
    /// of the same queue in the same tick, so a miss is a logic defect.
    pub fn remove(&mut self, index: usize) -> Pcb {
        self.procs.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Pcb> {
        self.procs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.procs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pcb> {
        self.procs.iter_mut()
    }

    pub fn contains_pid(&self, pid: Pid) -> bool {
        self.procs.iter().any(|p| p.pid == pid)
    }
}
