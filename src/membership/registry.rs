//! Process Registry
//!
//! Owns every `Process` known to this node, keyed by `ProcessId`. Fragments only
//! store the id, and callers come back here to resolve it.

use super::process::Process;
use super::types::{ProcessAddr, ProcessId};

use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ProcessRegistry {
    processes: DashMap<ProcessId, Arc<Process>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process registered under `id`, creating an unaddressed one
    /// if it is unknown. Concurrent callers with the same id share one instance.
    pub fn get_or_create(&self, id: ProcessId) -> Arc<Process> {
        self.processes
            .entry(id)
            .or_insert_with(|| {
                tracing::info!("Registered process {}", id);
                Arc::new(Process::new(id))
            })
            .value()
            .clone()
    }

    /// Registers a process with a known address, or updates the address of an
    /// existing one.
    pub fn register(&self, id: ProcessId, addr: ProcessAddr) -> Arc<Process> {
        let process = self.get_or_create(id);
        process.set_addr(addr);
        process
    }

    pub fn get(&self, id: &ProcessId) -> Option<Arc<Process>> {
        self.processes.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &ProcessId) -> bool {
        self.processes.contains_key(id)
    }

    /// All processes, ordered by id for stable output.
    pub fn all(&self) -> Vec<Arc<Process>> {
        let mut processes: Vec<Arc<Process>> = self
            .processes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        processes.sort_by_key(|p| p.id());
        processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
