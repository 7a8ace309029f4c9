//! Membership Module
//!
//! Records the processes (cluster nodes) that fragments can be assigned to.
//! Discovery and failure detection happen elsewhere; this module only keeps the
//! identity and addressing of each process once something has reported it.
//!
//! ## Core Concepts
//! - **`ProcessId`**: Stable UUID identity of a node.
//! - **`Process`**: Identity plus host, TCP port and HTTP port, guarded by one lock.
//! - **`ProcessRegistry`**: Arena of processes; fragments refer to processes by id only.

pub mod process;
pub mod registry;
pub mod types;

pub use process::Process;
pub use registry::ProcessRegistry;
pub use types::{ProcessAddr, ProcessId};

#[cfg(test)]
mod tests;
