use super::types::{ProcessAddr, ProcessId};
use parking_lot::RwLock;

/// A node of the cluster that can serve fragments.
///
/// The identifier is immutable. Host and ports sit behind a single lock, so
/// `addr()` always returns a consistent snapshot even while another thread
/// is reconfiguring the process.
#[derive(Debug)]
pub struct Process {
    id: ProcessId,
    addr: RwLock<ProcessAddr>,
}

impl Process {
    pub fn new(id: ProcessId) -> Self {
        Self::with_addr(id, ProcessAddr::default())
    }

    pub fn with_addr(id: ProcessId, addr: ProcessAddr) -> Self {
        Self {
            id,
            addr: RwLock::new(addr),
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Snapshot of host and both ports.
    pub fn addr(&self) -> ProcessAddr {
        self.addr.read().clone()
    }

    pub fn set_addr(&self, addr: ProcessAddr) {
        *self.addr.write() = addr;
    }

    pub fn host(&self) -> String {
        self.addr.read().host.clone()
    }

    pub fn set_host(&self, host: impl Into<String>) {
        self.addr.write().host = host.into();
    }

    pub fn port_tcp(&self) -> u16 {
        self.addr.read().port_tcp
    }

    pub fn set_port_tcp(&self, port: u16) {
        self.addr.write().port_tcp = port;
    }

    pub fn port_http(&self) -> u16 {
        self.addr.read().port_http
    }

    pub fn set_port_http(&self, port: u16) {
        self.addr.write().port_http = port;
    }
}
