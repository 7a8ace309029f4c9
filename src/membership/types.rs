use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a cluster process. Never changes once assigned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub Uuid);

impl ProcessId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProcessId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network addressing of a process.
///
/// Kept as one value so a reader always sees host and ports from the same write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessAddr {
    pub host: String,
    pub port_tcp: u16,
    pub port_http: u16,
}

impl ProcessAddr {
    pub fn new(host: impl Into<String>, port_tcp: u16, port_http: u16) -> Self {
        Self {
            host: host.into(),
            port_tcp,
            port_http,
        }
    }

    /// `host:port` used for the binary protocol.
    pub fn tcp_endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port_tcp)
    }

    /// `host:port` used for the HTTP API.
    pub fn http_endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port_http)
    }
}
