//! Socket and process domain models.

use serde::{Deserialize, Serialize};

use super::ProcessType;

// ============================================================================
// SocketRecord
// ============================================================================

/// Low-level lsof columns carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketDetails {
    /// DEVICE column (kernel socket address on macOS).
    pub device: String,
    /// SIZE/OFF column.
    pub size_off: String,
    /// NODE column.
    pub node: String,
}

/// One socket-to-process binding, enriched with process metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRecord {
    /// Short process name as printed by lsof.
    pub command: String,
    /// Process ID owning the socket. Always positive.
    pub pid: u32,
    /// Parent process ID, if it could be resolved.
    pub ppid: Option<u32>,
    /// Username of the process owner.
    pub user: String,
    /// File descriptor label (e.g. `19u`).
    pub fd: String,
    /// Socket type label (e.g. `IPv4`, `IPv6`).
    #[serde(rename = "type")]
    pub socket_type: String,
    /// Protocol label (the NODE column, e.g. `TCP`, `UDP`).
    pub protocol: String,
    /// Raw NAME column without the trailing state.
    pub address: String,
    /// Local host part of the address.
    pub host: String,
    /// Local port as text: digits, `*`, or empty when unparseable.
    pub port: String,
    /// Connection state such as `LISTEN`, when lsof printed one.
    pub state: Option<String>,
    /// Full command line, falling back to `command`.
    pub full_command: String,
    /// Working directory of the process, empty if unresolved.
    pub cwd: String,
    /// Passthrough lsof columns.
    pub details: SocketDetails,
}

impl SocketRecord {
    /// Numeric port, when the port text is a plain number.
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// Detect the process type based on the short command name.
    pub fn process_type(&self) -> ProcessType {
        ProcessType::detect(&self.command)
    }

    /// Check if this record matches a free-text search query.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        self.command.to_lowercase().contains(&query_lower)
            || self.port.contains(&query_lower)
            || self.pid.to_string().contains(&query_lower)
            || self.host.to_lowercase().contains(&query_lower)
            || self.user.to_lowercase().contains(&query_lower)
            || self.full_command.to_lowercase().contains(&query_lower)
    }
}

impl std::fmt::Display for SocketRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (PID: {}, Process: {})",
            self.protocol, self.address, self.pid, self.command
        )
    }
}

/// Per-process metadata looked up by PID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDetails {
    pub ppid: Option<u32>,
    pub command_path: String,
    pub cwd: String,
}

// ============================================================================
// Address parsing
// ============================================================================

/// Split an lsof NAME value into its local host and port.
///
/// Handles:
/// - IPv4: `127.0.0.1:8080`, `*:5353`
/// - IPv6: `[::1]:8080`, `[fe80::1]`
/// - Connections: `127.0.0.1:8080->192.168.1.1:443` (local side only)
///
/// An empty host falls back to the untouched input.
pub fn split_host_port(address: &str) -> (String, String) {
    if address.is_empty() {
        return (String::new(), String::new());
    }

    let local = match address.split_once("->") {
        Some((local, _)) => local,
        None => address,
    };

    let bracketed = local
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'));

    let (host, port) = match bracketed {
        Some((host, tail)) => (host, tail.strip_prefix(':').unwrap_or("")),
        None => match local.rsplit_once(':') {
            Some((host, port)) => (host, port),
            None => (local, ""),
        },
    };

    let host = if host.is_empty() { address } else { host };
    (host.to_string(), port.to_string())
}

// ============================================================================
// SocketFilter
// ============================================================================

/// Filter criteria for socket listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketFilter {
    /// Text to search across record fields.
    #[serde(default)]
    pub search_text: String,
    /// Exact local port.
    #[serde(default)]
    pub port: Option<u16>,
    /// Exact owning PID.
    #[serde(default)]
    pub pid: Option<u32>,
    /// Protocol label, compared case-insensitively.
    #[serde(default)]
    pub protocol: Option<String>,
}

impl SocketFilter {
    /// Create a new filter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the filter has any active conditions.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || self.port.is_some()
            || self.pid.is_some()
            || self.protocol.is_some()
    }

    /// Check if a record matches all filter criteria.
    pub fn matches(&self, record: &SocketRecord) -> bool {
        if !record.matches_search(&self.search_text) {
            return false;
        }
        if let Some(port) = self.port {
            if record.port_number() != Some(port) {
                return false;
            }
        }
        if let Some(pid) = self.pid {
            if record.pid != pid {
                return false;
            }
        }
        if let Some(ref protocol) = self.protocol {
            if !record.protocol.eq_ignore_ascii_case(protocol) {
                return false;
            }
        }
        true
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Restrict to one local port.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Restrict to one PID.
    pub fn with_pid(mut self, pid: Option<u32>) -> Self {
        self.pid = pid;
        self
    }

    /// Restrict to one protocol.
    pub fn with_protocol(mut self, protocol: Option<String>) -> Self {
        self.protocol = protocol;
        self
    }
}

/// Apply a filter to a list of records, keeping their order.
pub fn filter_records(records: &[SocketRecord], filter: &SocketFilter) -> Vec<SocketRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
