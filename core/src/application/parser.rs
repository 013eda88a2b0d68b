//! lsof socket listing parser.
//!
//! Expected lsof output format:
//! ```text
//! COMMAND     PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
//! node      34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
//! mDNSRespo   412  _mdns   8u  IPv4 0x1234567890abcdef      0t0  UDP *:5353
//! ```
//!
//! Rows that cannot be understood are skipped and counted, never fatal.

use serde::Serialize;
use tracing::debug;

use crate::domain::{split_host_port, SocketDetails, SocketRecord};
use crate::ports::CommandRunner;

use super::resolver::ProcessDetailResolver;

/// Number of fixed lsof columns before NAME.
const FIXED_COLUMNS: usize = 8;

/// Result of parsing one lsof listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedInventory {
    /// Records in input order.
    pub records: Vec<SocketRecord>,
    /// Data rows that were dropped as malformed.
    pub skipped_rows: usize,
}

/// Why a data row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than the eight fixed columns.
    TooFewColumns(usize),
    /// PID column was not a positive integer.
    InvalidPid(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewColumns(n) => write!(f, "expected at least 8 columns, found {}", n),
            SkipReason::InvalidPid(pid) => write!(f, "invalid pid '{}'", pid),
        }
    }
}

/// One lsof data row before process enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LsofRow<'a> {
    pub command: &'a str,
    pub pid: u32,
    pub user: &'a str,
    pub fd: &'a str,
    pub socket_type: &'a str,
    pub device: &'a str,
    pub size_off: &'a str,
    pub node: &'a str,
    pub address: String,
    pub state: Option<String>,
}

impl LsofRow<'_> {
    fn into_record(self, ppid: Option<u32>, command_path: String, cwd: String) -> SocketRecord {
        let (host, port) = split_host_port(&self.address);
        let full_command = if command_path.is_empty() {
            self.command.to_string()
        } else {
            command_path
        };

        SocketRecord {
            command: self.command.to_string(),
            pid: self.pid,
            ppid,
            user: self.user.to_string(),
            fd: self.fd.to_string(),
            socket_type: self.socket_type.to_string(),
            protocol: self.node.to_string(),
            address: self.address,
            host,
            port,
            state: self.state,
            full_command,
            cwd,
            details: SocketDetails {
                device: self.device.to_string(),
                size_off: self.size_off.to_string(),
                node: self.node.to_string(),
            },
        }
    }
}

/// Split one data line into its columns.
pub(crate) fn parse_row(line: &str) -> Result<LsofRow<'_>, SkipReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < FIXED_COLUMNS {
        return Err(SkipReason::TooFewColumns(tokens.len()));
    }

    let (fixed, name) = tokens.split_at(FIXED_COLUMNS);
    let mut name = name.to_vec();

    let state = match name.last() {
        Some(last) => last
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .map(str::to_string),
        None => None,
    };
    if state.is_some() {
        name.pop();
    }

    let pid = match fixed[1].parse::<u32>() {
        Ok(pid) if pid > 0 => pid,
        _ => return Err(SkipReason::InvalidPid(fixed[1].to_string())),
    };

    Ok(LsofRow {
        command: fixed[0],
        pid,
        user: fixed[2],
        fd: fixed[3],
        socket_type: fixed[4],
        device: fixed[5],
        size_off: fixed[6],
        node: fixed[7],
        address: name.join(" "),
        state: state.filter(|s| !s.is_empty()),
    })
}

/// Turns lsof text into enriched [`SocketRecord`]s.
pub struct SocketRecordParser<'a, R> {
    resolver: &'a ProcessDetailResolver<R>,
}

impl<'a, R: CommandRunner> SocketRecordParser<'a, R> {
    pub fn new(resolver: &'a ProcessDetailResolver<R>) -> Self {
        Self { resolver }
    }

    /// Parse a full lsof listing. The first non-blank line is the header.
    pub async fn parse(&self, raw: &str) -> ParsedInventory {
        let mut inventory = ParsedInventory::default();

        let rows = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .skip(1);

        for (index, line) in rows.enumerate() {
            let row = match parse_row(line) {
                Ok(row) => row,
                Err(reason) => {
                    debug!(row = index + 1, reason = %reason, "Skipping lsof row");
                    inventory.skipped_rows += 1;
                    continue;
                }
            };

            let details = self.resolver.details(row.pid).await;
            inventory
                .records
                .push(row.into_record(details.ppid, details.command_path, details.cwd));
        }

        if inventory.skipped_rows > 0 {
            debug!(
                parsed = inventory.records.len(),
                skipped = inventory.skipped_rows,
                "Parsed lsof output with skipped rows"
            );
        }

        inventory
    }
}
