//! Signalling every process that holds a given local port.

use tracing::{info, warn};

use crate::domain::SignalKind;
use crate::error::Error;
use crate::ports::ProcessSignalerPort;

/// Result of signalling the owners of one port.
///
/// Signals that were delivered cannot be taken back, so a failure for one PID
/// never hides the PIDs that were already signalled.
#[derive(Debug)]
pub struct OwnerSignalReport {
    pub port: u16,
    pub kind: SignalKind,
    /// PIDs the signal was delivered to, in ascending order.
    pub signalled: Vec<u32>,
    /// PIDs the signal could not be delivered to, with the reason.
    pub failures: Vec<(u32, Error)>,
}

impl OwnerSignalReport {
    /// True when every owner was signalled.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Send `kind` to each PID, attempting all of them regardless of failures.
pub fn signal_owners<S, I>(signaler: &S, port: u16, pids: I, kind: SignalKind) -> OwnerSignalReport
where
    S: ProcessSignalerPort + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let mut report = OwnerSignalReport {
        port,
        kind,
        signalled: Vec::new(),
        failures: Vec::new(),
    };

    for pid in pids {
        match signaler.signal(pid, kind) {
            Ok(()) => report.signalled.push(pid),
            Err(e) => {
                warn!(port = port, pid = pid, error = %e, "Failed to signal port owner");
                report.failures.push((pid, e));
            }
        }
    }

    info!(
        port = port,
        signal = kind.name(),
        signalled = ?report.signalled,
        failed = report.failures.len(),
        "Signalled port owners"
    );
    report
}
