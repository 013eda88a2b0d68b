//! Process signalling via `kill(2)`.
//!
//! - SIGTERM for [`SignalKind::Terminate`]
//! - SIGKILL for [`SignalKind::ForceKill`]
//!
//! One attempt per call. Delivery does not mean the process has exited.

use tracing::{debug, warn};

use crate::domain::SignalKind;
use crate::error::{Error, Result};
use crate::ports::ProcessSignalerPort;

/// Unix signaler backed by `nix`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NixSignaler;

impl NixSignaler {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessSignalerPort for NixSignaler {
    #[cfg(unix)]
    fn signal(&self, pid: u32, kind: SignalKind) -> Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        // 0 and negative values address process groups, never a single process.
        let raw = match i32::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => {
                return Err(Error::SignalFailed {
                    pid,
                    reason: format!("{} is not a valid process id", pid),
                })
            }
        };

        let signal = match kind {
            SignalKind::Terminate => Signal::SIGTERM,
            SignalKind::ForceKill => Signal::SIGKILL,
        };

        debug!(pid = pid, signal = kind.name(), "Sending signal to process");

        match kill(Pid::from_raw(raw), signal) {
            Ok(()) => {
                debug!(pid = pid, signal = kind.name(), "Signal sent successfully");
                Ok(())
            }
            Err(Errno::ESRCH) => {
                debug!(pid = pid, "Process not found");
                Err(Error::ProcessNotFound { pid })
            }
            Err(Errno::EPERM) => {
                warn!(pid = pid, "Permission denied to signal process");
                Err(Error::PermissionDenied { pid })
            }
            Err(errno) => {
                warn!(pid = pid, error = %errno, "Failed to send signal");
                Err(Error::SignalFailed {
                    pid,
                    reason: errno.desc().to_string(),
                })
            }
        }
    }

    #[cfg(not(unix))]
    fn signal(&self, pid: u32, _kind: SignalKind) -> Result<()> {
        Err(Error::SignalFailed {
            pid,
            reason: "signal delivery is not supported on this platform".to_string(),
        })
    }
}
