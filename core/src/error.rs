//! Error types for the portscope-core library.

use thiserror::Error;

/// Result type alias for portscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during socket inventory, signalling and port selection.
#[derive(Error, Debug)]
pub enum Error {
    /// A required system utility could not be located.
    #[error("The '{0}' command is required but was not found on this system.")]
    UtilityNotFound(String),

    /// The socket-listing utility ran but did not succeed.
    #[error("{0}")]
    CollectionFailed(String),

    /// An external utility did not finish within its time budget.
    #[error("'{utility}' did not finish within {secs}s")]
    Timeout { utility: String, secs: u64 },

    /// No process exists with the given PID.
    #[error("Process {pid} was not found.")]
    ProcessNotFound { pid: u32 },

    /// The caller lacks the privilege to signal the process.
    #[error("Insufficient permissions to signal process {pid}.")]
    PermissionDenied { pid: u32 },

    /// Signal delivery failed for any other reason.
    #[error("Failed to signal process {pid}: {reason}")]
    SignalFailed { pid: u32, reason: String },

    /// No socket is bound to the requested local port.
    #[error("No process is using port {0}.")]
    PortNotInUse(u16),

    /// Every probed port was already taken.
    #[error("No free port found starting at {preferred} after {attempts} attempts.")]
    NoPortAvailable { preferred: u16, attempts: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
