//! Signal kinds an operator can send to a socket's owning process.

use serde::{Deserialize, Serialize};

/// Which termination signal to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    /// Polite termination request (SIGTERM). The target may ignore it.
    Terminate,
    /// Immediate termination (SIGKILL).
    ForceKill,
}

impl SignalKind {
    /// Pick the kind from a `--force` style flag.
    pub fn from_force(force: bool) -> Self {
        if force {
            SignalKind::ForceKill
        } else {
            SignalKind::Terminate
        }
    }

    /// Conventional signal name.
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Terminate => "SIGTERM",
            SignalKind::ForceKill => "SIGKILL",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
