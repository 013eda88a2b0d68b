//! Process signaler port (interface).

use crate::domain::SignalKind;
use crate::error::Result;

/// Port for delivering termination signals.
///
/// Implementations make exactly one delivery attempt and classify failures as
/// `ProcessNotFound`, `PermissionDenied` or `SignalFailed`. Success only means
/// the signal was sent.
pub trait ProcessSignalerPort: Send + Sync {
    fn signal(&self, pid: u32, kind: SignalKind) -> Result<()>;
}
