//! Remembered self-port state port (interface).

/// Port for the process-wide "already chosen" listen port.
///
/// The stored value is raw text so that a corrupt value can be detected and
/// discarded by the allocator.
pub trait SelfPortState: Send + Sync {
    /// The previously stored value, if any.
    fn load(&self) -> Option<String>;

    /// Remember the chosen port.
    fn store(&self, port: u16);

    /// Forget any stored value.
    fn clear(&self);
}
