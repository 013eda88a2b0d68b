//! Port probe port (interface).

/// Port for testing whether a TCP port can currently be bound.
pub trait PortProbe: Send + Sync {
    /// Try to bind `host:port` and release it immediately.
    ///
    /// Returns `true` if the bind succeeded. Nothing is reserved.
    fn try_bind(&self, host: &str, port: u16) -> bool;
}
