//! TCP bind probe.

use std::net::TcpListener;

use tracing::debug;

use crate::ports::PortProbe;

/// Probes ports by binding a throwaway `TcpListener`.
///
/// The listener is dropped right away, so another process can still take the
/// port before the caller binds it for real.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpProbe;

impl TcpProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PortProbe for TcpProbe {
    fn try_bind(&self, host: &str, port: u16) -> bool {
        match TcpListener::bind((host, port)) {
            Ok(listener) => {
                drop(listener);
                true
            }
            Err(e) => {
                debug!(host = host, port = port, error = %e, "Port is not bindable");
                false
            }
        }
    }
}
