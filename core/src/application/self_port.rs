//! Selection of the listen port for the service itself.
//!
//! The first successful choice is written to a [`SelfPortState`] so that a
//! restarted process sharing that state comes back on the same port without
//! probing again.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ports::{PortProbe, SelfPortState};

/// Default number of consecutive ports tried.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Picks a bindable port by sequential probe-binds.
pub struct SelfPortAllocator<P> {
    probe: P,
    max_attempts: u32,
}

impl<P: PortProbe> SelfPortAllocator<P> {
    pub fn new(probe: P) -> Self {
        Self::with_max_attempts(probe, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(probe: P, max_attempts: u32) -> Self {
        Self {
            probe,
            max_attempts,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Resolve the port to listen on.
    ///
    /// A numeric value in `state` wins without any probing. A non-numeric one
    /// is discarded. Otherwise the first bindable port from `preferred` upward
    /// is chosen and stored.
    pub fn resolve<S>(&self, host: &str, preferred: u16, state: &S) -> Result<u16>
    where
        S: SelfPortState + ?Sized,
    {
        if let Some(stored) = state.load().filter(|v| !v.is_empty()) {
            match stored.trim().parse::<u16>() {
                Ok(port) => {
                    debug!(port = port, "Reusing previously assigned port");
                    return Ok(port);
                }
                Err(_) => {
                    warn!(value = %stored, "Discarding invalid assigned port");
                    state.clear();
                }
            }
        }

        let port = self.find_available_port(host, preferred)?;
        state.store(port);

        if port != preferred {
            info!("Port {} is busy, switching to {}.", preferred, port);
        }
        Ok(port)
    }

    /// Probe `preferred`, `preferred + 1`, ... until one binds.
    pub fn find_available_port(&self, host: &str, preferred: u16) -> Result<u16> {
        let mut candidate = Some(preferred);
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let Some(port) = candidate else {
                break;
            };
            if self.probe.try_bind(host, port) {
                return Ok(port);
            }
            attempts += 1;
            candidate = port.checked_add(1);
        }

        Err(Error::NoPortAvailable {
            preferred,
            attempts,
        })
    }
}
