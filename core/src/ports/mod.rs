//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod probe;
mod runner;
mod signaler;
mod state;

pub use probe::PortProbe;
pub use runner::{CommandOutput, CommandRunner};
pub use signaler::ProcessSignalerPort;
pub use state::SelfPortState;
