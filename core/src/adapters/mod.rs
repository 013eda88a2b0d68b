//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with one external system.

pub mod command;
pub mod lsof;
pub mod probe;
pub mod signal;
pub mod state;

// Re-export main types for convenience
pub use command::{locate_utility, SystemCommandRunner};
pub use lsof::LsofCollector;
pub use probe::TcpProbe;
pub use signal::NixSignaler;
pub use state::MemoryPortState;
