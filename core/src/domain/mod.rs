//! Domain layer - Pure data models and text-level parsing helpers.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod process_type;
mod signal;
mod socket;

// Re-export all domain types
pub use process_type::ProcessType;
pub use signal::SignalKind;
pub use socket::{
    filter_records, split_host_port, ProcessDetails, SocketDetails, SocketFilter, SocketRecord,
};
