//! PortScope Core Library
//!
//! Socket inventory and process control built on `lsof` and `ps`.
//! Provides functionality to:
//! - List bound TCP and UDP sockets with their owning processes
//! - Enrich each socket with parent PID, full command and working directory
//! - Send SIGTERM / SIGKILL to a process
//! - Pick a free listen port for the hosting service itself
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models and address parsing
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! The lsof column layout modelled here is the macOS/BSD one, which Linux
//! lsof also prints. Signalling requires a Unix target.

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    filter_records, split_host_port, ProcessDetails, ProcessType, SignalKind, SocketDetails,
    SocketFilter, SocketRecord,
};

// Re-export other commonly used types
pub use adapters::{MemoryPortState, NixSignaler, SystemCommandRunner, TcpProbe};
pub use application::{
    DetailCache, OwnerSignalReport, ParsedInventory, ProcessDetailResolver, SelfPortAllocator,
    SocketInventory,
};
pub use config::{Config, ConfigStore};
pub use engine::PortScopeEngine;
pub use error::{Error, Result};
pub use ports::{PortProbe, SelfPortState};
