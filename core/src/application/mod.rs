//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

pub mod cache;
mod inventory;
mod owner_signal;
mod parser;
mod resolver;
mod self_port;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{DetailCache, DetailField, DEFAULT_CACHE_CAPACITY};
pub use inventory::SocketInventory;
pub use owner_signal::{signal_owners, OwnerSignalReport};
pub use parser::{ParsedInventory, SkipReason, SocketRecordParser};
pub use resolver::ProcessDetailResolver;
pub use self_port::{SelfPortAllocator, DEFAULT_MAX_ATTEMPTS};
