//! Socket inventory application service.

use std::sync::Arc;

use tracing::info;

use crate::adapters::LsofCollector;
use crate::domain::SocketRecord;
use crate::error::Result;
use crate::ports::CommandRunner;

use super::cache::DetailCache;
use super::parser::{ParsedInventory, SocketRecordParser};
use super::resolver::ProcessDetailResolver;

/// Collects lsof output and turns it into enriched socket records.
///
/// Each call is a one-shot snapshot. Only the process detail cache carries
/// over between calls.
pub struct SocketInventory<R> {
    collector: LsofCollector<R>,
    resolver: ProcessDetailResolver<R>,
}

impl<R: CommandRunner + Clone> SocketInventory<R> {
    /// Create an inventory service that locates lsof and ps on this system.
    pub fn new(runner: R, cache: Arc<DetailCache>) -> Self {
        Self {
            collector: LsofCollector::new(runner.clone()),
            resolver: ProcessDetailResolver::new(runner, cache),
        }
    }
}

impl<R: CommandRunner> SocketInventory<R> {
    /// Assemble from explicitly constructed parts.
    pub fn from_parts(collector: LsofCollector<R>, resolver: ProcessDetailResolver<R>) -> Self {
        Self {
            collector,
            resolver,
        }
    }

    pub fn cache(&self) -> &Arc<DetailCache> {
        self.resolver.cache()
    }

    /// Take a snapshot, keeping the skipped-row count.
    pub async fn snapshot(&self) -> Result<ParsedInventory> {
        let raw = self.collector.collect().await?;
        let inventory = SocketRecordParser::new(&self.resolver).parse(&raw).await;

        info!(
            sockets = inventory.records.len(),
            skipped = inventory.skipped_rows,
            "Socket inventory collected"
        );
        Ok(inventory)
    }

    /// Take a snapshot and return only the records.
    pub async fn list_sockets(&self) -> Result<Vec<SocketRecord>> {
        Ok(self.snapshot().await?.records)
    }
}
