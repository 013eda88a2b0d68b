//! PortScope Engine - synchronous entry point for hosting layers.
//!
//! The services underneath are async. The engine owns a single-threaded
//! runtime and blocks on each call, so every operation runs to completion on
//! the caller's thread. Callers must not use the engine from inside another
//! tokio runtime.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use crate::adapters::{NixSignaler, SystemCommandRunner, TcpProbe};
use crate::application::{
    signal_owners, DetailCache, OwnerSignalReport, ParsedInventory, SelfPortAllocator,
    SocketInventory,
};
use crate::config::{Config, ConfigStore};
use crate::domain::{SignalKind, SocketRecord};
use crate::error::{Error, Result};
use crate::ports::{ProcessSignalerPort, SelfPortState};

/// The main PortScope engine.
pub struct PortScopeEngine {
    // Components
    inventory: SocketInventory<SystemCommandRunner>,
    signaler: NixSignaler,
    allocator: SelfPortAllocator<TcpProbe>,
    runtime: Runtime,

    config: Config,
}

impl PortScopeEngine {
    /// Create an engine from the configuration at the default location.
    pub fn new() -> Result<Self> {
        Self::from_store(&ConfigStore::new()?)
    }

    /// Create an engine from the configuration in `store`.
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        let runtime = build_runtime()?;
        let config = runtime.block_on(store.load())?;
        Self::assemble(runtime, config)
    }

    /// Create an engine from an in-memory configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Self::assemble(build_runtime()?, config)
    }

    fn assemble(runtime: Runtime, config: Config) -> Result<Self> {
        let cache = Arc::new(DetailCache::new(config.detail_cache_capacity));
        let runner = SystemCommandRunner::with_timeout(config.command_timeout());

        Ok(Self {
            inventory: SocketInventory::new(runner, cache),
            signaler: NixSignaler::new(),
            allocator: SelfPortAllocator::with_max_attempts(TcpProbe::new(), config.max_port_attempts),
            runtime,
            config,
        })
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write `config` to `store`. Takes effect for engines built afterwards.
    pub fn save_config(&self, store: &ConfigStore, config: &Config) -> Result<()> {
        self.runtime.block_on(store.save(config))
    }

    /// Process detail cache shared by every inventory call.
    pub fn detail_cache(&self) -> &Arc<DetailCache> {
        self.inventory.cache()
    }

    // MARK: - Inventory

    /// List every TCP and UDP socket with its owning process.
    pub fn list_sockets(&self) -> Result<Vec<SocketRecord>> {
        self.runtime.block_on(self.inventory.list_sockets())
    }

    /// Like [`list_sockets`](Self::list_sockets), keeping the skipped-row count.
    pub fn snapshot(&self) -> Result<ParsedInventory> {
        self.runtime.block_on(self.inventory.snapshot())
    }

    // MARK: - Process Management

    /// Send a termination signal to a PID.
    pub fn signal(&self, pid: u32, kind: SignalKind) -> Result<()> {
        self.signaler.signal(pid, kind)
    }

    /// Signal every process holding a socket on the given local port.
    ///
    /// Every owner is attempted even when one fails. Fails outright only when
    /// the inventory cannot be read or nothing holds the port.
    pub fn signal_port(&self, port: u16, kind: SignalKind) -> Result<OwnerSignalReport> {
        let pids: BTreeSet<u32> = self
            .list_sockets()?
            .iter()
            .filter(|r| r.port_number() == Some(port))
            .map(|r| r.pid)
            .collect();

        if pids.is_empty() {
            return Err(Error::PortNotInUse(port));
        }

        Ok(signal_owners(&self.signaler, port, pids, kind))
    }

    // MARK: - Self Port

    /// Resolve the port this service should listen on.
    pub fn resolve_own_port<S>(&self, host: &str, preferred: u16, state: &S) -> Result<u16>
    where
        S: SelfPortState + ?Sized,
    {
        self.allocator.resolve(host, preferred, state)
    }
}

fn build_runtime() -> Result<Runtime> {
    // Single-threaded runtime: every call blocks the caller anyway.
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Config(format!("Failed to create runtime: {}", e)))
}
