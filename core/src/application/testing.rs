//! Test doubles shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::ports::{CommandOutput, CommandRunner, PortProbe};

use super::cache::DetailCache;
use super::resolver::ProcessDetailResolver;

#[derive(Default)]
struct Script {
    responses: HashMap<String, CommandOutput>,
    timeouts: HashSet<String>,
    calls: Vec<String>,
}

/// Scripted command runner.
///
/// Invocations are keyed as `"<file name> <args...>"`. Unscripted invocations
/// complete with a failed status and empty output.
#[derive(Clone, Default)]
pub struct FakeRunner {
    script: Arc<Mutex<Script>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, invocation: &str, output: CommandOutput) {
        self.script
            .lock()
            .responses
            .insert(invocation.to_string(), output);
    }

    pub fn time_out(&self, invocation: &str) {
        self.script.lock().timeouts.insert(invocation.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.lock().calls.clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let invocation = std::iter::once(name.clone())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut script = self.script.lock();
        script.calls.push(invocation.clone());

        if script.timeouts.contains(&invocation) {
            return Err(Error::Timeout {
                utility: name,
                secs: 10,
            });
        }

        Ok(script
            .responses
            .get(&invocation)
            .cloned()
            .unwrap_or_else(|| CommandOutput::failed("")))
    }
}

/// Resolver wired to a fake runner with both utilities "present".
pub fn test_resolver(runner: FakeRunner, cache: Arc<DetailCache>) -> ProcessDetailResolver<FakeRunner> {
    ProcessDetailResolver::with_paths(
        runner,
        cache,
        Some(PathBuf::from("/bin/ps")),
        Some(PathBuf::from("/usr/sbin/lsof")),
    )
}

/// Port probe with a fixed set of occupied ports that counts bind attempts.
#[derive(Default)]
pub struct FakeProbe {
    occupied: HashSet<u16>,
    attempts: AtomicUsize,
}

impl FakeProbe {
    pub fn occupied(ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            occupied: ports.into_iter().collect(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl PortProbe for FakeProbe {
    fn try_bind(&self, _host: &str, port: u16) -> bool {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        !self.occupied.contains(&port)
    }
}
