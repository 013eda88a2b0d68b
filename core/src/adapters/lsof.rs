//! Socket inventory collection using lsof.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Well-known lsof locations checked after `PATH`.
pub const LSOF_FALLBACK_PATHS: &[&str] =
    &["/usr/sbin/lsof", "/usr/bin/lsof", "/sbin/lsof", "/bin/lsof"];

/// Message used when lsof fails without saying why.
const GENERIC_FAILURE: &str = "Failed to collect socket information.";

/// Locate lsof on this system.
pub fn locate_lsof() -> Option<PathBuf> {
    super::locate_utility("lsof", LSOF_FALLBACK_PATHS)
}

/// Runs lsof once and returns its raw text.
pub struct LsofCollector<R> {
    runner: R,
    lsof_path: Option<PathBuf>,
}

impl<R: CommandRunner> LsofCollector<R> {
    /// Create a collector, locating lsof up front.
    pub fn new(runner: R) -> Self {
        Self::with_path(runner, locate_lsof())
    }

    /// Create a collector with an explicit lsof location (`None` = missing).
    pub fn with_path(runner: R, lsof_path: Option<PathBuf>) -> Self {
        Self { runner, lsof_path }
    }

    pub fn lsof_path(&self) -> Option<&Path> {
        self.lsof_path.as_deref()
    }

    /// Collect all TCP and UDP sockets.
    ///
    /// Executes: `lsof -nP -iTCP -iUDP`
    ///
    /// Flags explained:
    /// - -n: Show IP addresses (don't resolve to hostnames)
    /// - -P: Show port numbers (don't resolve to service names)
    /// - -iTCP -iUDP: Select both TCP and UDP sockets
    pub async fn collect(&self) -> Result<String> {
        let lsof = self
            .lsof_path
            .as_deref()
            .ok_or_else(|| Error::UtilityNotFound("lsof".to_string()))?;

        let args = ["-nP", "-iTCP", "-iUDP"].map(String::from);
        let output = match self.runner.run(lsof, &args).await {
            Ok(output) => output,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::UtilityNotFound("lsof".to_string()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to run lsof");
                return Err(Error::CollectionFailed(format!("Failed to run lsof: {}", e)));
            }
        };

        if !output.success {
            let stderr = output.stderr.trim();
            warn!(stderr = %stderr, "lsof exited with an error");
            let message = if stderr.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                stderr.to_string()
            };
            return Err(Error::CollectionFailed(message));
        }

        debug!(bytes = output.stdout.len(), "Collected lsof output");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeRunner;
    use crate::ports::CommandOutput;

    #[tokio::test]
    async fn test_missing_lsof() {
        let collector = LsofCollector::with_path(FakeRunner::new(), None);
        let result = collector.collect().await;
        assert!(matches!(result, Err(Error::UtilityNotFound(ref name)) if name == "lsof"));
    }

    #[tokio::test]
    async fn test_collect_passes_flags_and_returns_stdout() {
        let runner = FakeRunner::new();
        runner.respond("lsof -nP -iTCP -iUDP", CommandOutput::ok("COMMAND PID\n"));

        let collector = LsofCollector::with_path(runner.clone(), Some(PathBuf::from("/usr/sbin/lsof")));
        let text = collector.collect().await.unwrap();

        assert_eq!(text, "COMMAND PID\n");
        assert_eq!(runner.calls(), vec!["lsof -nP -iTCP -iUDP".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let runner = FakeRunner::new();
        runner.respond(
            "lsof -nP -iTCP -iUDP",
            CommandOutput::failed("lsof: WARNING: can't stat() nfs file system\n"),
        );

        let collector = LsofCollector::with_path(runner, Some(PathBuf::from("/usr/sbin/lsof")));
        match collector.collect().await {
            Err(Error::CollectionFailed(message)) => {
                assert_eq!(message, "lsof: WARNING: can't stat() nfs file system");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_without_stderr_uses_generic_message() {
        let runner = FakeRunner::new();
        runner.respond("lsof -nP -iTCP -iUDP", CommandOutput::failed("  \n"));

        let collector = LsofCollector::with_path(runner, Some(PathBuf::from("/usr/sbin/lsof")));
        match collector.collect().await {
            Err(Error::CollectionFailed(message)) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_a_collection_failure() {
        let runner = FakeRunner::new();
        runner.time_out("lsof -nP -iTCP -iUDP");

        let collector = LsofCollector::with_path(runner, Some(PathBuf::from("/usr/sbin/lsof")));
        assert!(matches!(
            collector.collect().await,
            Err(Error::CollectionFailed(_))
        ));
    }
}
