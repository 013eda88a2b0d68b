//! Runs command-line utilities with a time budget.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::{CommandOutput, CommandRunner};

/// Default time budget for a single utility invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Command runner backed by `tokio::process`.
///
/// The child is killed if it outlives the timeout.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Create a runner with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    /// Create a runner with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        debug!(program = %program.display(), ?args, "Running utility");

        let result = timeout(
            self.timeout,
            Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => Ok(CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => {
                let utility = program
                    .file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or("utility")
                    .to_string();
                warn!(utility = %utility, secs = self.timeout.as_secs(), "Utility timed out");
                Err(Error::Timeout {
                    utility,
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

/// Find an executable by name.
///
/// Searches each `PATH` entry first, then the given well-known locations.
pub fn locate_utility(name: &str, fallbacks: &[&str]) -> Option<PathBuf> {
    let from_path = std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    });

    from_path.or_else(|| {
        fallbacks
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_locate_missing_utility() {
        assert!(locate_utility("definitely-not-a-real-utility-xyz", &[]).is_none());
    }

    #[test]
    fn test_locate_falls_back_to_known_paths() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("fake-tool-for-locate");
        std::fs::write(&tool, "").unwrap();

        let found = locate_utility("fake-tool-for-locate", &[tool.to_str().unwrap()]);
        assert_eq!(found, Some(tool));
    }

    #[tokio::test]
    async fn test_run_captures_output_and_status() {
        let sh = locate_utility("sh", &["/bin/sh"]).unwrap();
        let runner = SystemCommandRunner::new();

        let output = runner
            .run(&sh, &["-c".to_string(), "echo out; echo err >&2".to_string()])
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");

        let output = runner
            .run(&sh, &["-c".to_string(), "exit 3".to_string()])
            .await
            .unwrap();
        assert!(!output.success);
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let sh = locate_utility("sh", &["/bin/sh"]).unwrap();
        let runner = SystemCommandRunner::with_timeout(Duration::from_millis(100));

        let result = runner
            .run(&sh, &["-c".to_string(), "sleep 5".to_string()])
            .await;
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let runner = SystemCommandRunner::new();
        let result = runner
            .run(Path::new("/nonexistent/program-xyz"), &[])
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
