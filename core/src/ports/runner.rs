//! External command runner port (interface).

use std::path::Path;

use crate::error::Result;

/// Captured result of one finished utility invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Port for running command-line utilities.
///
/// `Ok` means the process ran to completion, whatever its exit status.
/// `Err` means it could not be spawned or did not finish in time.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &Path,
        args: &[String],
    ) -> impl std::future::Future<Output = Result<CommandOutput>> + Send;
}
