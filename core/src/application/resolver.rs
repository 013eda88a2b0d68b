//! Per-PID process metadata lookups using ps and lsof.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::lsof::locate_lsof;
use crate::adapters::locate_utility;
use crate::domain::ProcessDetails;
use crate::ports::CommandRunner;

use super::cache::{DetailCache, DetailField};

/// Well-known ps locations checked after `PATH`.
pub const PS_FALLBACK_PATHS: &[&str] = &["/bin/ps", "/usr/bin/ps"];

/// Resolves parent PID, full command and working directory for a PID.
///
/// Every lookup is best effort: a failing utility yields an empty value, never
/// an error. Results of utilities that ran to completion are memoized in the
/// shared [`DetailCache`]; spawn failures and timeouts are not.
pub struct ProcessDetailResolver<R> {
    runner: R,
    ps_path: Option<PathBuf>,
    lsof_path: Option<PathBuf>,
    cache: Arc<DetailCache>,
}

impl<R: CommandRunner> ProcessDetailResolver<R> {
    /// Create a resolver, locating ps and lsof up front.
    pub fn new(runner: R, cache: Arc<DetailCache>) -> Self {
        Self::with_paths(
            runner,
            cache,
            locate_utility("ps", PS_FALLBACK_PATHS),
            locate_lsof(),
        )
    }

    /// Create a resolver with explicit utility locations (`None` = missing).
    pub fn with_paths(
        runner: R,
        cache: Arc<DetailCache>,
        ps_path: Option<PathBuf>,
        lsof_path: Option<PathBuf>,
    ) -> Self {
        Self {
            runner,
            ps_path,
            lsof_path,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<DetailCache> {
        &self.cache
    }

    /// Gather parent PID, command path and working directory for `pid`.
    pub async fn details(&self, pid: u32) -> ProcessDetails {
        ProcessDetails {
            ppid: self.ppid(pid).await,
            command_path: self.command_path(pid).await,
            cwd: self.cwd(pid).await,
        }
    }

    /// Parent PID via `ps -p PID -o ppid=`.
    pub async fn ppid(&self, pid: u32) -> Option<u32> {
        let value = self.ps_field(pid, DetailField::ParentPid, "ppid=").await;
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            value.parse().ok()
        } else {
            None
        }
    }

    /// Full command line via `ps -p PID -o command=`.
    pub async fn command_path(&self, pid: u32) -> String {
        self.ps_field(pid, DetailField::CommandPath, "command=").await
    }

    /// Working directory via `lsof -a -p PID -d cwd -Fn`.
    ///
    /// Flags explained:
    /// - -a: AND the selections together
    /// - -p PID: Only this process
    /// - -d cwd: Only the current-working-directory descriptor
    /// - -Fn: Field output, one `n`-prefixed name line
    pub async fn cwd(&self, pid: u32) -> String {
        if let Some(cached) = self.cache.get(pid, DetailField::WorkingDir) {
            return cached;
        }

        let Some(lsof) = self.lsof_path.as_deref() else {
            return String::new();
        };

        let args = vec![
            "-a".to_string(),
            "-p".to_string(),
            pid.to_string(),
            "-d".to_string(),
            "cwd".to_string(),
            "-Fn".to_string(),
        ];

        let value = match self.runner.run(lsof, &args).await {
            Ok(output) if output.success => parse_cwd_field(&output.stdout),
            Ok(_) => String::new(),
            Err(e) => {
                debug!(pid = pid, error = %e, "cwd lookup did not complete");
                return String::new();
            }
        };

        self.cache.insert(pid, DetailField::WorkingDir, value.clone());
        value
    }

    async fn ps_field(&self, pid: u32, field: DetailField, format: &str) -> String {
        if let Some(cached) = self.cache.get(pid, field) {
            return cached;
        }

        let Some(ps) = self.ps_path.as_deref() else {
            return String::new();
        };

        let args = vec![
            "-p".to_string(),
            pid.to_string(),
            "-o".to_string(),
            format.to_string(),
        ];

        let value = match self.runner.run(ps, &args).await {
            Ok(output) if output.success => output.stdout.trim().to_string(),
            Ok(_) => String::new(),
            Err(e) => {
                debug!(pid = pid, field = format, error = %e, "ps lookup did not complete");
                return String::new();
            }
        };

        self.cache.insert(pid, field, value.clone());
        value
    }
}

/// Extract the first `n`-prefixed line of lsof field output.
fn parse_cwd_field(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.strip_prefix('n'))
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{test_resolver, FakeRunner};
    use crate::ports::CommandOutput;

    fn scripted_runner() -> FakeRunner {
        let runner = FakeRunner::new();
        runner.respond("ps -p 4242 -o ppid=", CommandOutput::ok("   1\n"));
        runner.respond(
            "ps -p 4242 -o command=",
            CommandOutput::ok("/usr/local/bin/node server.js\n"),
        );
        runner.respond(
            "lsof -a -p 4242 -d cwd -Fn",
            CommandOutput::ok("p4242\nfcwd\nn/Users/dev/app\n"),
        );
        runner
    }

    #[test]
    fn test_parse_cwd_field() {
        assert_eq!(parse_cwd_field("p1\nfcwd\nn/\n"), "/");
        assert_eq!(parse_cwd_field("p1\nfcwd\n"), "");
        assert_eq!(parse_cwd_field(""), "");
    }

    #[tokio::test]
    async fn test_details() {
        let runner = scripted_runner();
        let resolver = test_resolver(runner, Arc::new(DetailCache::default()));

        let details = resolver.details(4242).await;
        assert_eq!(details.ppid, Some(1));
        assert_eq!(details.command_path, "/usr/local/bin/node server.js");
        assert_eq!(details.cwd, "/Users/dev/app");
    }

    #[tokio::test]
    async fn test_lookups_are_memoized() {
        let runner = scripted_runner();
        let cache = Arc::new(DetailCache::default());
        let resolver = test_resolver(runner.clone(), Arc::clone(&cache));

        resolver.details(4242).await;
        assert_eq!(runner.calls().len(), 3);
        assert_eq!(cache.len(), 3);

        let again = resolver.details(4242).await;
        assert_eq!(runner.calls().len(), 3);
        assert_eq!(again.cwd, "/Users/dev/app");
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty_values() {
        let runner = FakeRunner::new();
        runner.respond("ps -p 7 -o ppid=", CommandOutput::failed("no such process"));
        runner.respond("ps -p 7 -o command=", CommandOutput::failed(""));
        runner.respond("lsof -a -p 7 -d cwd -Fn", CommandOutput::failed(""));
        let resolver = test_resolver(runner, Arc::new(DetailCache::default()));

        assert_eq!(resolver.details(7).await, ProcessDetails::default());
    }

    #[tokio::test]
    async fn test_non_numeric_ppid_is_absent() {
        let runner = FakeRunner::new();
        runner.respond("ps -p 9 -o ppid=", CommandOutput::ok("-\n"));
        let resolver = test_resolver(runner, Arc::new(DetailCache::default()));

        assert_eq!(resolver.ppid(9).await, None);
    }

    #[tokio::test]
    async fn test_incomplete_runs_are_not_cached() {
        let runner = FakeRunner::new();
        runner.time_out("ps -p 11 -o command=");
        let cache = Arc::new(DetailCache::default());
        let resolver = test_resolver(runner.clone(), Arc::clone(&cache));

        assert_eq!(resolver.command_path(11).await, "");
        assert!(cache.get(11, DetailField::CommandPath).is_none());

        resolver.command_path(11).await;
        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_utilities() {
        let resolver = ProcessDetailResolver::with_paths(
            FakeRunner::new(),
            Arc::new(DetailCache::default()),
            None,
            None,
        );
        assert_eq!(resolver.details(1).await, ProcessDetails::default());
    }
}
