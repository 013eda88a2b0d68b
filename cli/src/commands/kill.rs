//! Kill command - signal a process by PID or by the port it holds.

use anyhow::{bail, Result};
use portscope_core::{OwnerSignalReport, PortScopeEngine, SignalKind};
use serde_json::json;

pub fn run(
    engine: &PortScopeEngine,
    pid: Option<u32>,
    port: Option<u16>,
    force: bool,
    json: bool,
) -> Result<()> {
    let kind = SignalKind::from_force(force);

    match (pid, port) {
        (Some(pid), _) => {
            engine.signal(pid, kind)?;
            if json {
                let output = json!({ "status": "ok", "signal": kind.name(), "pids": [pid] });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("Sent {} to process {}.", kind, pid);
            }
            Ok(())
        }
        (None, Some(port)) => report(&engine.signal_port(port, kind)?, json),
        (None, None) => bail!("either a PID or --port is required"),
    }
}

/// Print what was delivered, then fail if any owner was left untouched.
fn report(report: &OwnerSignalReport, json: bool) -> Result<()> {
    if json {
        let failures: Vec<_> = report
            .failures
            .iter()
            .map(|(pid, e)| json!({ "pid": pid, "error": e.to_string() }))
            .collect();
        let output = json!({
            "status": if report.is_complete() { "ok" } else { "partial" },
            "signal": report.kind.name(),
            "port": report.port,
            "pids": report.signalled,
            "failures": failures,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for pid in &report.signalled {
            println!("Sent {} to process {}.", report.kind, pid);
        }
        for (pid, e) in &report.failures {
            eprintln!("Could not signal process {}: {}", pid, e);
        }
    }

    if !report.is_complete() {
        bail!(
            "{} of {} processes on port {} could not be signalled",
            report.failures.len(),
            report.failures.len() + report.signalled.len(),
            report.port
        );
    }
    Ok(())
}
