//! List command - show all bound sockets.

use anyhow::Result;
use chrono::Utc;
use portscope_core::{filter_records, PortScopeEngine, SocketFilter, SocketRecord};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    sockets: &'a [SocketRecord],
    count: usize,
    skipped_rows: usize,
    collected_at: String,
}

pub fn run(
    engine: &PortScopeEngine,
    port: Option<u16>,
    name: Option<String>,
    pid: Option<u32>,
    protocol: Option<String>,
    json: bool,
) -> Result<()> {
    let inventory = engine.snapshot()?;
    let collected_at = Utc::now().to_rfc3339();

    let filter = SocketFilter::new()
        .with_search(name.unwrap_or_default())
        .with_port(port)
        .with_pid(pid)
        .with_protocol(protocol);
    let sockets = filter_records(&inventory.records, &filter);

    if json {
        let output = ListOutput {
            sockets: &sockets,
            count: sockets.len(),
            skipped_rows: inventory.skipped_rows,
            collected_at,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if sockets.is_empty() {
        println!("No sockets found.");
        return Ok(());
    }

    // Table header
    println!(
        "{:<5} {:<6} {:<8} {:<8} {:<16} {:<22} {:<12} {:<4} COMMAND",
        "PROTO", "PORT", "PID", "PPID", "PROCESS", "ADDRESS", "STATE", "TYPE"
    );
    println!("{}", "-".repeat(100));

    for socket in &sockets {
        let ppid = socket.ppid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        let port = if socket.port.is_empty() { "-" } else { &socket.port };

        println!(
            "{:<5} {:<6} {:<8} {:<8} {:<16} {:<22} {:<12} {:<4} {}",
            socket.protocol,
            port,
            socket.pid,
            ppid,
            truncate(&socket.command, 16),
            truncate(&socket.address, 22),
            socket.state.as_deref().unwrap_or("-"),
            socket.process_type().short_label(),
            truncate(&socket.full_command, 40)
        );
    }

    println!("\nTotal: {} sockets", sockets.len());
    if inventory.skipped_rows > 0 {
        println!("Skipped {} unreadable lsof rows", inventory.skipped_rows);
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max - 1).collect();
        format!("{}…", kept)
    }
}
