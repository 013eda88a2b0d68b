//! Example: List every bound socket with its owning process.

use portscope_core::{Config, PortScopeEngine};

fn main() {
    println!("Collecting sockets...\n");

    let engine = match PortScopeEngine::with_config(Config::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error creating engine: {}", e);
            return;
        }
    };

    match engine.snapshot() {
        Ok(inventory) => {
            if inventory.records.is_empty() {
                println!("No sockets found.");
                return;
            }

            println!(
                "{:<5} {:<8} {:<8} {:<20} {:<25} {:<12} {}",
                "PROTO", "PID", "PPID", "PROCESS", "ADDRESS", "STATE", "CWD"
            );
            println!("{}", "-".repeat(100));

            for record in &inventory.records {
                let ppid = record.ppid.map(|p| p.to_string()).unwrap_or_default();
                println!(
                    "{:<5} {:<8} {:<8} {:<20} {:<25} {:<12} {}",
                    record.protocol,
                    record.pid,
                    ppid,
                    record.command.chars().take(20).collect::<String>(),
                    record.address,
                    record.state.as_deref().unwrap_or(""),
                    record.cwd
                );
            }

            println!(
                "\nTotal: {} sockets ({} rows skipped)",
                inventory.records.len(),
                inventory.skipped_rows
            );
        }
        Err(e) => {
            eprintln!("Error listing sockets: {}", e);
        }
    }
}
