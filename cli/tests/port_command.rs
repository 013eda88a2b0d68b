//! Runs the `portscope` binary to check the port choice survives between runs.

use std::net::TcpListener;
use std::path::Path;
use std::process::Command;

fn run_port(config: &Path, preferred: u16, extra: &[&str]) -> u16 {
    let output = Command::new(env!("CARGO_BIN_EXE_portscope"))
        .arg("--config")
        .arg(config)
        .args(["port", "--host", "127.0.0.1", "--preferred"])
        .arg(preferred.to_string())
        .args(extra)
        .env_remove("HOST")
        .env_remove("PORT")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "portscope port failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}

#[test]
fn test_port_is_remembered_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    let holder = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = holder.local_addr().unwrap().port();

    let first = run_port(&config, taken, &[]);
    assert_ne!(first, taken);

    // The preferred port is free now, but the earlier choice still wins.
    drop(holder);
    let second = run_port(&config, taken, &[]);
    assert_eq!(second, first);
    assert!(dir.path().join("assigned-port").exists());
}

#[test]
fn test_forget_probes_again() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    let holder = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = holder.local_addr().unwrap().port();
    let first = run_port(&config, taken, &[]);
    assert_ne!(first, taken);

    drop(holder);
    let again = run_port(&config, taken, &["--forget"]);
    assert_eq!(again, taken);
}
