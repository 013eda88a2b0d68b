//! End-to-end checks of the synchronous engine against the real system.

use std::net::TcpListener;

use portscope_core::adapters::lsof::locate_lsof;
use portscope_core::{Config, Error, MemoryPortState, PortScopeEngine, SelfPortState, SignalKind};

fn engine() -> PortScopeEngine {
    PortScopeEngine::with_config(Config::default()).unwrap()
}

#[test]
fn test_resolve_own_port_is_remembered() {
    let holder = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = holder.local_addr().unwrap().port();

    let engine = engine();
    let state = MemoryPortState::new();

    let first = engine.resolve_own_port("127.0.0.1", taken, &state).unwrap();
    assert_ne!(first, taken);
    assert_eq!(state.load(), Some(first.to_string()));

    // Even once the original port frees up, the stored choice is kept.
    drop(holder);
    let second = engine.resolve_own_port("127.0.0.1", taken, &state).unwrap();
    assert_eq!(second, first);
}

#[cfg(unix)]
#[test]
fn test_signal_missing_process() {
    let result = engine().signal(999_999_999, SignalKind::Terminate);
    assert!(matches!(result, Err(Error::ProcessNotFound { .. })));
}

#[test]
fn test_list_sockets_sees_own_listener() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    let engine = engine();

    match engine.list_sockets() {
        Ok(records) => {
            let own = std::process::id();
            let mine = records
                .iter()
                .find(|r| r.pid == own && r.port == port)
                .expect("own listener should be listed");
            assert_eq!(mine.protocol, "TCP");
            assert_eq!(mine.host, "127.0.0.1");
            assert_eq!(mine.state.as_deref(), Some("LISTEN"));
            assert!(!engine.detail_cache().is_empty());
        }
        Err(Error::UtilityNotFound(name)) => {
            assert!(locate_lsof().is_none());
            assert_eq!(name, "lsof");
        }
        // Restricted sandboxes can deny lsof access to sockets.
        Err(Error::CollectionFailed(message)) => assert!(!message.is_empty()),
        Err(other) => panic!("unexpected error: {}", other),
    }
}
