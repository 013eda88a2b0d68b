//! Port command - choose the listen port for a local service.

use anyhow::Result;
use portscope_core::{ConfigStore, PortScopeEngine, SelfPortState};
use serde_json::json;
use tracing::debug;

use crate::state::FilePortState;

pub fn run(
    engine: &PortScopeEngine,
    store: &ConfigStore,
    host: Option<String>,
    preferred: Option<u16>,
    forget: bool,
    json: bool,
) -> Result<()> {
    let config = engine.config();
    let host = host.unwrap_or_else(|| config.host.clone());
    let preferred = preferred.unwrap_or(config.preferred_port);

    let state = FilePortState::beside(store.config_path());
    if forget {
        debug!(path = %state.path().display(), "Forgetting assigned port");
        state.clear();
    }

    debug!(host = %host, preferred = preferred, "Resolving own listen port");
    let port = engine.resolve_own_port(&host, preferred, &state)?;

    if json {
        let output = json!({
            "host": host,
            "preferred": preferred,
            "port": port,
            "stateFile": state.path().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", port);
    }
    Ok(())
}
