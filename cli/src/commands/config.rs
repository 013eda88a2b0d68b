//! Config command - show or change the configuration.

use anyhow::Result;
use portscope_core::{ConfigStore, PortScopeEngine};

pub fn show(engine: &PortScopeEngine, store: &ConfigStore, json: bool) -> Result<()> {
    let config = engine.config();

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Config file:           {}", store.config_path().display());
    println!("Host:                  {}", config.host);
    println!("Preferred port:        {}", config.preferred_port);
    println!("Max port attempts:     {}", config.max_port_attempts);
    println!("Command timeout:       {}s", config.command_timeout_secs);
    println!("Detail cache capacity: {}", config.detail_cache_capacity);
    Ok(())
}

pub fn set(
    engine: &PortScopeEngine,
    store: &ConfigStore,
    key: &str,
    value: &str,
    json: bool,
) -> Result<()> {
    let mut config = engine.config().clone();
    config.set(key, value)?;
    engine.save_config(store, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("Saved {} to {}.", key, store.config_path().display());
    }
    Ok(())
}
