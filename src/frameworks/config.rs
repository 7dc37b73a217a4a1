use crate::domain::{ConnectionStatus, Operator};
use std::{env, time::Duration};

// Runtime/server configuration read from the environment (after `.env`).

pub fn http_port() -> u16 {
    env::var("MESH_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3010)
}

fn millis_var(name: &str, default: u64) -> Duration {
    let millis = env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default);
    Duration::from_millis(millis)
}

pub fn tick_interval() -> Duration {
    millis_var("MESH_TICK_INTERVAL_MS", 5000)
}

pub fn sync_interval() -> Duration {
    millis_var("MESH_SYNC_INTERVAL_MS", 30_000)
}

pub fn operator() -> Operator {
    let id = env::var("MESH_OPERATOR_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "unit-1".to_string());
    let callsign = env::var("MESH_OPERATOR_CALLSIGN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "Alpha-1".to_string());
    Operator { id, callsign }
}

pub fn initial_mode() -> ConnectionStatus {
    env::var("MESH_INITIAL_MODE")
        .ok()
        .and_then(|v| ConnectionStatus::parse(&v))
        .unwrap_or(ConnectionStatus::MeshOnly)
}

/// Locally remembered mesh password (`meshEncryptionKey`); only non-emptiness is checked.
pub fn encryption_key() -> Option<String> {
    env::var("MESH_ENCRYPTION_KEY")
        .ok()
        .filter(|v| !v.is_empty())
}

pub fn seed_demo() -> bool {
    env::var("MESH_SEED_DEMO")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true)
}
