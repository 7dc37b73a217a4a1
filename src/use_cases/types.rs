// Use-case level outputs shared by the store, the simulation and the adapters.

use crate::domain::{CommandType, ConnectionStatus, Coordinates, MeshNode, Unit};
use serde::Serialize;
use std::time::Duration;

/// Process-wide simulated link mode plus the last successful sync time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub mode: ConnectionStatus,
    pub last_sync: Option<u64>,
}

/// Committed view of one tick: units and the mesh built from exactly those units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshSnapshot {
    pub tick: u64,
    pub units: Vec<Unit>,
    pub mesh: Vec<MeshNode>,
    pub network: NetworkState,
}

/// Input for issuing a command; issuer and timestamps are stamped by the store.
#[derive(Debug, Clone)]
pub struct NewCommand {
    pub command_type: CommandType,
    pub target_unit_ids: Vec<String>,
    pub description: String,
    pub coordinates: Option<Coordinates>,
    pub expires_in: Option<Duration>,
}
