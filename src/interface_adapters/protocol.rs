// Wire protocol DTOs for the dashboard HTTP API and the mesh update socket.
// Field names are camelCase to match the entity shapes the dashboard reads.

use crate::domain::{
    CommandType, ConnectionStatus, Coordinates, MessagePriority, Unit, UnitStatus, UnitType,
};
use crate::use_cases::{MeshSnapshot, NetworkState, NewCommand};
use axum::extract::ws::Utf8Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Messages the server pushes over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage<'a> {
    // Committed units + mesh for one tick (or a mode change).
    MeshUpdate(&'a MeshSnapshot),
}

/// Serializes one committed snapshot as the text frame pushed to sockets.
pub fn encode_mesh_update(snapshot: &MeshSnapshot) -> serde_json::Result<Utf8Bytes> {
    serde_json::to_string(&ServerMessage::MeshUpdate(snapshot)).map(Utf8Bytes::from)
}

/// Body for deploying a new unit; omitted fields take the deploy-dialog defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUnitRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub callsign: String,
    #[serde(rename = "type", default = "default_unit_type")]
    pub unit_type: UnitType,
    #[serde(default = "default_position")]
    pub position: Coordinates,
    #[serde(default)]
    pub status: Option<UnitStatus>,
    #[serde(default)]
    pub connection_status: Option<ConnectionStatus>,
}

fn default_unit_type() -> UnitType {
    UnitType::Infantry
}

fn default_position() -> Coordinates {
    Coordinates {
        lat: 28.218,
        lng: 94.727,
    }
}

impl AddUnitRequest {
    /// Builds the unit with the resolved id; the store stamps `last_update` on deploy.
    pub fn into_unit(self, id: String) -> Unit {
        Unit {
            id,
            callsign: self.callsign.trim().to_string(),
            unit_type: self.unit_type,
            position: self.position,
            status: self.status.unwrap_or(UnitStatus {
                personnel: 100.0,
                condition: 100.0,
                ammo: 100.0,
                fuel: 100.0,
            }),
            last_update: 0,
            connection_status: self.connection_status.unwrap_or(ConnectionStatus::Online),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub priority: MessagePriority,
    // Encrypt before storing; uses `key` or the configured mesh key.
    #[serde(default)]
    pub encrypt: bool,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadMessagesRequest {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCommandRequest {
    #[serde(rename = "type")]
    pub command_type: CommandType,
    #[serde(default)]
    pub target_unit_ids: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub expires_in_secs: Option<u64>,
}

impl From<IssueCommandRequest> for NewCommand {
    fn from(request: IssueCommandRequest) -> Self {
        Self {
            command_type: request.command_type,
            target_unit_ids: request.target_unit_ids,
            description: request.description,
            coordinates: request.coordinates,
            expires_in: request.expires_in_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub mode: ConnectionStatus,
    pub last_sync: Option<u64>,
}

impl From<NetworkState> for NetworkResponse {
    fn from(state: NetworkState) -> Self {
        Self {
            mode: state.mode,
            last_sync: state.last_sync,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedKeyResponse {
    pub key: String,
}
