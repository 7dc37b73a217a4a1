// Domain-level entities shared by the store, the simulation and the wire layer.
// Enum values serialize to their upper-case names because the dashboard uses
// them both as display strings and as state selector keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive bounds for every unit status field.
pub const STATUS_MIN: f64 = 0.0;
pub const STATUS_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Infantry,
    Armor,
    Air,
    Command,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Online,
    MeshOnly,
    Degraded,
    Offline,
}

impl ConnectionStatus {
    /// Next mode in the simulated network cycle, wrapping back to ONLINE.
    pub fn next(self) -> Self {
        match self {
            Self::Online => Self::MeshOnly,
            Self::MeshOnly => Self::Degraded,
            Self::Degraded => Self::Offline,
            Self::Offline => Self::Online,
        }
    }

    /// Signal strength a mesh node reports for this link state.
    pub fn signal_strength(self) -> u8 {
        match self {
            Self::Online => 90,
            Self::MeshOnly => 70,
            Self::Degraded => 40,
            Self::Offline => 0,
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::Offline
    }

    /// Parses the upper-case wire name (e.g. `MESH_ONLY`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ONLINE" => Some(Self::Online),
            "MESH_ONLY" => Some(Self::MeshOnly),
            "DEGRADED" => Some(Self::Degraded),
            "OFFLINE" => Some(Self::Offline),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagePriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    Move,
    Engage,
    Withdraw,
    Hold,
    Reconnect,
}

/// Decimal-degree position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Planar distance over (lat, lng); no geodesic correction.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub personnel: f64,
    pub condition: f64,
    pub ammo: f64,
    pub fuel: f64,
}

impl UnitStatus {
    /// Returns a copy with every field clamped into `[min, max]`.
    pub fn clamped(self, min: f64, max: f64) -> Self {
        Self {
            personnel: self.personnel.clamp(min, max),
            condition: self.condition.clamp(min, max),
            ammo: self.ammo.clamp(min, max),
            fuel: self.fuel.clamp(min, max),
        }
    }

    pub fn fields(&self) -> [f64; 4] {
        [self.personnel, self.condition, self.ammo, self.fuel]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub callsign: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub position: Coordinates,
    pub status: UnitStatus,
    /// Epoch milliseconds of the most recent state change.
    pub last_update: u64,
    pub connection_status: ConnectionStatus,
}

/// Derived connectivity record for one unit; rebuilt every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshNode {
    pub unit_id: String,
    pub callsign: String,
    pub position: Coordinates,
    pub is_active: bool,
    /// Ids of units currently in range, in unit order.
    pub connections: Vec<String>,
    pub last_seen: u64,
    pub signal_strength: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_callsign: String,
    /// Plaintext or an encrypted `nonce:ciphertext` envelope.
    pub content: String,
    pub timestamp: u64,
    pub priority: MessagePriority,
    pub acknowledged: bool,
    pub delivered_to: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: String,
    #[serde(rename = "type")]
    pub command_type: CommandType,
    pub issuer_id: String,
    pub issuer_callsign: String,
    pub target_unit_ids: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    pub acknowledged: bool,
}

/// Local operator identity stamped on outgoing messages and commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: String,
    pub callsign: String,
}
