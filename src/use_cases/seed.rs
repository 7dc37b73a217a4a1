// Demo deployment used when the server starts with seeding enabled.

use crate::domain::{
    Command, CommandType, ConnectionStatus, Coordinates, Message, MessagePriority, Unit,
    UnitStatus, UnitType,
};
use std::collections::BTreeSet;

const MINUTE_MS: u64 = 60_000;

/// Initial store contents; messages and commands are most recent first.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub units: Vec<Unit>,
    pub messages: Vec<Message>,
    pub commands: Vec<Command>,
}

fn status(personnel: f64, condition: f64, ammo: f64, fuel: f64) -> UnitStatus {
    UnitStatus {
        personnel,
        condition,
        ammo,
        fuel,
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn unit(
    id: &str,
    callsign: &str,
    unit_type: UnitType,
    (lat, lng): (f64, f64),
    status: UnitStatus,
    last_update: u64,
    connection_status: ConnectionStatus,
) -> Unit {
    Unit {
        id: id.to_string(),
        callsign: callsign.to_string(),
        unit_type,
        position: Coordinates { lat, lng },
        status,
        last_update,
        connection_status,
    }
}

fn message(
    id: &str,
    sender: (&str, &str),
    content: &str,
    timestamp: u64,
    priority: MessagePriority,
    acknowledged: bool,
    delivered_to: &[&str],
) -> Message {
    Message {
        id: id.to_string(),
        sender_id: sender.0.to_string(),
        sender_callsign: sender.1.to_string(),
        content: content.to_string(),
        timestamp,
        priority,
        acknowledged,
        delivered_to: delivered_to.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>(),
    }
}

/// Five-unit deployment around the Alpha-1 command post.
pub fn demo_seed(now: u64) -> SeedData {
    let ago = |minutes: u64| now.saturating_sub(minutes * MINUTE_MS);

    let units = vec![
        unit(
            "unit-1",
            "Alpha-1",
            UnitType::Command,
            (28.218, 94.727),
            status(45.0, 92.0, 78.0, 85.0),
            now,
            ConnectionStatus::Online,
        ),
        unit(
            "unit-2",
            "Bravo-2",
            UnitType::Infantry,
            (28.224, 94.735),
            status(32.0, 65.0, 42.0, 50.0),
            ago(20),
            ConnectionStatus::MeshOnly,
        ),
        unit(
            "unit-3",
            "Charlie-3",
            UnitType::Armor,
            (28.210, 94.720),
            status(18.0, 88.0, 75.0, 30.0),
            ago(5),
            ConnectionStatus::MeshOnly,
        ),
        unit(
            "unit-4",
            "Delta-4",
            UnitType::Support,
            (28.205, 94.738),
            status(24.0, 95.0, 90.0, 85.0),
            ago(120),
            ConnectionStatus::Offline,
        ),
        unit(
            "unit-5",
            "Echo-5",
            UnitType::Air,
            (28.230, 94.710),
            status(8.0, 75.0, 60.0, 45.0),
            ago(2),
            ConnectionStatus::Degraded,
        ),
    ];

    let messages = vec![
        message(
            "msg-2",
            ("unit-3", "Charlie-3"),
            "Enemy movement detected at north ridge.",
            ago(5),
            MessagePriority::Critical,
            false,
            &["unit-1", "unit-2"],
        ),
        message(
            "msg-1",
            ("unit-1", "Alpha-1"),
            "All units regroup at checkpoint Bravo.",
            ago(10),
            MessagePriority::High,
            true,
            &["unit-2", "unit-3", "unit-5"],
        ),
        message(
            "msg-3",
            ("unit-2", "Bravo-2"),
            "Supply drop received. Ammo restocked.",
            ago(15),
            MessagePriority::Medium,
            true,
            &["unit-1"],
        ),
    ];

    let commands = vec![
        Command {
            id: "cmd-2".to_string(),
            command_type: CommandType::Engage,
            issuer_id: "unit-1".to_string(),
            issuer_callsign: "Alpha-1".to_string(),
            target_unit_ids: ids(&["unit-5"]),
            description: "Provide air support at marked location".to_string(),
            coordinates: Some(Coordinates {
                lat: 28.215,
                lng: 94.722,
            }),
            timestamp: ago(5),
            expires_at: None,
            acknowledged: false,
        },
        Command {
            id: "cmd-1".to_string(),
            command_type: CommandType::Move,
            issuer_id: "unit-1".to_string(),
            issuer_callsign: "Alpha-1".to_string(),
            target_unit_ids: ids(&["unit-2", "unit-3"]),
            description: "Proceed to hill 42 and establish defensive position".to_string(),
            coordinates: Some(Coordinates {
                lat: 28.220,
                lng: 94.740,
            }),
            timestamp: ago(15),
            expires_at: Some(now + 60 * MINUTE_MS),
            acknowledged: true,
        },
        Command {
            id: "cmd-3".to_string(),
            command_type: CommandType::Reconnect,
            issuer_id: "unit-1".to_string(),
            issuer_callsign: "Alpha-1".to_string(),
            target_unit_ids: ids(&["unit-4"]),
            description: "Restore communications with base".to_string(),
            coordinates: None,
            timestamp: ago(30),
            expires_at: None,
            acknowledged: false,
        },
    ];

    SeedData {
        units,
        messages,
        commands,
    }
}
