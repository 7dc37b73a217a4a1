// Topology builder: derives the mesh graph from a unit snapshot.

use crate::domain::{MeshNode, Unit};

/// Two active units are linked when their planar (lat, lng) distance is below this.
pub const MESH_RANGE: f64 = 0.03;

/// Builds one mesh node per unit, in input order.
///
/// Pure function of the snapshot: OFFLINE units are present but inactive and
/// never appear in anyone's connections. Both directions of a link are
/// evaluated independently, which keeps the graph symmetric.
pub fn build_mesh(units: &[Unit]) -> Vec<MeshNode> {
    let mut nodes: Vec<MeshNode> = units
        .iter()
        .map(|unit| MeshNode {
            unit_id: unit.id.clone(),
            callsign: unit.callsign.clone(),
            position: unit.position,
            is_active: unit.connection_status.is_active(),
            connections: Vec::new(),
            last_seen: unit.last_update,
            signal_strength: unit.connection_status.signal_strength(),
        })
        .collect();

    for (i, node) in nodes.iter_mut().enumerate() {
        if !node.is_active {
            continue;
        }
        let from = &units[i];
        node.connections = units
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != i
                    && other.id != from.id
                    && other.connection_status.is_active()
                    && from.position.planar_distance(&other.position) < MESH_RANGE
            })
            .map(|(_, other)| other.id.clone())
            .collect();
    }

    nodes
}
