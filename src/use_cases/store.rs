// Entity store: the single owner of units, messages and commands.
//
// Every mutation happens under one mutex. Unit/mesh reads go through a watch
// channel holding the last committed snapshot, so readers never block on a
// tick and never observe one half-applied.

use crate::domain::crypto;
use crate::domain::entities::{STATUS_MAX, STATUS_MIN};
use crate::domain::mesh::build_mesh;
use crate::domain::systems::drift::tick_unit;
use crate::domain::tuning::drift::DriftTuning;
use crate::domain::{
    Clock, Command, ConnectionStatus, Message, MessagePriority, Operator, StoreError, Unit,
};
use crate::use_cases::seed::SeedData;
use crate::use_cases::types::{MeshSnapshot, NetworkState, NewCommand};
use rand::Rng;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info};

/// Settings injected at construction; one store is one simulated network.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Identity stamped on messages and commands sent from this node.
    pub operator: Operator,
    /// Global network mode the store starts in.
    pub initial_mode: ConnectionStatus,
    pub drift: DriftTuning,
}

struct StoreInner {
    units: Vec<Unit>,
    // Most recent first.
    messages: VecDeque<Message>,
    commands: VecDeque<Command>,
    network: NetworkState,
    tick: u64,
    next_seq: u64,
}

pub struct EntityStore {
    clock: Arc<dyn Clock>,
    operator: Operator,
    drift: DriftTuning,
    inner: Mutex<StoreInner>,
    snapshot_tx: watch::Sender<Arc<MeshSnapshot>>,
}

impl EntityStore {
    pub fn new(settings: StoreSettings, clock: Arc<dyn Clock>) -> Self {
        let network = NetworkState {
            mode: settings.initial_mode,
            last_sync: (settings.initial_mode == ConnectionStatus::Online)
                .then(|| clock.now_millis()),
        };
        let (snapshot_tx, _snapshot_rx) = watch::channel(Arc::new(MeshSnapshot {
            tick: 0,
            units: Vec::new(),
            mesh: Vec::new(),
            network,
        }));

        Self {
            clock,
            operator: settings.operator,
            drift: settings.drift,
            inner: Mutex::new(StoreInner {
                units: Vec::new(),
                messages: VecDeque::new(),
                commands: VecDeque::new(),
                network,
                tick: 0,
                next_seq: 1,
            }),
            snapshot_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A panic mid-mutation leaves plain data behind; keep serving it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Must be called with the lock held so snapshots are published in commit order.
    fn publish(&self, inner: &StoreInner) -> Arc<MeshSnapshot> {
        let snapshot = Arc::new(MeshSnapshot {
            tick: inner.tick,
            units: inner.units.clone(),
            mesh: build_mesh(&inner.units),
            network: inner.network,
        });
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn next_id(&self, inner: &mut StoreInner, prefix: &str, now: u64) -> String {
        let seq = inner.next_seq;
        inner.next_seq += 1;
        format!("{prefix}-{now}-{seq}")
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Latest committed units + mesh.
    pub fn snapshot(&self) -> Arc<MeshSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MeshSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn units(&self) -> Vec<Unit> {
        self.snapshot().units.clone()
    }

    /// Messages, most recent first.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.iter().cloned().collect()
    }

    /// Commands, most recent first.
    pub fn commands(&self) -> Vec<Command> {
        self.lock().commands.iter().cloned().collect()
    }

    pub fn network(&self) -> NetworkState {
        self.lock().network
    }

    /// Loads initial units, messages and commands (messages/commands most recent first).
    pub fn seed(&self, seed: SeedData) -> Result<(), StoreError> {
        for unit in seed.units {
            self.add_unit(unit)?;
        }
        let mut inner = self.lock();
        inner.messages.extend(seed.messages);
        inner.commands.extend(seed.commands);
        Ok(())
    }

    /// Deploys a unit. Status fields are clamped into [0, 100].
    pub fn add_unit(&self, mut unit: Unit) -> Result<Unit, StoreError> {
        let mut inner = self.lock();
        if inner.units.iter().any(|u| u.id == unit.id) {
            return Err(StoreError::DuplicateUnit(unit.id));
        }

        unit.status = unit.status.clamped(STATUS_MIN, STATUS_MAX);
        inner.units.push(unit.clone());
        self.publish(&inner);

        info!(unit_id = %unit.id, callsign = %unit.callsign, unit_type = ?unit.unit_type, "unit deployed");
        Ok(unit)
    }

    /// Deploys a unit arriving now; `last_update` is stamped from the store clock.
    pub fn deploy_unit(&self, mut unit: Unit) -> Result<Unit, StoreError> {
        unit.last_update = self.clock.now_millis();
        self.add_unit(unit)
    }

    /// Appends a message from the local operator.
    pub fn send_message(
        &self,
        content: String,
        priority: MessagePriority,
    ) -> Result<Message, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let now = self.clock.now_millis();
        let mut inner = self.lock();
        let message = Message {
            id: self.next_id(&mut inner, "msg", now),
            sender_id: self.operator.id.clone(),
            sender_callsign: self.operator.callsign.clone(),
            content,
            timestamp: now,
            priority,
            acknowledged: false,
            delivered_to: BTreeSet::new(),
        };
        inner.messages.push_front(message.clone());

        info!(message_id = %message.id, priority = ?message.priority, "message sent");
        Ok(message)
    }

    /// Encrypts `content` with `password` and sends the envelope.
    ///
    /// An encryption failure aborts the send; nothing is appended.
    pub fn send_encrypted_message(
        &self,
        content: &str,
        priority: MessagePriority,
        password: &str,
    ) -> Result<Message, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let envelope = crypto::encrypt(content, password)?;
        self.send_message(envelope, priority)
    }

    pub fn issue_command(&self, request: NewCommand) -> Result<Command, StoreError> {
        // Dedupe while keeping the caller's order.
        let mut seen = HashSet::new();
        let target_unit_ids: Vec<String> = request
            .target_unit_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();
        if target_unit_ids.is_empty() {
            return Err(StoreError::EmptyTargets);
        }

        let now = self.clock.now_millis();
        let mut inner = self.lock();
        let command = Command {
            id: self.next_id(&mut inner, "cmd", now),
            command_type: request.command_type,
            issuer_id: self.operator.id.clone(),
            issuer_callsign: self.operator.callsign.clone(),
            target_unit_ids,
            description: request.description,
            coordinates: request.coordinates,
            timestamp: now,
            expires_at: request.expires_in.map(|ttl| {
                let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
                now.saturating_add(ttl_millis)
            }),
            acknowledged: false,
        };
        inner.commands.push_front(command.clone());

        info!(
            command_id = %command.id,
            command_type = ?command.command_type,
            targets = command.target_unit_ids.len(),
            "command issued"
        );
        Ok(command)
    }

    pub fn acknowledge_message(&self, id: &str) -> Result<Message, StoreError> {
        let mut inner = self.lock();
        let message = inner
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::MessageNotFound(id.to_string()))?;
        message.acknowledged = true;
        Ok(message.clone())
    }

    pub fn acknowledge_command(&self, id: &str) -> Result<Command, StoreError> {
        let mut inner = self.lock();
        let command = inner
            .commands
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::CommandNotFound(id.to_string()))?;
        command.acknowledged = true;
        Ok(command.clone())
    }

    /// Advances the global mode ONLINE → MESH_ONLY → DEGRADED → OFFLINE → ONLINE.
    ///
    /// Returns the network state committed by this toggle.
    pub fn toggle_network_mode(&self) -> NetworkState {
        let mut inner = self.lock();
        let mode = inner.network.mode.next();
        inner.network.mode = mode;
        if mode == ConnectionStatus::Online {
            inner.network.last_sync = Some(self.clock.now_millis());
        }
        self.publish(&inner);

        info!(mode = ?mode, "network mode toggled");
        inner.network
    }

    /// Stamps the last sync time while the global mode is ONLINE.
    pub fn record_sync(&self) -> Option<u64> {
        let mut inner = self.lock();
        if inner.network.mode != ConnectionStatus::Online {
            return None;
        }
        let now = self.clock.now_millis();
        inner.network.last_sync = Some(now);
        self.publish(&inner);
        Some(now)
    }

    /// Runs one simulation step: drift every unit, then rebuild the mesh from
    /// the drifted units and publish both together.
    pub fn run_tick<R: Rng>(&self, rng: &mut R) -> Arc<MeshSnapshot> {
        let now = self.clock.now_millis();
        let mut inner = self.lock();
        for unit in inner.units.iter_mut() {
            tick_unit(unit, rng, now, self.drift);
        }
        inner.tick += 1;
        let snapshot = self.publish(&inner);

        debug!(
            tick = snapshot.tick,
            units = snapshot.units.len(),
            links = snapshot.mesh.iter().map(|n| n.connections.len()).sum::<usize>() / 2,
            "simulation tick"
        );
        snapshot
    }
}
