use crate::interface_adapters::protocol::encode_mesh_update;
use crate::use_cases::EntityStore;
use axum::extract::ws::Utf8Bytes;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::error;

pub struct AppState {
    // Single owner of units, messages and commands.
    pub store: Arc<EntityStore>,
    // Mesh password used when a request does not carry its own key.
    pub default_key: Option<Arc<str>>,
    // Latest serialized mesh update, shared across all sockets.
    pub snapshot_bytes_tx: watch::Sender<Utf8Bytes>,
}

impl AppState {
    pub fn new(store: Arc<EntityStore>, default_key: Option<String>) -> Self {
        // Seed with the current snapshot so sockets never wait for the first tick.
        let initial = encode_mesh_update(&store.snapshot()).unwrap_or_else(|e| {
            error!(error = ?e, "failed to serialize initial mesh update");
            Utf8Bytes::from("")
        });
        let (snapshot_bytes_tx, _snapshot_bytes_rx) = watch::channel(initial);
        Self {
            store,
            default_key: default_key.map(Arc::from),
            snapshot_bytes_tx,
        }
    }

    /// Request key when present and non-empty, otherwise the configured key.
    pub fn resolve_key<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested
            .filter(|key| !key.is_empty())
            .or(self.default_key.as_deref())
    }
}
