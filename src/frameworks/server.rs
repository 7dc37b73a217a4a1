// Framework bootstrap for the mesh server runtime.

use crate::domain::{Clock, SystemClock};
use crate::domain::tuning::drift::DriftTuning;
use crate::frameworks::config;
use crate::interface_adapters::net::spawn_snapshot_serializer;
use crate::interface_adapters::routes::router;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    EntityStore, SimulationSettings, StoreSettings, demo_seed, simulation_task,
};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::Notify;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    // build state
    let state = build_state()?;
    let app = router(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state() -> Result<Arc<AppState>> {
    let clock = Arc::new(SystemClock);
    let now = clock.now_millis();
    let operator = config::operator();
    let store = Arc::new(EntityStore::new(
        StoreSettings {
            operator: operator.clone(),
            initial_mode: config::initial_mode(),
            drift: DriftTuning::default(),
        },
        clock,
    ));

    if config::seed_demo() {
        store
            .seed(demo_seed(now))
            .map_err(|e| std::io::Error::other(format!("failed to seed store: {e}")))?;
    }

    let default_key = config::encryption_key();
    tracing::debug!(
        operator_id = %operator.id,
        operator_callsign = %operator.callsign,
        default_key_configured = default_key.is_some(),
        units = store.units().len(),
        "store configured"
    );

    // The simulation runs for the lifetime of the process.
    let simulation = SimulationSettings {
        tick_interval: config::tick_interval(),
        sync_interval: config::sync_interval(),
    };
    tokio::spawn(simulation_task(
        store.clone(),
        simulation,
        Arc::new(Notify::new()),
    ));

    let state = Arc::new(AppState::new(store, default_key));
    spawn_snapshot_serializer(&state);
    Ok(state)
}
