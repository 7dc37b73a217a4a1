// Use cases layer: store workflows, the simulation loop and message rendering.

pub mod messages;
pub mod seed;
pub mod simulation;
pub mod store;
pub mod types;

pub use messages::{MessageView, UNREADABLE_PLACEHOLDER, render_messages};
pub use seed::{SeedData, demo_seed};
pub use simulation::{SimulationSettings, simulation_task};
pub use store::{EntityStore, StoreSettings};
pub use types::{MeshSnapshot, NetworkState, NewCommand};
