// Domain layer: core entities, topology and messaging crypto.

pub mod crypto;
pub mod entities;
pub mod errors;
pub mod mesh;
pub mod ports;
pub mod systems;
pub mod tuning;

pub use entities::{
    Command, CommandType, ConnectionStatus, Coordinates, MeshNode, Message, MessagePriority,
    Operator, Unit, UnitStatus, UnitType,
};
pub use errors::{DecryptError, EncryptError, StoreError};
pub use ports::{Clock, SystemClock};
