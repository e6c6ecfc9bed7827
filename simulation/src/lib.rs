pub mod broad_phase;
pub mod config;
pub mod entity;
pub mod error;
pub mod frame_timer;
pub mod registry;
pub mod simulation;
pub mod visibility;

pub use config::{SimulationConfig, SpawnConfig};
pub use entity::{Entity, EntityId};
pub use error::{SimulationError, SimulationResult};
pub use simulation::{Simulation, TickReport};
