use crate::entity::EntityId;
use common::shapes::InvalidRegionError;
use quadtree::QuadtreeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Index(#[from] QuadtreeError),
    #[error(transparent)]
    Region(#[from] InvalidRegionError),
    #[error("spawn range `{name}` must be finite and non-negative with min <= max (min: {min}, max: {max})")]
    InvalidSpawnRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("spawned entities need at least one hit point")]
    ZeroSpawnStrength,
    #[error("bounce damping must lie in 0..=1, got {damping}")]
    InvalidDamping { damping: f32 },
    #[error("entity velocity must be finite (id: {id}, x: {x}, y: {y})")]
    InvalidVelocity { id: EntityId, x: f32, y: f32 },
    #[error("entity must be alive with at least one hit point (id: {id})")]
    DeadEntity { id: EntityId },
}

pub type SimulationResult<T> = Result<T, SimulationError>;
