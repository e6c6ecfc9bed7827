use common::shapes::InvalidRegionError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error(transparent)]
    InvalidRegion(#[from] InvalidRegionError),
    #[error("entity center must lie within the quadtree region (id: {id}, x: {x}, y: {y})")]
    EntityOutsideRegion { id: u32, x: f32, y: f32 },
    #[error("circle radius must be finite and non-negative (id: {id}, radius: {radius})")]
    InvalidCircleRadius { id: u32, radius: f32 },
    #[error("criteria must be a positive integer (criteria: {criteria})")]
    InvalidCriteria { criteria: usize },
    #[error("max depth must be a positive integer (max_depth: {max_depth})")]
    InvalidMaxDepth { max_depth: usize },
}

impl QuadtreeError {
    /// Errors caused by the tree settings rather than by the indexed data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            QuadtreeError::InvalidCriteria { .. } | QuadtreeError::InvalidMaxDepth { .. }
        )
    }

    pub fn is_region_error(&self) -> bool {
        matches!(
            self,
            QuadtreeError::InvalidRegion(_) | QuadtreeError::EntityOutsideRegion { .. }
        )
    }
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
