use crate::error::{QuadtreeError, QuadtreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Entities a leaf holds before it splits.
    pub criteria: usize,
    /// Depth at which leaves stop splitting and hold any number of entities.
    pub max_depth: usize,
}

impl Config {
    pub fn new(criteria: usize, max_depth: usize) -> Self {
        Self {
            criteria,
            max_depth,
        }
    }

    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.criteria == 0 {
            return Err(QuadtreeError::InvalidCriteria {
                criteria: self.criteria,
            });
        }
        if self.max_depth == 0 {
            return Err(QuadtreeError::InvalidMaxDepth {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            criteria: 4,
            // 8 levels quarter the unit world down to cells of 1/256.
            max_depth: 8,
        }
    }
}
