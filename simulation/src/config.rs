use crate::error::{SimulationError, SimulationResult};
use quadtree::quadtree::Config;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ranges new entities are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_radius: f32,
    pub max_radius: f32,
    /// World units per second.
    pub max_speed: f32,
    pub strength: u32,
    pub damage: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_radius: 0.005,
            max_radius: 0.015,
            max_speed: 0.1,
            strength: 1,
            damage: 0,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> SimulationResult<()> {
        check_range("radius", self.min_radius, self.max_radius)?;
        check_range("speed", 0.0, self.max_speed)?;
        if self.strength == 0 {
            return Err(SimulationError::ZeroSpawnStrength);
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> SimulationResult<()> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(SimulationError::InvalidSpawnRange { name, min, max })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Entities a leaf holds before it splits.
    pub criteria: usize,
    pub max_depth: usize,
    /// Broad phase through the quadtree, or all pairs when off.
    pub use_index: bool,
    pub render_index_boundaries: bool,
    pub render_entities: bool,
    pub entity_movement_enabled: bool,
    /// Velocity scale in `0..=1` applied when an entity bounces off the world
    /// border.
    pub bounce_damping: f32,
    pub spawn: SpawnConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let index = Config::default();
        Self {
            criteria: index.criteria,
            max_depth: index.max_depth,
            use_index: true,
            render_index_boundaries: true,
            render_entities: true,
            entity_movement_enabled: true,
            bounce_damping: 1.0,
            spawn: SpawnConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn index_config(&self) -> Config {
        Config::new(self.criteria, self.max_depth)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        self.index_config().validate()?;
        if !(0.0..=1.0).contains(&self.bounce_damping) {
            return Err(SimulationError::InvalidDamping {
                damping: self.bounce_damping,
            });
        }
        self.spawn.validate()
    }

    pub fn toggle_use_index(&mut self) -> bool {
        self.use_index = !self.use_index;
        info!(use_index = self.use_index, "collision mode toggled");
        self.use_index
    }

    pub fn toggle_index_boundaries(&mut self) -> bool {
        self.render_index_boundaries = !self.render_index_boundaries;
        info!(
            render_index_boundaries = self.render_index_boundaries,
            "index boundary rendering toggled"
        );
        self.render_index_boundaries
    }

    pub fn toggle_entity_rendering(&mut self) -> bool {
        self.render_entities = !self.render_entities;
        info!(render_entities = self.render_entities, "entity rendering toggled");
        self.render_entities
    }

    pub fn toggle_entity_movement(&mut self) -> bool {
        self.entity_movement_enabled = !self.entity_movement_enabled;
        info!(
            entity_movement_enabled = self.entity_movement_enabled,
            "entity movement toggled"
        );
        self.entity_movement_enabled
    }

    pub fn increase_criteria(&mut self) -> usize {
        self.criteria = self.criteria.saturating_add(1);
        info!(criteria = self.criteria, "split criteria changed");
        self.criteria
    }

    /// Never goes below 1.
    pub fn decrease_criteria(&mut self) -> usize {
        self.criteria = self.criteria.saturating_sub(1).max(1);
        info!(criteria = self.criteria, "split criteria changed");
        self.criteria
    }
}
