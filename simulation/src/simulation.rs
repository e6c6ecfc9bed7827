use crate::broad_phase::{self, CollisionPair};
use crate::config::SimulationConfig;
use crate::entity::{Entity, EntityId};
use crate::error::{SimulationError, SimulationResult};
use crate::registry::EntityRegistry;
use crate::visibility;
use common::shapes::Region;
use quadtree::quadtree::QuadTree;
use quadtree::QuadtreeError;
use std::time::Duration;
use tracing::{debug, info};

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub pairs: Vec<CollisionPair>,
    pub removed: Vec<EntityId>,
    pub narrow_tests: usize,
    pub index_nodes: usize,
    pub entity_count: usize,
}

/// Registry, quadtree and configuration for one world.
///
/// The index is rebuilt from the registry whenever the registry changes, so
/// queries between ticks always see the current entities.
pub struct Simulation {
    world: Region,
    config: SimulationConfig,
    registry: EntityRegistry,
    index: QuadTree,
}

impl Simulation {
    pub fn new(world: Region, config: SimulationConfig) -> SimulationResult<Self> {
        Self::with_registry(world, config, EntityRegistry::new())
    }

    /// Deterministic spawning, for tests and side-by-side comparisons.
    pub fn with_seed(world: Region, config: SimulationConfig, seed: u64) -> SimulationResult<Self> {
        Self::with_registry(world, config, EntityRegistry::with_seed(seed))
    }

    fn with_registry(
        world: Region,
        config: SimulationConfig,
        registry: EntityRegistry,
    ) -> SimulationResult<Self> {
        config.validate()?;
        let index = QuadTree::new(world, config.index_config())?;
        Ok(Self {
            world,
            config,
            registry,
            index,
        })
    }

    /// Replaces every entity with `count` freshly spawned ones.
    pub fn initialize(&mut self, count: usize) -> SimulationResult<()> {
        self.config.validate()?;
        self.registry.clear();
        self.registry.spawn(count, &self.world, &self.config.spawn);
        self.rebuild_index()?;
        info!(entities = count, "simulation initialized");
        Ok(())
    }

    pub fn spawn(&mut self, count: usize) -> SimulationResult<()> {
        self.config.validate()?;
        self.registry.spawn(count, &self.world, &self.config.spawn);
        self.rebuild_index()?;
        info!(spawned = count, entities = self.registry.len(), "entities spawned");
        Ok(())
    }

    /// Removes up to `count` of the newest entities; asking for more than
    /// exist just empties the registry.
    pub fn remove(&mut self, count: usize) -> SimulationResult<usize> {
        self.config.validate()?;
        let removed = self.registry.remove(count);
        self.rebuild_index()?;
        info!(removed, entities = self.registry.len(), "entities removed");
        Ok(removed)
    }

    /// Adds a hand-placed entity under the next free id.
    ///
    /// The entity must be alive, sit inside the world and move at a finite
    /// velocity; errors name the id it would have been given.
    pub fn insert(&mut self, entity: Entity) -> SimulationResult<EntityId> {
        self.config.validate()?;
        self.check_entity(&entity, self.registry.next_id())?;
        let id = self.registry.insert(entity);
        self.rebuild_index()?;
        Ok(id)
    }

    fn check_entity(&self, entity: &Entity, id: EntityId) -> SimulationResult<()> {
        if !(entity.radius.is_finite() && entity.radius >= 0.0) {
            return Err(QuadtreeError::InvalidCircleRadius {
                id,
                radius: entity.radius,
            }
            .into());
        }
        let position = entity.position;
        if !self.world.contains(position.x, position.y) {
            return Err(QuadtreeError::EntityOutsideRegion {
                id,
                x: position.x,
                y: position.y,
            }
            .into());
        }
        // A non-finite velocity turns the position into NaN on the next move.
        let velocity = entity.velocity;
        if !(velocity.x.is_finite() && velocity.y.is_finite()) {
            return Err(SimulationError::InvalidVelocity {
                id,
                x: velocity.x,
                y: velocity.y,
            });
        }
        if !entity.alive || entity.strength == 0 {
            return Err(SimulationError::DeadEntity { id });
        }
        Ok(())
    }

    /// Moves, indexes and collides every entity once.
    ///
    /// The configuration is checked before anything changes; an invalid one
    /// leaves the simulation exactly as it was.
    pub fn tick(&mut self, elapsed: Duration) -> SimulationResult<TickReport> {
        self.config.validate()?;

        self.registry.clear_collision_flags();
        if self.config.entity_movement_enabled {
            self.registry.advance(
                elapsed.as_secs_f32(),
                &self.world,
                self.config.bounce_damping,
            );
        }
        self.rebuild_index()?;

        let resolution = broad_phase::resolve(&mut self.registry, &self.index, self.config.use_index);
        if !resolution.removed.is_empty() {
            self.registry.commit_removals(&resolution.removed);
            self.rebuild_index()?;
        }

        debug!(
            entities = self.registry.len(),
            pairs = resolution.pairs.len(),
            removed = resolution.removed.len(),
            narrow_tests = resolution.narrow_tests,
            use_index = self.config.use_index,
            "tick"
        );

        Ok(TickReport {
            pairs: resolution.pairs,
            removed: resolution.removed,
            narrow_tests: resolution.narrow_tests,
            index_nodes: self.index.node_count(),
            entity_count: self.registry.len(),
        })
    }

    /// Ids of the entities overlapping `viewport`, each once.
    pub fn visible_ids(&self, viewport: &Region) -> Vec<EntityId> {
        visibility::visible_ids(&self.index, viewport)
    }

    pub fn visible_entities(&self, viewport: &Region) -> Vec<&Entity> {
        visibility::visible_entities(&self.index, &self.registry, viewport)
    }

    /// Node boundaries for the debug overlay.
    pub fn node_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.index.node_regions()
    }

    pub fn world(&self) -> Region {
        self.world
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn index(&self) -> &QuadTree {
        &self.index
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Changes take effect on the next call that touches the index.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    fn rebuild_index(&mut self) -> SimulationResult<()> {
        self.index
            .rebuild(self.world, self.config.index_config(), self.registry.circles())?;
        Ok(())
    }
}
