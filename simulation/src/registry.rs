use crate::config::SpawnConfig;
use crate::entity::{Entity, EntityId};
use common::shapes::{Circle, Region};
use fxhash::FxHashSet;
use nalgebra::{Point2, Vector2};
use rand::prelude::*;
use std::f32::consts::TAU;

/// Every live entity, in creation order.
///
/// Ids only ever grow, so the most recently spawned entity is always last.
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: EntityId,
    rng: StdRng,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            rng,
        }
    }

    /// Adds `count` entities at random positions inside `world`, each kept one
    /// radius away from the border. Returns the new entities.
    pub fn spawn(&mut self, count: usize, world: &Region, spawn: &SpawnConfig) -> &[Entity] {
        let first = self.entities.len();
        self.entities.reserve(count);
        for _ in 0..count {
            let radius = self.rng.gen_range(spawn.min_radius..=spawn.max_radius);
            let (x, y) = world.random_point_inside(radius, &mut self.rng);
            let heading = self.rng.gen_range(0.0..TAU);
            let speed = self.rng.gen_range(0.0..=spawn.max_speed);
            let velocity = Vector2::new(heading.cos(), heading.sin()) * speed;

            let entity = Entity::new(self.next_id, Point2::new(x, y), velocity, radius)
                .with_hit_points(spawn.strength, spawn.damage);
            self.next_id += 1;
            self.entities.push(entity);
        }
        &self.entities[first..]
    }

    /// Takes ownership of a hand-built entity under a fresh id.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.id = self.next_id;
        self.next_id += 1;
        self.entities.push(entity);
        entity.id
    }

    /// Drops up to `count` of the most recently spawned entities and reports
    /// how many went.
    pub fn remove(&mut self, count: usize) -> usize {
        let removed = count.min(self.entities.len());
        self.entities.truncate(self.entities.len() - removed);
        removed
    }

    /// Drops the entities a collision pass marked for removal.
    pub fn commit_removals(&mut self, ids: &[EntityId]) {
        if ids.is_empty() {
            return;
        }
        let doomed: FxHashSet<EntityId> = ids.iter().copied().collect();
        self.entities.retain(|entity| !doomed.contains(&entity.id));
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Moves alive entities by `velocity * elapsed_secs` and bounces them off
    /// the border of `world`.
    pub fn advance(&mut self, elapsed_secs: f32, world: &Region, damping: f32) {
        for entity in self.entities.iter_mut().filter(|entity| entity.alive) {
            entity.advance(elapsed_secs);
            bounce(entity, world, damping);
        }
    }

    pub fn clear_collision_flags(&mut self) {
        for entity in &mut self.entities {
            entity.colliding = false;
        }
    }

    /// Id the next spawned or inserted entity will get.
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |entity| entity.id)
            .ok()
            .map(|position| &self.entities[position])
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// `(id, circle)` of every alive entity, the input of an index build.
    pub fn circles(&self) -> impl Iterator<Item = (EntityId, Circle)> + '_ {
        self.entities
            .iter()
            .filter(|entity| entity.alive)
            .map(|entity| (entity.id, entity.circle()))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityRegistry {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Keeps the circle inside `world`, reflecting the velocity on the axis it
/// crossed. The center always ends up inside, even for circles wider than the
/// world.
fn bounce(entity: &mut Entity, world: &Region, damping: f32) {
    let margin_x = entity.radius.min(world.width() * 0.5);
    let margin_y = entity.radius.min(world.height() * 0.5);

    let (left, right) = (world.left() + margin_x, world.right() - margin_x);
    if entity.position.x < left {
        entity.position.x = left;
        entity.velocity.x = entity.velocity.x.abs() * damping;
    } else if entity.position.x > right {
        entity.position.x = right;
        entity.velocity.x = -entity.velocity.x.abs() * damping;
    }

    let (top, bottom) = (world.top() + margin_y, world.bottom() - margin_y);
    if entity.position.y < top {
        entity.position.y = top;
        entity.velocity.y = entity.velocity.y.abs() * damping;
    } else if entity.position.y > bottom {
        entity.position.y = bottom;
        entity.velocity.y = -entity.velocity.y.abs() * damping;
    }
}
