use common::shapes::Circle;
use nalgebra::{Point2, Vector2};

pub type EntityId = u32;

/// A moving circle in the unit world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub position: Point2<f32>,
    /// World units per second.
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub alive: bool,
    /// Touched another entity during the current tick.
    pub colliding: bool,
    /// Hit points left.
    pub strength: u32,
    /// Hit points taken from whatever this entity touches.
    pub damage: u32,
}

impl Entity {
    pub fn new(id: EntityId, position: Point2<f32>, velocity: Vector2<f32>, radius: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            alive: true,
            colliding: false,
            strength: 1,
            damage: 0,
        }
    }

    pub fn with_hit_points(mut self, strength: u32, damage: u32) -> Self {
        self.strength = strength;
        self.damage = damage;
        self.alive = strength > 0;
        self
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position.x, self.position.y, self.radius)
    }

    pub fn advance(&mut self, elapsed_secs: f32) {
        self.position += self.velocity * elapsed_secs;
    }

    /// Applies the hit from `other` and reports whether this entity survives.
    ///
    /// Only flags the entity; taking it out of the registry is up to the
    /// caller once the whole collision pass is done.
    pub fn collide(&mut self, other: &Entity) -> bool {
        self.colliding = true;
        self.strength = self.strength.saturating_sub(other.damage);
        if self.strength == 0 {
            self.alive = false;
        }
        self.alive
    }
}
