//! Broad-phase collision detection over the entity registry.
//!
//! The indexed pass asks the quadtree for the neighbours of every alive
//! entity; the brute-force pass tests every unordered pair. Both feed the same
//! exact circle test, so they agree on the pairs they report.

use crate::entity::{Entity, EntityId};
use crate::registry::EntityRegistry;
use common::shapes::ShapeEnum;
use fxhash::{FxHashMap, FxHashSet};
use nalgebra::Point2;
use parry2d::query::details::intersection_test_ball_ball;
use parry2d::shape::Ball;
use quadtree::quadtree::QuadTree;

/// Two touching entities, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    a: EntityId,
    b: EntityId,
}

impl CollisionPair {
    pub fn new(first: EntityId, second: EntityId) -> Self {
        Self {
            a: first.min(second),
            b: first.max(second),
        }
    }

    pub fn a(&self) -> EntityId {
        self.a
    }

    pub fn b(&self) -> EntityId {
        self.b
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.a == id || self.b == id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Sorted.
    pub pairs: Vec<CollisionPair>,
    /// Entities that did not survive their collisions, sorted.
    pub removed: Vec<EntityId>,
    pub narrow_tests: usize,
}

/// Closed test: circles that just touch collide.
pub fn circles_touch(a: &Entity, b: &Entity) -> bool {
    let center12 = Point2::from(b.position - a.position);
    intersection_test_ball_ball(&center12, &Ball::new(a.radius), &Ball::new(b.radius))
}

/// Touching pairs of alive entities, found through `tree`.
///
/// `tree` must have been built from `entities` at their current positions.
pub fn indexed_pairs(entities: &[Entity], tree: &QuadTree) -> Vec<CollisionPair> {
    let mut narrow_tests = 0;
    scan_indexed(entities, tree, &mut narrow_tests)
        .into_iter()
        .map(|contact| contact.pair)
        .collect()
}

/// Touching pairs of alive entities, testing every unordered pair.
pub fn brute_force_pairs(entities: &[Entity]) -> Vec<CollisionPair> {
    let mut narrow_tests = 0;
    scan_all(entities, &mut narrow_tests)
        .into_iter()
        .map(|contact| contact.pair)
        .collect()
}

/// Runs one collision pass and applies the response to both members of
/// every pair.
///
/// Entities that die stay in the registry, flagged, until the caller commits
/// `Resolution::removed`; a dying entity still collides with everything it
/// touched this tick.
pub fn resolve(registry: &mut EntityRegistry, tree: &QuadTree, use_index: bool) -> Resolution {
    let mut narrow_tests = 0;
    let contacts = if use_index {
        scan_indexed(registry.entities(), tree, &mut narrow_tests)
    } else {
        scan_all(registry.entities(), &mut narrow_tests)
    };

    let entities = registry.entities_mut();
    let mut removed = Vec::new();
    for contact in &contacts {
        let first = entities[contact.first];
        let second = entities[contact.second];
        if !entities[contact.first].collide(&second) {
            removed.push(first.id);
        }
        if !entities[contact.second].collide(&first) {
            removed.push(second.id);
        }
    }
    removed.sort_unstable();
    removed.dedup();

    Resolution {
        pairs: contacts.into_iter().map(|contact| contact.pair).collect(),
        removed,
        narrow_tests,
    }
}

/// A touching pair plus where its members sit in the entity slice.
struct Contact {
    pair: CollisionPair,
    first: usize,
    second: usize,
}

fn contact(entities: &[Entity], first: usize, second: usize) -> Contact {
    Contact {
        pair: CollisionPair::new(entities[first].id, entities[second].id),
        first,
        second,
    }
}

fn scan_indexed(entities: &[Entity], tree: &QuadTree, narrow_tests: &mut usize) -> Vec<Contact> {
    let slots: FxHashMap<EntityId, usize> = entities
        .iter()
        .enumerate()
        .map(|(slot, entity)| (entity.id, slot))
        .collect();
    let mut seen: FxHashSet<CollisionPair> = FxHashSet::default();
    let mut contacts = Vec::new();

    for (slot, entity) in entities.iter().enumerate() {
        if !entity.alive {
            continue;
        }
        let probe = ShapeEnum::Circle(entity.circle());
        for candidate in tree.query(&probe) {
            if candidate == entity.id || !seen.insert(CollisionPair::new(entity.id, candidate)) {
                continue;
            }
            let Some(&other_slot) = slots.get(&candidate) else {
                continue;
            };
            let other = &entities[other_slot];
            if !other.alive {
                continue;
            }
            *narrow_tests += 1;
            if circles_touch(entity, other) {
                contacts.push(contact(entities, slot, other_slot));
            }
        }
    }

    contacts.sort_unstable_by_key(|contact| contact.pair);
    contacts
}

fn scan_all(entities: &[Entity], narrow_tests: &mut usize) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (first, a) in entities.iter().enumerate() {
        if !a.alive {
            continue;
        }
        for (offset, b) in entities[first + 1..].iter().enumerate() {
            if !b.alive {
                continue;
            }
            *narrow_tests += 1;
            if circles_touch(a, b) {
                contacts.push(contact(entities, first, first + 1 + offset));
            }
        }
    }
    contacts.sort_unstable_by_key(|contact| contact.pair);
    contacts
}
