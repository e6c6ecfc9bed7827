use crate::entity::{Entity, EntityId};
use crate::registry::EntityRegistry;
use common::shapes::{Region, ShapeEnum};
use quadtree::quadtree::QuadTree;

/// Ids of the entities whose circle overlaps `viewport`, each once, in the
/// order the tree walk meets them.
pub fn visible_ids(tree: &QuadTree, viewport: &Region) -> Vec<EntityId> {
    tree.query_unique(&ShapeEnum::Region(*viewport)).collect()
}

/// Same walk, resolved to the entities a renderer would draw.
pub fn visible_entities<'a>(
    tree: &QuadTree,
    registry: &'a EntityRegistry,
    viewport: &Region,
) -> Vec<&'a Entity> {
    tree.query_unique(&ShapeEnum::Region(*viewport))
        .filter_map(|id| registry.get(id))
        .collect()
}
