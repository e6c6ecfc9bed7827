use proptest::prelude::*;
use quadtree::quadtree::{Config, NodeRef, QuadTree};
use quadtree::shapes::{Circle, Region, ShapeEnum};
use quadtree::QuadtreeError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn unit_world() -> Region {
    Region::new(0.0, 0.0, 1.0, 1.0).unwrap()
}

fn random_circles(rng: &mut StdRng, count: u32, max_radius: f32) -> Vec<(u32, Circle)> {
    (0..count)
        .map(|id| {
            (
                id,
                Circle::new(
                    rng.gen_range(0.0..=1.0),
                    rng.gen_range(0.0..=1.0),
                    rng.gen_range(0.0..=max_radius),
                ),
            )
        })
        .collect()
}

fn brute_force(circles: &[(u32, Circle)], shape: &ShapeEnum) -> HashSet<u32> {
    circles
        .iter()
        .filter(|(_, circle)| shape.intersects_circle(circle))
        .map(|(id, _)| *id)
        .collect()
}

fn check_partition(node: NodeRef<'_>) {
    let Some(children) = node.children() else {
        return;
    };
    let parent = node.region();
    let [nw, ne, sw, se] = children.map(|child| child.region());

    assert_eq!(nw.left(), parent.left());
    assert_eq!(nw.top(), parent.top());
    assert_eq!(ne.right(), parent.right());
    assert_eq!(ne.top(), parent.top());
    assert_eq!(sw.left(), parent.left());
    assert_eq!(sw.bottom(), parent.bottom());
    assert_eq!(se.right(), parent.right());
    assert_eq!(se.bottom(), parent.bottom());
    // Shared edges are the very same float, so there are no gaps or overlaps.
    assert_eq!(nw.right(), ne.left());
    assert_eq!(sw.right(), se.left());
    assert_eq!(nw.bottom(), sw.top());
    assert_eq!(ne.bottom(), se.top());
    assert_eq!(nw.right(), sw.right());
    assert_eq!(nw.bottom(), ne.bottom());

    assert_eq!(node.entity_count(), 0, "split nodes hold no entities");
    for child in children {
        assert_eq!(child.depth(), node.depth() + 1);
        check_partition(child);
    }
}

#[test]
fn test_split_into_four_quadrants() {
    let config = Config::new(1, 4);
    let entities = vec![
        (0, Circle::new(0.1, 0.1, 0.01)),
        (1, Circle::new(0.9, 0.1, 0.01)),
        (2, Circle::new(0.1, 0.9, 0.01)),
        (3, Circle::new(0.9, 0.9, 0.01)),
    ];
    let qt = QuadTree::build(unit_world(), config, entities).unwrap();

    assert_eq!(qt.node_count(), 5);
    assert_eq!(qt.max_reached_depth(), 1);
    let children = qt.root().children().expect("root should split");
    for (quadrant, child) in children.iter().enumerate() {
        assert!(child.is_leaf());
        assert_eq!(child.entity_ids().collect::<Vec<_>>(), vec![quadrant as u32]);
    }
}

#[test]
fn test_no_split_under_criteria() {
    let entities = (0..4).map(|id| (id, Circle::new(0.2 * id as f32 + 0.1, 0.5, 0.01)));
    let qt = QuadTree::build(unit_world(), Config::new(4, 6), entities).unwrap();
    assert_eq!(qt.node_count(), 1);
    assert!(qt.root().is_leaf());
    assert_eq!(qt.root().entity_count(), 4);
}

#[test]
fn test_single_collision() {
    let mut qt = QuadTree::new(unit_world(), Config::default()).unwrap();
    qt.insert(0, Circle::new(0.5, 0.5, 0.1)).unwrap();
    let collisions: Vec<u32> = qt
        .query(&ShapeEnum::Region(Region::new(0.0, 0.0, 0.45, 0.45).unwrap()))
        .collect();
    assert_eq!(collisions, vec![0]);
}

#[test]
fn test_no_collision() {
    let mut qt = QuadTree::new(unit_world(), Config::default()).unwrap();
    qt.insert(0, Circle::new(0.1, 0.1, 0.05)).unwrap();
    qt.insert(1, Circle::new(0.5, 0.5, 0.05)).unwrap();
    let collisions: Vec<u32> = qt
        .query(&ShapeEnum::Circle(Circle::new(0.8, 0.8, 0.05)))
        .collect();
    assert!(collisions.is_empty());
}

#[test]
fn test_empty_tree_queries() {
    let qt = QuadTree::build(unit_world(), Config::default(), Vec::new()).unwrap();
    assert!(qt.is_empty());
    assert_eq!(qt.query(&ShapeEnum::Region(unit_world())).count(), 0);
}

#[test]
fn test_straddling_entity_is_stored_in_every_quadrant() {
    let mut entities = vec![(0, Circle::new(0.5, 0.5, 0.1))];
    entities.extend((1..4).map(|id| (id, Circle::new(0.1 * id as f32, 0.05, 0.01))));
    let qt = QuadTree::build(unit_world(), Config::new(2, 1), entities).unwrap();

    let children = qt.root().children().unwrap();
    for child in children {
        assert!(child.entity_ids().any(|id| id == 0));
    }

    let raw: Vec<u32> = qt.query(&ShapeEnum::Region(unit_world())).collect();
    assert_eq!(raw.iter().filter(|&&id| id == 0).count(), 4);

    let unique: Vec<u32> = qt.query_unique(&ShapeEnum::Region(unit_world())).collect();
    assert_eq!(unique.iter().filter(|&&id| id == 0).count(), 1);
    assert_eq!(unique.len(), 4);
}

#[test]
fn test_full_world_query_returns_every_entity_once() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(7);
    let circles = random_circles(&mut rng, 500, 0.02);
    let qt = QuadTree::build(unit_world(), Config::new(3, 6), circles.clone()).unwrap();

    let mut found: Vec<u32> = qt.query_unique(&ShapeEnum::Region(unit_world())).collect();
    found.sort_unstable();
    let expected: Vec<u32> = (0..500).collect();
    assert_eq!(found, expected);
}

#[test]
fn test_query_is_restartable() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(11);
    let circles = random_circles(&mut rng, 200, 0.03);
    let qt = QuadTree::build(unit_world(), Config::new(2, 5), circles).unwrap();

    let shape = ShapeEnum::Circle(Circle::new(0.4, 0.6, 0.2));
    let query = qt.query(&shape);
    let first: Vec<u32> = query.clone().collect();
    let second: Vec<u32> = query.collect();
    assert_eq!(first, second);
    assert_eq!(first, qt.query(&shape).collect::<Vec<_>>());
}

#[test]
fn test_partition_integrity() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(3);
    let circles = random_circles(&mut rng, 1_000, 0.01);
    let qt = QuadTree::build(unit_world(), Config::new(4, 7), circles).unwrap();
    assert!(qt.node_count() > 1);
    check_partition(qt.root());

    for node in qt.nodes() {
        if !node.is_leaf() {
            assert!(node.children().is_some());
        }
        if node.entity_count() > 4 {
            assert_eq!(node.depth(), 7);
        }
    }
}

#[test]
fn test_max_depth_bounds_clustered_entities() {
    let entities = (0..100).map(|id| (id, Circle::new(0.3, 0.3, 0.0)));
    let qt = QuadTree::build(unit_world(), Config::new(1, 5), entities).unwrap();

    assert_eq!(qt.max_reached_depth(), 5);
    let crowded = qt
        .nodes()
        .filter(|node| node.is_leaf() && node.entity_count() == 100)
        .count();
    assert_eq!(crowded, 1);
    assert_eq!(
        qt.query_unique(&ShapeEnum::Circle(Circle::new(0.3, 0.3, 0.001)))
            .count(),
        100
    );
}

#[test]
fn test_node_regions_cover_every_node() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(5);
    let circles = random_circles(&mut rng, 64, 0.01);
    let qt = QuadTree::build(unit_world(), Config::new(2, 4), circles).unwrap();
    let regions: Vec<Region> = qt.node_regions().collect();
    assert_eq!(regions.len(), qt.node_count());
    assert_eq!(regions[0], unit_world());
    assert_eq!(qt.leaf_count() % 3, 1);
}

#[test]
fn test_invalid_config() {
    let err = QuadTree::build(unit_world(), Config::new(0, 4), Vec::new())
        .err()
        .unwrap();
    assert_eq!(err, QuadtreeError::InvalidCriteria { criteria: 0 });
    assert!(err.is_configuration_error());

    let err = QuadTree::new(unit_world(), Config::new(4, 0)).err().unwrap();
    assert_eq!(err, QuadtreeError::InvalidMaxDepth { max_depth: 0 });
    assert!(err.is_configuration_error());
}

#[test]
fn test_invalid_region() {
    let err = QuadTree::new_with_bounds(0.0, 0.0, 0.0, 1.0, Config::default())
        .err()
        .unwrap();
    assert!(matches!(err, QuadtreeError::InvalidRegion(_)));
    assert!(err.is_region_error());
}

#[test]
fn test_entity_outside_region_fails_build() {
    let entities = vec![
        (0, Circle::new(0.5, 0.5, 0.01)),
        (1, Circle::new(1.5, 0.5, 0.01)),
    ];
    let err = QuadTree::build(unit_world(), Config::default(), entities)
        .err()
        .unwrap();
    assert_eq!(
        err,
        QuadtreeError::EntityOutsideRegion {
            id: 1,
            x: 1.5,
            y: 0.5
        }
    );
    assert!(err.is_region_error());
}

#[test]
fn test_invalid_radius() {
    let mut qt = QuadTree::new(unit_world(), Config::default()).unwrap();
    let err = qt.insert(9, Circle::new(0.5, 0.5, -1.0)).unwrap_err();
    assert_eq!(err, QuadtreeError::InvalidCircleRadius { id: 9, radius: -1.0 });
    assert!(qt.is_empty());
}

#[test]
fn test_failed_rebuild_keeps_previous_tree() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(21);
    let circles = random_circles(&mut rng, 50, 0.02);
    let mut qt = QuadTree::build(unit_world(), Config::new(2, 5), circles).unwrap();
    let nodes_before = qt.node_count();

    let bad = vec![(0, Circle::new(2.0, 2.0, 0.01))];
    assert!(qt.rebuild(unit_world(), Config::new(2, 5), bad).is_err());
    assert!(qt.rebuild(unit_world(), Config::new(0, 5), Vec::new()).is_err());

    assert_eq!(qt.len(), 50);
    assert_eq!(qt.node_count(), nodes_before);
    assert_eq!(qt.query_unique(&ShapeEnum::Region(unit_world())).count(), 50);
}

#[test]
fn test_rebuild_replaces_contents() {
    let mut qt = QuadTree::build(
        unit_world(),
        Config::new(1, 4),
        vec![
            (0, Circle::new(0.1, 0.1, 0.01)),
            (1, Circle::new(0.9, 0.9, 0.01)),
        ],
    )
    .unwrap();
    assert_eq!(qt.node_count(), 5);

    qt.rebuild(
        unit_world(),
        Config::new(4, 4),
        vec![(7, Circle::new(0.5, 0.5, 0.01))],
    )
    .unwrap();
    assert_eq!(qt.node_count(), 1);
    assert_eq!(qt.ids().collect::<Vec<_>>(), vec![7]);
    assert_eq!(qt.config(), Config::new(4, 4));
}

#[test]
fn test_circle_poking_out_of_the_world() {
    // The circle's center is inside the world but most of it is outside;
    // a viewport beyond the border must still see it.
    let mut entities = vec![(0, Circle::new(0.99, 0.5, 0.2))];
    entities.extend((1..10).map(|id| (id, Circle::new(0.05 * id as f32, 0.1, 0.01))));
    let qt = QuadTree::build(unit_world(), Config::new(1, 6), entities).unwrap();

    let outside = ShapeEnum::Region(Region::new(1.1, 0.45, 0.1, 0.1).unwrap());
    assert_eq!(qt.query_unique(&outside).collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_huge_bounds() {
    let world = Region::new(-1_000_000.0, -1_000_000.0, 2_000_000.0, 2_000_000.0).unwrap();
    let mut qt = QuadTree::new(world, Config::new(1, 10)).unwrap();
    qt.insert(0, Circle::new(16000.0, -355.0, 30.0)).unwrap();
    qt.insert(1, Circle::new(15980.0, -350.0, 30.0)).unwrap();
    qt.insert(2, Circle::new(-500_000.0, 500_000.0, 30.0)).unwrap();

    let collisions: HashSet<u32> = qt
        .query_unique(&ShapeEnum::Circle(Circle::new(15980.0, -350.0, 30.0)))
        .collect();
    assert_eq!(collisions, HashSet::from([0, 1]));
}

#[test]
fn test_random_queries_match_brute_force() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(42);
    let circles = random_circles(&mut rng, 1_000, 0.02);
    let qt = QuadTree::build(unit_world(), Config::new(4, 8), circles.clone()).unwrap();

    for _ in 0..200 {
        let shape = if rng.gen_bool(0.5) {
            ShapeEnum::Circle(Circle::new(
                rng.gen_range(-0.2..1.2),
                rng.gen_range(-0.2..1.2),
                rng.gen_range(0.0..0.3),
            ))
        } else {
            ShapeEnum::Region(
                Region::new(
                    rng.gen_range(-0.2..1.0),
                    rng.gen_range(-0.2..1.0),
                    rng.gen_range(0.01..0.5),
                    rng.gen_range(0.01..0.5),
                )
                .unwrap(),
            )
        };
        let found: HashSet<u32> = qt.query_unique(&shape).collect();
        assert_eq!(found, brute_force(&circles, &shape));
    }
}

fn circle_strategy() -> impl Strategy<Value = Circle> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..0.1).prop_map(|(x, y, r)| Circle::new(x, y, r))
}

fn shape_strategy() -> impl Strategy<Value = ShapeEnum> {
    prop_oneof![
        (-0.5f32..1.5, -0.5f32..1.5, 0.0f32..0.5)
            .prop_map(|(x, y, r)| ShapeEnum::Circle(Circle::new(x, y, r))),
        (-0.5f32..1.5, -0.5f32..1.5, 0.001f32..1.0, 0.001f32..1.0).prop_map(|(x, y, w, h)| {
            ShapeEnum::Region(Region::new(x, y, w, h).unwrap())
        }),
    ]
}

proptest! {
    #[test]
    fn query_matches_brute_force(
        circles in prop::collection::vec(circle_strategy(), 0..200),
        shape in shape_strategy(),
        criteria in 1usize..8,
        max_depth in 1usize..8,
    ) {
        let circles: Vec<(u32, Circle)> = circles
            .into_iter()
            .enumerate()
            .map(|(id, circle)| (id as u32, circle))
            .collect();
        let qt = QuadTree::build(unit_world(), Config::new(criteria, max_depth), circles.clone())
            .unwrap();

        let found: HashSet<u32> = qt.query(&shape).collect();
        prop_assert_eq!(found, brute_force(&circles, &shape));

        let unique: Vec<u32> = qt.query_unique(&shape).collect();
        let distinct: HashSet<u32> = unique.iter().copied().collect();
        prop_assert_eq!(unique.len(), distinct.len());
    }
}
