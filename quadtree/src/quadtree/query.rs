use super::*;
use crate::collision_detection;
use common::shapes::ShapeEnum;
use fxhash::FxHashSet;

impl QuadTree {
    /// Ids of the indexed circles intersecting `shape`, produced lazily.
    ///
    /// An id shows up once per leaf its circle was stored in. Clone the
    /// iterator before consuming it to walk the same query again.
    pub fn query(&self, shape: &ShapeEnum) -> Query<'_> {
        let mut stack = NodeStack::new();
        if collision_detection::extent_shape(&self.nodes[0].reach, shape) {
            stack.push(0);
        }
        Query {
            tree: self,
            shape: *shape,
            stack,
            leaf: &[],
        }
    }

    /// Like [`QuadTree::query`], with every id produced at most once.
    pub fn query_unique(&self, shape: &ShapeEnum) -> UniqueQuery<'_> {
        UniqueQuery {
            inner: self.query(shape),
            seen: FxHashSet::default(),
        }
    }
}

#[derive(Clone)]
pub struct Query<'a> {
    tree: &'a QuadTree,
    shape: ShapeEnum,
    stack: NodeStack,
    leaf: &'a [u32],
}

impl<'a> Iterator for Query<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let tree: &'a QuadTree = self.tree;
        loop {
            while let Some((&entry, rest)) = self.leaf.split_first() {
                self.leaf = rest;
                let entry = &tree.entries[entry as usize];
                if self.shape.intersects_circle(&entry.circle) {
                    return Some(entry.id);
                }
            }

            let node = &tree.nodes[self.stack.pop()? as usize];
            if node.is_leaf() {
                self.leaf = &node.entries;
                continue;
            }
            // Pushed in reverse so NW is visited first.
            for quadrant in (0..4).rev() {
                let child = node.child(quadrant);
                if collision_detection::extent_shape(&tree.nodes[child as usize].reach, &self.shape)
                {
                    self.stack.push(child);
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct UniqueQuery<'a> {
    inner: Query<'a>,
    seen: FxHashSet<u32>,
}

impl<'a> Iterator for UniqueQuery<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let seen = &mut self.seen;
        self.inner.by_ref().find(|id| seen.insert(*id))
    }
}
