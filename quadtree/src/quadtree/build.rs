use super::*;
use crate::collision_detection;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Circle, Region};
use smallvec::SmallVec;
use tracing::{debug, trace};

impl QuadTree {
    /// Empty tree covering `region`.
    pub fn new(region: Region, config: Config) -> QuadtreeResult<Self> {
        config.validate()?;
        let mut tree = Self {
            region,
            config,
            nodes: Vec::new(),
            entries: Vec::new(),
            entries_scratch: Vec::new(),
        };
        tree.reset_nodes();
        Ok(tree)
    }

    pub fn new_with_bounds(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        config: Config,
    ) -> QuadtreeResult<Self> {
        let region = Region::new(x, y, width, height)?;
        Self::new(region, config)
    }

    /// Fresh tree over `region` holding every `(id, circle)` of `entities`.
    pub fn build<I>(region: Region, config: Config, entities: I) -> QuadtreeResult<Self>
    where
        I: IntoIterator<Item = (u32, Circle)>,
    {
        let mut tree = Self::new(region, config)?;
        tree.rebuild(region, config, entities)?;
        Ok(tree)
    }

    /// Discards every node and entry and indexes `entities` from scratch,
    /// keeping the arena allocations.
    ///
    /// Everything is validated before the old contents are touched: on error
    /// the tree still holds the previous build.
    pub fn rebuild<I>(&mut self, region: Region, config: Config, entities: I) -> QuadtreeResult<()>
    where
        I: IntoIterator<Item = (u32, Circle)>,
    {
        config.validate()?;

        let mut staged = std::mem::take(&mut self.entries_scratch);
        staged.clear();
        for (id, circle) in entities {
            if let Err(err) = validate_entry(&region, id, &circle) {
                self.entries_scratch = staged;
                return Err(err);
            }
            staged.push(Entry { id, circle });
        }

        self.region = region;
        self.config = config;
        self.entries_scratch = std::mem::replace(&mut self.entries, staged);
        self.reset_nodes();
        for entry in 0..self.entries.len() as u32 {
            self.insert_entry(0, entry);
        }

        debug!(
            entities = self.entries.len(),
            nodes = self.nodes.len(),
            leaves = self.leaf_count(),
            depth = self.max_reached_depth(),
            criteria = self.config.criteria,
            "quadtree rebuilt"
        );
        Ok(())
    }

    pub fn insert(&mut self, id: u32, circle: Circle) -> QuadtreeResult<()> {
        validate_entry(&self.region, id, &circle)?;
        let entry = self.entries.len() as u32;
        self.entries.push(Entry { id, circle });
        self.insert_entry(0, entry);
        Ok(())
    }

    fn reset_nodes(&mut self) {
        self.nodes.clear();
        self.nodes
            .push(Node::new_leaf(self.region, RectExtent::unbounded(), 0));
    }

    fn insert_entry(&mut self, node_idx: u32, entry: u32) {
        let circle = self.entries[entry as usize].circle;
        let node = &self.nodes[node_idx as usize];

        if !node.is_leaf() {
            let first_child = node.first_child;
            for child in first_child..first_child + 4 {
                if collision_detection::extent_circle(&self.nodes[child as usize].reach, &circle) {
                    self.insert_entry(child, entry);
                }
            }
            return;
        }

        let held = node.entries.len();
        let depth = node.depth;
        if held < self.config.criteria || depth >= self.config.max_depth {
            if held >= self.config.criteria {
                trace!(
                    node = node_idx,
                    depth,
                    entities = held + 1,
                    "leaf at max depth exceeds criteria"
                );
            }
            self.nodes[node_idx as usize].entries.push(entry);
            return;
        }

        let migrating = self.split(node_idx);
        // The node is internal now, so these route down into the children.
        for moved in migrating {
            self.insert_entry(node_idx, moved);
        }
        self.insert_entry(node_idx, entry);
    }

    /// Turns a leaf into an internal node with four empty children and hands
    /// back the entries it held.
    fn split(&mut self, node_idx: u32) -> SmallVec<[u32; 8]> {
        let first_child = self.nodes.len() as u32;
        let node = &mut self.nodes[node_idx as usize];
        node.first_child = first_child;
        let held = std::mem::take(&mut node.entries);
        let depth = node.depth + 1;
        let region = node.region;
        let reach = node.reach;

        let (mid_x, mid_y) = region.center();
        for (child_region, child_reach) in region
            .quarter()
            .into_iter()
            .zip(reach.quarter(mid_x, mid_y))
        {
            self.nodes
                .push(Node::new_leaf(child_region, child_reach, depth));
        }
        held
    }
}

fn validate_entry(region: &Region, id: u32, circle: &Circle) -> QuadtreeResult<()> {
    if !(circle.radius.is_finite() && circle.radius >= 0.0) {
        return Err(QuadtreeError::InvalidCircleRadius {
            id,
            radius: circle.radius,
        });
    }
    if !region.contains(circle.x, circle.y) {
        return Err(QuadtreeError::EntityOutsideRegion {
            id,
            x: circle.x,
            y: circle.y,
        });
    }
    Ok(())
}
