use super::*;
use common::shapes::Region;

impl QuadTree {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of indexed entities (not leaf memberships).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn max_reached_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            index: 0,
        }
    }

    /// Every node, parents before their children.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            tree: self,
            next: 0,
        }
    }

    /// Node boundaries for a debug overlay.
    pub fn node_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.nodes.iter().map(|node| node.region)
    }

    /// Ids stored anywhere in the tree, once each.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }
}

#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a QuadTree,
    index: u32,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.index as usize]
    }

    pub fn region(&self) -> Region {
        self.node().region
    }

    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// NW, NE, SW, SE, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeRef<'a>; 4]> {
        let node = self.node();
        if node.is_leaf() {
            return None;
        }
        let tree = self.tree;
        Some([0, 1, 2, 3].map(|quadrant| NodeRef {
            tree,
            index: node.child(quadrant),
        }))
    }

    pub fn entity_count(&self) -> usize {
        self.node().entries.len()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = u32> + 'a {
        let tree = self.tree;
        self.node()
            .entries
            .iter()
            .map(move |&entry| tree.entries[entry as usize].id)
    }
}

pub struct Nodes<'a> {
    tree: &'a QuadTree,
    next: u32,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        if self.next as usize >= self.tree.nodes.len() {
            return None;
        }
        let node = NodeRef {
            tree: self.tree,
            index: self.next,
        };
        self.next += 1;
        Some(node)
    }
}
