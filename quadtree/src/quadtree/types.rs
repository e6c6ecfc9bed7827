use common::shapes::{Circle, Region};
use smallvec::SmallVec;

/// Index 0 is always the root and can never be a child, so it doubles as
/// the "no children" marker.
pub(crate) const NO_CHILDREN: u32 = 0;

/// Node extents used for routing and query descent. Sides lying on the world
/// border are pushed out to infinity so that circles poking out of the world,
/// and query shapes extending past it, still reach the border nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RectExtent {
    pub(crate) min_x: f32,
    pub(crate) min_y: f32,
    pub(crate) max_x: f32,
    pub(crate) max_y: f32,
}

impl RectExtent {
    pub(crate) fn unbounded() -> Self {
        Self {
            min_x: f32::NEG_INFINITY,
            min_y: f32::NEG_INFINITY,
            max_x: f32::INFINITY,
            max_y: f32::INFINITY,
        }
    }

    /// Same order as `Region::quarter`: NW, NE, SW, SE.
    pub(crate) fn quarter(&self, mid_x: f32, mid_y: f32) -> [RectExtent; 4] {
        [
            RectExtent {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: mid_x,
                max_y: mid_y,
            },
            RectExtent {
                min_x: mid_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: mid_y,
            },
            RectExtent {
                min_x: self.min_x,
                min_y: mid_y,
                max_x: mid_x,
                max_y: self.max_y,
            },
            RectExtent {
                min_x: mid_x,
                min_y: mid_y,
                max_x: self.max_x,
                max_y: self.max_y,
            },
        ]
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) id: u32,
    pub(crate) circle: Circle,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) region: Region,
    pub(crate) reach: RectExtent,
    pub(crate) depth: usize,
    /// First of four consecutive children in the arena.
    pub(crate) first_child: u32,
    /// Indices into the tree's entry table. Always empty once split.
    pub(crate) entries: SmallVec<[u32; 8]>,
}

impl Node {
    pub(crate) fn new_leaf(region: Region, reach: RectExtent, depth: usize) -> Self {
        Self {
            region,
            reach,
            depth,
            first_child: NO_CHILDREN,
            entries: SmallVec::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.first_child == NO_CHILDREN
    }

    #[inline(always)]
    pub(crate) fn child(&self, quadrant: u32) -> u32 {
        debug_assert!(!self.is_leaf());
        debug_assert!(quadrant < 4);
        self.first_child + quadrant
    }
}

pub(crate) type NodeStack = SmallVec<[u32; 64]>;
