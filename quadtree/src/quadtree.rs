//! Region quadtree over circles.
//!
//! Nodes live in a single arena (`Vec<Node>`) and address their four children
//! by index, so a rebuild only has to truncate the arena. A circle straddling
//! quadrant borders is stored in every leaf it reaches; use
//! [`QuadTree::query_unique`] or deduplicate the ids of [`QuadTree::query`].

use common::shapes::Region;

mod build;
mod config;
mod nodes;
mod query;
mod types;

pub use config::Config;
pub use nodes::{NodeRef, Nodes};
pub use query::{Query, UniqueQuery};
pub(crate) use types::*;

pub struct QuadTree {
    region: Region,
    config: Config,
    nodes: Vec<Node>,
    entries: Vec<Entry>,
    entries_scratch: Vec<Entry>,
}
