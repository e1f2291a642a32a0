//! The road network, and the traits by which the matcher
//! queries it: [`SpatialIndex`], [`RoutingOracle`] and [`SegmentAssembler`].

pub mod access;
pub mod builder;
pub mod error;
pub mod primitives;
pub mod traits;

#[doc(inline)]
pub use access::*;
#[doc(inline)]
pub use builder::GraphBuilder;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use primitives::*;
#[doc(inline)]
pub use traits::*;

use geo::Point;
use petgraph::prelude::DiGraphMap;
use rstar::RTree;
use rustc_hash::{FxHashMap, FxHasher};

use std::fmt::{Debug, Formatter};
use std::hash::BuildHasherDefault;

pub type GraphStructure = DiGraphMap<NodeIx, EdgeInfo, BuildHasherDefault<FxHasher>>;

/// Routing graph.
///
/// Holds the directed routing structure, the position of every node,
/// and an R-tree over every directed edge for proximity queries.
/// Created through a [`GraphBuilder`], and read-only thereafter.
pub struct Graph {
    pub(crate) graph: GraphStructure,
    pub(crate) hash: FxHashMap<NodeIx, Node>,

    pub(crate) index_edge: RTree<FatEdge>,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.hash.len(),
            self.graph.edge_count()
        )
    }
}

impl Graph {
    pub fn index_edge(&self) -> &RTree<FatEdge> {
        &self.index_edge
    }

    #[inline]
    pub fn get_position(&self, node_index: &NodeIx) -> Option<Point<f64>> {
        self.hash.get(node_index).map(|node| node.position)
    }

    /// The fastest free-flow speed (km/h) of any edge the `filter` permits.
    ///
    /// Returns `0` for a network with no permitted edges.
    pub fn max_speed(&self, filter: &dyn EdgeFilter) -> f64 {
        self.graph
            .all_edges()
            .map(|(_, _, info)| info)
            .filter(|info| filter.permits(info))
            .map(|info| info.speed)
            .fold(0.0, f64::max)
    }
}
