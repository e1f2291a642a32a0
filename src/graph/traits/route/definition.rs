use crate::graph::{EdgeFilter, EdgeId, NodeIx, RoutingError};

use geo::Point;

/// The cost of travelling the shortest path between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCost {
    /// Meters.
    pub distance: f64,

    /// Seconds.
    pub duration: f64,
}

/// A routed path between two on-network positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub distance: f64,
    pub duration: f64,

    /// Positions along the path, from the source position to the target position.
    pub geometry: Vec<Point>,

    /// The edges traversed, in order, including those partially traversed at either end.
    pub edges: Vec<EdgeId>,
}

impl Leg {
    #[inline]
    pub fn cost(&self) -> PathCost {
        PathCost {
            distance: self.distance,
            duration: self.duration,
        }
    }
}

/// The point-to-point shortest-path primitive, used as a black-box
/// cost oracle when costing transitions between candidates.
pub trait RoutingOracle {
    /// Finds the fastest path between two positions, each assumed to lie
    /// upon (or very near) an edge permitted by the `filter`.
    fn shortest_path(
        &self,
        from: &Point,
        to: &Point,
        filter: &dyn EdgeFilter,
    ) -> Result<PathCost, RoutingError>;

    /// The fastest free-flow speed, in km/h, of any edge the `filter` permits.
    fn max_speed(&self, filter: &dyn EdgeFilter) -> f64;
}

pub trait Route {
    /// Routes between two nodes, minimising travel time over permitted edges.
    /// Returns the total duration and the nodes visited.
    fn route_nodes(
        &self,
        start_node: NodeIx,
        finish_node: NodeIx,
        filter: &dyn EdgeFilter,
    ) -> Option<(f64, Vec<NodeIx>)>;

    /// Routes between two positions lying upon the network, entering
    /// and leaving part-way along the edges they lie upon.
    fn route_leg(
        &self,
        from: &Point,
        to: &Point,
        filter: &dyn EdgeFilter,
    ) -> Result<Leg, RoutingError>;
}
