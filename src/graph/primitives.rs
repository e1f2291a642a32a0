use crate::graph::{Access, RoadClass};

use geo::{Distance, Haversine, InterpolatableLine, Line, LineLocatePoint, Point};
use rstar::AABB;

/// The identifier of a node within the [`Graph`](crate::Graph).
pub type NodeIx = u64;

/// The identifier of an undirected road piece.
///
/// Both directions of a two-way road share the same [`EdgeId`],
/// so it identifies the underlying road rather than a direction of travel.
pub type EdgeId = u64;

/// The standardised node primitive, an identifier at some [`Point`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub id: NodeIx,
    pub position: Point,
}

impl Node {
    pub fn new(position: Point, id: NodeIx) -> Self {
        Self { id, position }
    }
}

/// The weight of a directed edge within the routing graph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeInfo {
    pub id: EdgeId,

    /// Length of the edge, in meters.
    pub length: f64,

    /// Free-flow speed, in km/h.
    pub speed: f64,

    pub access: Access,
    pub class: RoadClass,
}

impl EdgeInfo {
    /// Speed in m/s.
    #[inline]
    pub fn speed_mps(&self) -> f64 {
        self.speed / 3.6
    }

    /// Time taken to traverse `distance` meters of the edge, in seconds.
    #[inline]
    pub fn duration(&self, distance: f64) -> f64 {
        distance / self.speed_mps()
    }
}

/// Represents a fat edge within the system.
///
/// Unlike the [`EdgeInfo`] stored in the routing graph, a [`FatEdge`] carries the
/// source and target [`Node`]s directly, so it can be placed in the spatial index
/// and projected upon without further lookups.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FatEdge {
    pub source: Node,
    pub target: Node,
    pub info: EdgeInfo,
}

impl FatEdge {
    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.source.position, self.target.position)
    }

    /// Projects `point` onto the edge, returning the projected position
    /// and the fraction (`0..=1`) of the way along the edge it lies.
    pub fn project(&self, point: &Point) -> Option<(Point, f64)> {
        let line = self.line();

        // We locate the point upon the line, and then project that
        // fraction upon the great-circle to obtain a position.
        line.line_locate_point(point).map(|frac| {
            let frac = frac.clamp(0.0, 1.0);
            (line.point_at_ratio_from_start(&Haversine, frac), frac)
        })
    }

    /// Distance from the source of the edge to `point`, assumed to lie on it.
    #[inline]
    pub fn offset_from_source(&self, point: Point) -> f64 {
        Haversine.distance(self.source.position, point)
    }

    /// Distance from `point`, assumed to lie on the edge, to its target.
    #[inline]
    pub fn offset_to_target(&self, point: Point) -> f64 {
        Haversine.distance(point, self.target.position)
    }
}

impl rstar::RTreeObject for FatEdge {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.target.position, self.source.position)
    }
}
