use crate::graph::{EdgeFilter, EdgeId, FatEdge};

use geo::Point;

/// A position upon an edge of the network, nearest to some queried position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    /// The undirected edge the position lies upon.
    pub edge: EdgeId,

    /// The projected position upon the edge.
    pub position: Point,
}

/// The nearest-edge index used to discover candidates.
///
/// Implementations return edges ordered nearest-first, each edge at most
/// once, restricted to those the `filter` permits. The `distance` is a hint
/// bounding the search, implementations may return snaps further away.
pub trait SpatialIndex {
    fn nearest_edges(
        &self,
        point: &Point,
        distance: f64,
        limit: usize,
        filter: &dyn EdgeFilter,
    ) -> Vec<Snap>;

    /// The single nearest permitted edge.
    fn nearest_edge(&self, point: &Point, distance: f64, filter: &dyn EdgeFilter) -> Option<Snap> {
        self.nearest_edges(point, distance, 1, filter)
            .into_iter()
            .next()
    }
}

/// Trait containing utility functions to find edges upon a root structure.
pub trait Scan {
    /// A function which returns an unsorted iterator of [`FatEdge`] references which are within
    /// the provided `distance` of the input [point](Point).
    ///
    /// ### Note
    /// This function implements a square-scan.
    ///
    /// Therefore, it bounds the search to be within a square-radius of the origin. Therefore,
    /// it may not select every edge within the supplied distance, or it may select more edges.
    /// This resolution method is however significantly cheaper than a circular scan.
    fn scan_edges<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a FatEdge>;

    /// Returns an iterator over every edge found by [`Scan::scan_edges`], alongside
    /// the position of `point` projected upon it, and the haversine distance between the two.
    fn scan_edges_projected<'a>(
        &'a self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, f64, &'a FatEdge)>;
}
