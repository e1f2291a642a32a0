use crate::graph::proximity::definition::{Scan, Snap, SpatialIndex};
use crate::graph::{EdgeFilter, FatEdge, Graph};

use geo::{Destination, Distance, Geodesic, Haversine, Point};
use itertools::Itertools;
use rstar::AABB;
use std::f64::consts::SQRT_2;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Scan for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    #[inline]
    fn scan_edges<'a>(&'a self, point: &Point, distance: f64) -> impl Iterator<Item = &'a FatEdge> {
        // Corners lie on the diagonal, so the square must
        // reach √2 further to enclose the whole radius.
        let bottom_right = Geodesic.destination(*point, 135.0, distance * SQRT_2);
        let top_left = Geodesic.destination(*point, 315.0, distance * SQRT_2);

        let bbox = AABB::from_corners(top_left, bottom_right);
        self.index_edge().locate_in_envelope_intersecting(&bbox)
    }

    #[inline]
    fn scan_edges_projected<'a>(
        &'a self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = (Point, f64, &'a FatEdge)> {
        let origin = *point;

        self.scan_edges(point, distance).filter_map(move |edge| {
            let (projected, _) = edge.project(&origin)?;
            Some((projected, Haversine.distance(projected, origin), edge))
        })
    }
}

impl SpatialIndex for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self, filter)))]
    fn nearest_edges(
        &self,
        point: &Point,
        distance: f64,
        limit: usize,
        filter: &dyn EdgeFilter,
    ) -> Vec<Snap> {
        // Both directions of a two-way road share an identifier and lie
        // equidistant, so only the first of each is kept.
        self.scan_edges_projected(point, distance)
            .filter(|(_, _, edge)| filter.permits(&edge.info))
            .sorted_by(|(_, a, edge_a), (_, b, edge_b)| {
                a.total_cmp(b).then(edge_a.info.id.cmp(&edge_b.info.id))
            })
            .unique_by(|(_, _, edge)| edge.info.id)
            .take(limit)
            .map(|(position, _, edge)| Snap {
                edge: edge.info.id,
                position,
            })
            .collect()
    }
}
