use crate::graph::route::definition::{Leg, PathCost, Route, RoutingOracle};
use crate::graph::{EdgeFilter, FatEdge, Graph, NodeIx, RoutingError, Scan};

use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use log::debug;
use petgraph::visit::EdgeRef;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Positions given to the router are expected to lie upon the network,
/// so only edges this close are considered.
const SNAP_RADIUS: f64 = 10.0;

/// Edges within this distance of the closest are equally valid entry
/// points, such as either direction of a two-way road, or every edge
/// meeting at an intersection.
const SNAP_TOLERANCE: f64 = 0.5;

/// A position upon a directed edge, from which a leg may enter or leave the graph.
struct Anchor<'a> {
    edge: &'a FatEdge,
    position: Point,
    fraction: f64,
}

impl Graph {
    fn anchors<'a>(&'a self, point: &Point, filter: &dyn EdgeFilter) -> Vec<Anchor<'a>> {
        let projected = self
            .scan_edges(point, SNAP_RADIUS)
            .filter(|edge| filter.permits(&edge.info))
            .filter_map(|edge| {
                let (position, fraction) = edge.project(point)?;
                let distance = Haversine.distance(position, *point);
                (distance <= SNAP_RADIUS).then_some((distance, Anchor {
                    edge,
                    position,
                    fraction,
                }))
            })
            .collect::<Vec<_>>();

        let closest = projected
            .iter()
            .map(|(distance, _)| *distance)
            .fold(f64::INFINITY, f64::min);

        projected
            .into_iter()
            .filter(|(distance, _)| *distance <= closest + SNAP_TOLERANCE)
            .map(|(_, anchor)| anchor)
            .sorted_by_key(|anchor| (anchor.edge.source.id, anchor.edge.target.id))
            .collect()
    }

    /// Connects two anchors, either directly along a shared directed edge,
    /// or through the graph from the end of one edge to the start of the other.
    fn connect(&self, source: &Anchor, target: &Anchor, filter: &dyn EdgeFilter) -> Option<Leg> {
        let (from, to) = (source.edge, target.edge);

        if Self::shares_edge(source, target) {
            let distance = Haversine.distance(source.position, target.position);
            return Some(Leg {
                distance,
                duration: from.info.duration(distance),
                geometry: vec![source.position, target.position],
                edges: vec![from.info.id],
            });
        }

        let (_, path) = self.route_nodes(from.target.id, to.source.id, filter)?;

        let head = from.offset_to_target(source.position);
        let mut distance = head;
        let mut duration = from.info.duration(head);
        let mut geometry = vec![source.position, from.target.position];
        let mut edges = vec![from.info.id];

        for pair in path.windows(2) {
            let info = self.graph.edge_weight(pair[0], pair[1])?;
            distance += info.length;
            duration += info.duration(info.length);
            edges.push(info.id);
            geometry.push(self.get_position(&pair[1])?);
        }

        let tail = to.offset_from_source(target.position);
        distance += tail;
        duration += to.info.duration(tail);
        edges.push(to.info.id);
        geometry.push(target.position);

        geometry.dedup();
        edges.dedup();

        Some(Leg {
            distance,
            duration,
            geometry,
            edges,
        })
    }

    /// The cost of [`Graph::connect`], without collecting the geometry or edges.
    fn connect_cost(
        &self,
        source: &Anchor,
        target: &Anchor,
        filter: &dyn EdgeFilter,
    ) -> Option<PathCost> {
        let (from, to) = (source.edge, target.edge);

        if Self::shares_edge(source, target) {
            let distance = Haversine.distance(source.position, target.position);
            return Some(PathCost {
                distance,
                duration: from.info.duration(distance),
            });
        }

        let (interior, path) = self.route_nodes(from.target.id, to.source.id, filter)?;
        let length = path
            .windows(2)
            .map(|pair| self.graph.edge_weight(pair[0], pair[1]).map(|info| info.length))
            .sum::<Option<f64>>()?;

        let head = from.offset_to_target(source.position);
        let tail = to.offset_from_source(target.position);

        Some(PathCost {
            distance: head + length + tail,
            duration: from.info.duration(head) + interior + to.info.duration(tail),
        })
    }

    fn shares_edge(source: &Anchor, target: &Anchor) -> bool {
        let (from, to) = (source.edge, target.edge);
        from.source.id == to.source.id
            && from.target.id == to.target.id
            && target.fraction >= source.fraction
    }

    /// Connects every pair of anchors about `from` and `to`, keeping the fastest.
    fn fastest<T>(
        &self,
        from: &Point,
        to: &Point,
        filter: &dyn EdgeFilter,
        connect: impl Fn(&Anchor, &Anchor) -> Option<T>,
        duration: impl Fn(&T) -> f64,
    ) -> Result<T, RoutingError> {
        let sources = self.anchors(from, filter);
        if sources.is_empty() {
            return Err(RoutingError::Unsnappable {
                end: "source",
                radius: SNAP_RADIUS,
            });
        }

        let targets = self.anchors(to, filter);
        if targets.is_empty() {
            return Err(RoutingError::Unsnappable {
                end: "target",
                radius: SNAP_RADIUS,
            });
        }

        let mut best: Option<T> = None;
        for (source, target) in sources.iter().cartesian_product(targets.iter()) {
            let Some(leg) = connect(source, target) else {
                continue;
            };

            if best.as_ref().is_none_or(|best| duration(&leg) < duration(best)) {
                best = Some(leg);
            }
        }

        best.ok_or_else(|| {
            debug!("No path between {from:?} and {to:?}");
            RoutingError::NoPath
        })
    }
}

impl Route for Graph {
    fn route_nodes(
        &self,
        start_node: NodeIx,
        finish_node: NodeIx,
        filter: &dyn EdgeFilter,
    ) -> Option<(f64, Vec<NodeIx>)> {
        let (score, path) = petgraph::algo::astar(
            &self.graph,
            start_node,
            |finish| finish == finish_node,
            |e| {
                let info = e.weight();
                if filter.permits(info) {
                    info.duration(info.length)
                } else {
                    f64::INFINITY
                }
            },
            |_| 0.0,
        )?;

        score.is_finite().then_some((score, path))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self, filter)))]
    fn route_leg(
        &self,
        from: &Point,
        to: &Point,
        filter: &dyn EdgeFilter,
    ) -> Result<Leg, RoutingError> {
        self.fastest(
            from,
            to,
            filter,
            |source, target| self.connect(source, target, filter),
            |leg| leg.duration,
        )
    }
}

impl RoutingOracle for Graph {
    #[inline]
    fn shortest_path(
        &self,
        from: &Point,
        to: &Point,
        filter: &dyn EdgeFilter,
    ) -> Result<PathCost, RoutingError> {
        self.fastest(
            from,
            to,
            filter,
            |source, target| self.connect_cost(source, target, filter),
            |cost| cost.duration,
        )
    }

    #[inline]
    fn max_speed(&self, filter: &dyn EdgeFilter) -> f64 {
        Graph::max_speed(self, filter)
    }
}
