use crate::error::Error;
use crate::graph::{EdgeId, EdgeInfo, FatEdge, Graph, GraphStructure, Node, NodeIx, RoadClass};

use geo::{Distance, Haversine, LineString, MultiLineString, Point};
use log::{debug, info};
use rstar::RTree;
use rustc_hash::FxHashMap;
use std::time::Instant;
use wkt::TryFromWkt;

/// Incrementally assembles a [`Graph`] from ways.
///
/// Every vertex of a way becomes a node, deduplicated by its exact
/// coordinate, such that ways sharing a vertex intersect there.
/// Consecutive vertices are joined by an edge in each permitted direction.
#[derive(Default)]
pub struct GraphBuilder {
    graph: GraphStructure,
    hash: FxHashMap<NodeIx, Node>,
    positions: FxHashMap<(u64, u64), NodeIx>,

    next_edge: EdgeId,
}

impl GraphBuilder {
    /// Parses a WKT `MULTILINESTRING`, adding each linestring as a
    /// two-way way of the given `class`.
    pub fn from_wkt(wkt: &str, class: RoadClass) -> Result<Self, Error> {
        let ways = MultiLineString::<f64>::try_from_wkt_str(wkt)
            .map_err(|err| Error::Geometry(err.to_string()))?;

        let mut builder = GraphBuilder::default();
        for way in ways {
            builder.add_way(way, class, false);
        }

        Ok(builder)
    }

    /// Adds a way using the default speed of its `class`.
    pub fn add_way(&mut self, way: LineString, class: RoadClass, oneway: bool) -> &mut Self {
        self.add_way_with_speed(way, class, oneway, class.default_speed())
    }

    /// Adds a way with an explicit free-flow `speed`, in km/h.
    pub fn add_way_with_speed(
        &mut self,
        way: LineString,
        class: RoadClass,
        oneway: bool,
        speed: f64,
    ) -> &mut Self {
        let nodes = way
            .points()
            .map(|point| self.node(point))
            .collect::<Vec<_>>();

        nodes.windows(2).for_each(|pair| {
            let [a, b] = [pair[0], pair[1]];
            if a.id == b.id {
                debug!("Skipping degenerate edge at {:?}", a.position);
                return;
            }

            let info = EdgeInfo {
                id: self.next_edge,
                length: Haversine.distance(a.position, b.position),
                speed,
                access: class.access(),
                class,
            };
            self.next_edge += 1;

            self.graph.add_edge(a.id, b.id, info);
            if !oneway {
                self.graph.add_edge(b.id, a.id, info);
            }
        });

        self
    }

    fn node(&mut self, position: Point) -> Node {
        let key = (position.x().to_bits(), position.y().to_bits());
        let next = self.hash.len() as NodeIx;

        let id = *self.positions.entry(key).or_insert(next);
        *self
            .hash
            .entry(id)
            .or_insert_with(|| Node::new(position, id))
    }

    /// Finalises the network, bulk-loading the edge index.
    pub fn build(self) -> Graph {
        let start_time = Instant::now();

        let fat = self
            .graph
            .all_edges()
            .filter_map(|(source, target, info)| {
                Some(FatEdge {
                    source: *self.hash.get(&source)?,
                    target: *self.hash.get(&target)?,
                    info: *info,
                })
            })
            .collect::<Vec<_>>();

        let index_edge = RTree::bulk_load(fat);

        info!(
            "Built graph of {} nodes and {} directed edges in {}us",
            self.hash.len(),
            index_edge.size(),
            start_time.elapsed().as_micros()
        );

        Graph {
            graph: self.graph,
            hash: self.hash,
            index_edge,
        }
    }
}
