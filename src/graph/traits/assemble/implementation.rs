use crate::graph::assemble::definition::SegmentAssembler;
use crate::graph::{AssemblyError, Graph, Route, TransportMode};
use crate::transition::RouteSegmentInfo;

use geo::{LineString, Point};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::Level;

impl SegmentAssembler for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn assemble(
        &self,
        coordinates: &[Point],
        mode: TransportMode,
    ) -> Result<RouteSegmentInfo, AssemblyError> {
        let Some(first) = coordinates.first() else {
            return Err(AssemblyError::NoCoordinates);
        };

        let mut geometry = vec![*first];
        let mut edges = vec![];
        let (mut distance, mut duration) = (0.0, 0.0);

        for (leg, pair) in coordinates.windows(2).enumerate() {
            let routed = self
                .route_leg(&pair[0], &pair[1], &mode)
                .map_err(|source| AssemblyError::Disconnected { leg, source })?;

            distance += routed.distance;
            duration += routed.duration;
            geometry.extend(routed.geometry);
            edges.extend(routed.edges);
        }

        geometry.dedup();
        edges.dedup();

        debug!(
            "Assembled {} coordinates into {:.1}m over {} edges",
            coordinates.len(),
            distance,
            edges.len()
        );

        Ok(RouteSegmentInfo::new(
            LineString::from(geometry),
            coordinates.to_vec(),
            distance,
            duration,
            edges,
        ))
    }
}
