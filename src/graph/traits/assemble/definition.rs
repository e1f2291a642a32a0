use crate::graph::{AssemblyError, TransportMode};
use crate::transition::RouteSegmentInfo;

use geo::Point;

/// Converts a sequence of matched coordinates into a single
/// connected, routable segment spanning them in order.
pub trait SegmentAssembler {
    fn assemble(
        &self,
        coordinates: &[Point],
        mode: TransportMode,
    ) -> Result<RouteSegmentInfo, AssemblyError>;
}
