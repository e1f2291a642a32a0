use crate::transition::SegmentId;

use geo::Point;

/// A raw position of the trace, at some index `t` within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub index: usize,
    pub position: Point,
}

impl Observation {
    pub fn new(index: usize, position: Point) -> Self {
        Self { index, position }
    }
}

/// A position upon the network onto which an [`Observation`] may be matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The snapped position upon the segment.
    pub position: Point,

    /// The segment the position lies upon, local to the current trace.
    /// See [`SegmentRegistry`](crate::SegmentRegistry).
    pub segment: SegmentId,

    /// Index of the observation this candidate was found for,
    /// always in the original order of the trace.
    pub observation: usize,

    /// Great-circle distance between the observation and the snapped position, in meters.
    pub distance: f64,
}
