use crate::graph::EdgeId;
use crate::transition::MatchError;

use geo::{LineString, Point};
use serde::Serialize;
use strum::{AsRefStr, Display};

/// The direction in which a trace was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Observations in the order they were recorded.
    Forward,

    /// Observations in reverse order.
    Reverse,
}

/// How the matched coordinates of a [`RouteSegmentInfo`] were chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Chosen by the decoder.
    #[default]
    Decoded,

    /// The decoder started and finished upon the same segment, so each
    /// observation was matched onto its nearest candidate instead.
    Fallback,
}

/// A connected, routable segment of the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegmentInfo {
    /// The routed path through every matched coordinate.
    pub geometry: LineString,

    /// The coordinates the segment was assembled from, in order.
    pub matched: Vec<Point>,

    /// Routed distance, in meters.
    pub distance: f64,

    /// Free-flow travel time, in seconds.
    pub duration: f64,

    /// The edges traversed, in order.
    pub edges: Vec<EdgeId>,

    pub status: MatchStatus,

    /// Indices of the observations which had no candidate,
    /// and so contributed nothing to the segment.
    pub skipped: Vec<usize>,
}

impl RouteSegmentInfo {
    pub fn new(
        geometry: LineString,
        matched: Vec<Point>,
        distance: f64,
        duration: f64,
        edges: Vec<EdgeId>,
    ) -> Self {
        Self {
            geometry,
            matched,
            distance,
            duration,
            edges,
            status: MatchStatus::Decoded,
            skipped: vec![],
        }
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_skipped(mut self, skipped: Vec<usize>) -> Self {
        self.skipped = skipped;
        self
    }
}

/// The outcome of matching a trace.
///
/// Holds up to one segment per [`Pass`]. A pass without a segment either
/// was not requested, failed (see [`MatchResult::errors`]), or was discarded
/// as the likely loop (see [`MatchResult::discarded`]).
#[derive(Debug, Default)]
pub struct MatchResult {
    pub forward: Option<RouteSegmentInfo>,
    pub reverse: Option<RouteSegmentInfo>,

    /// Why each failed pass produced no segment.
    pub errors: Vec<(Pass, MatchError)>,

    /// The pass whose segment was dropped during reconciliation.
    pub discarded: Option<Pass>,
}

impl MatchResult {
    /// The retained segments, forward first.
    pub fn segments(&self) -> impl Iterator<Item = &RouteSegmentInfo> {
        self.forward.iter().chain(self.reverse.iter())
    }

    pub fn segment(&self, pass: Pass) -> Option<&RouteSegmentInfo> {
        match pass {
            Pass::Forward => self.forward.as_ref(),
            Pass::Reverse => self.reverse.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, pass: Pass) -> &mut Option<RouteSegmentInfo> {
        match pass {
            Pass::Forward => &mut self.forward,
            Pass::Reverse => &mut self.reverse,
        }
    }

    /// Returns `true` when no segment was retained.
    pub fn is_empty(&self) -> bool {
        self.forward.is_none() && self.reverse.is_none()
    }

    pub fn into_vec(self) -> Vec<RouteSegmentInfo> {
        self.forward.into_iter().chain(self.reverse).collect()
    }
}
