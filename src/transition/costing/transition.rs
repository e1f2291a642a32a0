use crate::graph::PathCost;
use crate::transition::{Candidate, Strategy};

pub trait TransitionStrategy: for<'a> Strategy<TransitionContext<'a>> {}
impl<T> TransitionStrategy for T where T: for<'a> Strategy<TransitionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// The candidate representing the segment travelled from.
    pub source_candidate: &'a Candidate,

    /// The candidate representing the segment travelled to.
    pub target_candidate: &'a Candidate,

    /// The cost of the fastest path between the two candidates.
    pub optimal_path: PathCost,

    /// The great-circle distance between the observation of the source
    /// candidate and the observation which follows it, in meters.
    pub straightline_distance: f64,

    /// Scales applied to the whole lattice, see [`TransitionReference`].
    pub reference: TransitionReference,
}

/// Normalisation constants shared by every transition of one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionReference {
    /// The distance of the first non-zero leg of the trace, in meters.
    /// Zero when every observation lies at the same position.
    pub distance: f64,

    /// The time taken to travel [`TransitionReference::distance`]
    /// at the fastest permitted speed, in seconds.
    pub duration: f64,
}

impl TransitionReference {
    /// Derives the reference from the legs of a trace, and the
    /// fastest permitted speed, in km/h.
    pub fn new(legs: &[f64], max_speed: f64) -> Self {
        let distance = legs.iter().copied().find(|leg| *leg > 0.0).unwrap_or(0.0);

        Self {
            distance,
            duration: distance / (max_speed / 3.6),
        }
    }
}

impl TransitionContext<'_> {
    /// The discrepancy between the straight-line distance and the routed
    /// distance, relative to the reference distance.
    pub fn distance_deviance(&self) -> f64 {
        if self.reference.distance <= 0.0 {
            return 0.0;
        }

        (self.straightline_distance - self.optimal_path.distance).abs() / self.reference.distance
    }

    /// The discrepancy between the routed duration and the duration
    /// of the reference leg at free-flow speed, relative to the latter.
    pub fn duration_deviance(&self) -> f64 {
        let reference = self.reference.duration;
        if !reference.is_finite() || reference <= 0.0 {
            return 0.0;
        }

        (self.optimal_path.duration - reference).abs() / reference
    }
}
