use crate::config::CandidatePolicy;
use crate::graph::{EdgeFilter, SpatialIndex};
use crate::transition::{Candidate, Observation, SegmentRegistry};

use geo::{Distance, Haversine};

#[cfg(feature = "tracing")]
use tracing::Level;

/// Discovers the [`Candidate`]s of an observation through a [`SpatialIndex`].
pub struct CandidateFinder<'a, I>
where
    I: SpatialIndex + ?Sized,
{
    index: &'a I,
    filter: &'a dyn EdgeFilter,
    policy: CandidatePolicy,
}

impl<'a, I> CandidateFinder<'a, I>
where
    I: SpatialIndex + ?Sized,
{
    pub fn new(index: &'a I, filter: &'a dyn EdgeFilter, policy: CandidatePolicy) -> Self {
        Self {
            index,
            filter,
            policy,
        }
    }

    /// Finds the candidates of the `observation` within `radius` meters, nearest first.
    ///
    /// A snap lying exactly `radius` meters away is kept. The edge of every
    /// kept snap is registered, so its candidate carries the shared [`SegmentId`](crate::SegmentId).
    ///
    /// An empty result is not an error, the observation is simply unmatched.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self, registry)))]
    pub fn find(
        &self,
        observation: &Observation,
        radius: f64,
        registry: &mut SegmentRegistry,
    ) -> Vec<Candidate> {
        self.index
            .nearest_edges(&observation.position, radius, self.policy.limit(), self.filter)
            .into_iter()
            .filter_map(|snap| {
                let distance = Haversine.distance(observation.position, snap.position);
                (distance <= radius).then(|| Candidate {
                    position: snap.position,
                    segment: registry.register(snap.edge),
                    observation: observation.index,
                    distance,
                })
            })
            .collect()
    }
}
