use crate::config::{CandidatePolicy, MatchOptions};
use crate::graph::*;
use crate::transition::*;

use approx::assert_relative_eq;
use geo::{Distance, Haversine, LineString, Point, point};
use std::cell::Cell;

const STREET: f64 = -33.88;
const WEST: f64 = 151.18;

/// A single east-west street, split into ~92m edges identified by
/// their distance from [`WEST`]. Routes follow the street directly.
#[derive(Default)]
struct Street {
    /// Distance added to any assembly which travels westward.
    westward_detour: f64,

    /// Refuses to assemble westward travel.
    one_way: bool,

    /// Times the fastest speed has been asked for.
    speed_queries: Cell<usize>,
}

impl Street {
    fn edge(position: &Point) -> EdgeInfo {
        EdgeInfo {
            id: ((position.x() - WEST) / 0.001).floor() as EdgeId,
            length: 92.0,
            speed: 50.0,
            access: RoadClass::Residential.access(),
            class: RoadClass::Residential,
        }
    }
}

impl SpatialIndex for Street {
    fn nearest_edges(
        &self,
        point: &Point,
        _distance: f64,
        limit: usize,
        filter: &dyn EdgeFilter,
    ) -> Vec<Snap> {
        let edge = Street::edge(point);
        if limit == 0 || !filter.permits(&edge) {
            return vec![];
        }

        vec![Snap {
            edge: edge.id,
            position: point! { x: point.x(), y: STREET },
        }]
    }
}

impl RoutingOracle for Street {
    fn shortest_path(
        &self,
        from: &Point,
        to: &Point,
        _filter: &dyn EdgeFilter,
    ) -> Result<PathCost, RoutingError> {
        let distance = Haversine.distance(*from, *to);
        Ok(PathCost {
            distance,
            duration: distance / (50.0 / 3.6),
        })
    }

    fn max_speed(&self, _filter: &dyn EdgeFilter) -> f64 {
        self.speed_queries.set(self.speed_queries.get() + 1);
        50.0
    }
}

impl SegmentAssembler for Street {
    fn assemble(
        &self,
        coordinates: &[Point],
        _mode: TransportMode,
    ) -> Result<RouteSegmentInfo, AssemblyError> {
        let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
            return Err(AssemblyError::NoCoordinates);
        };

        let westward = last.x() < first.x();
        if westward && self.one_way {
            return Err(AssemblyError::Disconnected {
                leg: 0,
                source: RoutingError::NoPath,
            });
        }

        let mut distance = Haversine.distance(*first, *last);
        if westward {
            distance += self.westward_detour;
        }

        Ok(along(coordinates, distance))
    }
}

fn along(coordinates: &[Point], distance: f64) -> RouteSegmentInfo {
    RouteSegmentInfo::new(
        LineString::from(coordinates.to_vec()),
        coordinates.to_vec(),
        distance,
        distance / (50.0 / 3.6),
        vec![],
    )
}

const LANE: f64 = STREET + 0.00004;

/// The [`Street`], with a service lane ~4.4m to its north.
///
/// The lane lies nearer to the trace than the street does, but is broken
/// up, so routes along it are three times the straight-line distance, and
/// routes between the lane and the street detour by 200m.
struct Bypass;

impl Bypass {
    fn on_lane(position: &Point) -> bool {
        position.y() > STREET + 0.00002
    }
}

impl SpatialIndex for Bypass {
    fn nearest_edges(
        &self,
        point: &Point,
        _distance: f64,
        limit: usize,
        filter: &dyn EdgeFilter,
    ) -> Vec<Snap> {
        let street = Street::edge(point);
        let lane = EdgeInfo {
            id: street.id + 100,
            ..street
        };

        [(lane, LANE), (street, STREET)]
            .into_iter()
            .filter(|(edge, _)| filter.permits(edge))
            .take(limit)
            .map(|(edge, y)| Snap {
                edge: edge.id,
                position: point! { x: point.x(), y: y },
            })
            .collect()
    }
}

impl RoutingOracle for Bypass {
    fn shortest_path(
        &self,
        from: &Point,
        to: &Point,
        _filter: &dyn EdgeFilter,
    ) -> Result<PathCost, RoutingError> {
        let straight = Haversine.distance(*from, *to);
        let distance = match (Bypass::on_lane(from), Bypass::on_lane(to)) {
            (false, false) => straight,
            (true, true) => 3.0 * straight,
            _ => straight + 200.0,
        };

        Ok(PathCost {
            distance,
            duration: distance / (50.0 / 3.6),
        })
    }

    fn max_speed(&self, _filter: &dyn EdgeFilter) -> f64 {
        50.0
    }
}

impl SegmentAssembler for Bypass {
    fn assemble(
        &self,
        coordinates: &[Point],
        _mode: TransportMode,
    ) -> Result<RouteSegmentInfo, AssemblyError> {
        let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
            return Err(AssemblyError::NoCoordinates);
        };

        Ok(along(coordinates, Haversine.distance(*first, *last)))
    }
}

/// Positions ~2m north of the street, at the given longitudes.
fn trace(longitudes: &[f64]) -> Vec<Point> {
    longitudes
        .iter()
        .map(|x| point! { x: *x, y: STREET + 0.00002 })
        .collect()
}

fn both() -> MatchOptions {
    MatchOptions::default().with_both_directions(true)
}

#[test_log::test]
fn empty_trace_gives_empty_result() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());

    let result = matcher.r#match(&[]);
    assert!(result.is_empty());
    assert!(result.errors.is_empty());
}

#[test_log::test]
fn single_observation_gives_single_point() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, MatchOptions::default());

    let result = matcher.r#match(&trace(&[151.1805]));
    let forward = result.forward.expect("must match");

    assert_eq!(forward.matched, vec![point! { x: 151.1805, y: STREET }]);
    assert_eq!(forward.distance, 0.0);
    assert_eq!(forward.status, MatchStatus::Fallback);
    assert!(result.reverse.is_none());
}

#[test_log::test]
fn distant_observations_give_no_candidates() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());

    let result = matcher.r#match(&[point! { x: 151.1805, y: -33.9 }]);
    assert!(result.is_empty());
    assert_eq!(
        result.errors,
        vec![
            (Pass::Forward, MatchError::NoCandidates),
            (Pass::Reverse, MatchError::NoCandidates)
        ]
    );
}

#[test_log::test]
fn unmatched_observations_are_skipped() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, MatchOptions::default());

    let mut observations = trace(&[151.1805, 151.1815, 151.1825]);
    observations.insert(1, point! { x: 151.181, y: -33.9 });

    let result = matcher.r#match(&observations);
    let forward = result.forward.expect("must match");

    assert_eq!(forward.skipped, vec![1]);
    assert_eq!(forward.matched.len(), 3);
    assert_eq!(forward.status, MatchStatus::Decoded);
    assert_eq!(matcher.scratch().skipped(), &[1]);
}

#[test_log::test]
fn reverse_pass_decodes_in_reverse() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());

    let result = matcher.r#match(&trace(&[151.1805, 151.1815, 151.1825]));
    let (forward, reverse) = (
        result.forward.as_ref().expect("forward"),
        result.reverse.as_ref().expect("reverse"),
    );

    let mut reversed = forward.matched.clone();
    reversed.reverse();

    assert_eq!(reverse.matched, reversed);
    assert_relative_eq!(forward.distance, reverse.distance);
    assert_eq!(result.discarded, None);
    assert_eq!(result.segments().count(), 2);
}

#[test_log::test]
fn loop_in_reverse_is_discarded() {
    let street = Street {
        westward_detour: 50.0,
        ..Street::default()
    };

    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());

    // ~37m apart, so the reverse must not exceed 1.2x the forward.
    let result = matcher.r#match(&trace(&[151.1808, 151.1812]));

    let forward = result.forward.as_ref().expect("forward is kept");
    assert!(forward.distance < 100.0);
    assert!(result.reverse.is_none());
    assert_eq!(result.discarded, Some(Pass::Reverse));
    assert!(result.errors.is_empty());
}

#[test_log::test]
fn failed_assembly_keeps_other_pass() {
    let street = Street {
        one_way: true,
        ..Street::default()
    };

    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());
    let result = matcher.r#match(&trace(&[151.1805, 151.1815]));

    assert!(result.forward.is_some());
    assert!(result.reverse.is_none());
    assert_eq!(result.discarded, None);
    assert!(matches!(
        result.errors.as_slice(),
        [(Pass::Reverse, MatchError::Assembly(_))]
    ));
}

#[test_log::test]
fn matching_is_deterministic() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());
    let observations = trace(&[151.1805, 151.1812, 151.1826, 151.1835]);

    let first = matcher.r#match(&observations).into_vec();
    let second = matcher.r#match(&observations).into_vec();

    assert_eq!(first, second);
}

#[test_log::test]
fn scratch_is_cleared_between_traces() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, MatchOptions::default());

    matcher.r#match(&trace(&[151.1805, 151.1815, 151.1825, 151.1835]));
    assert_eq!(matcher.scratch().registry().len(), 4);

    matcher.r#match(&trace(&[151.1855, 151.1865]));
    let registry = matcher.scratch().registry();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.edge(0), Some(5));
    assert_eq!(matcher.scratch().candidates().len(), 2);

    matcher.clear();
    assert!(matcher.scratch().registry().is_empty());
    assert_eq!(matcher.scratch().lattice().segments(), 0);
}

#[test_log::test]
fn edge_filter_restricts_candidates() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, MatchOptions::default());
    matcher.set_edge_filter(|edge: &EdgeInfo| edge.id != 0);

    let result = matcher.r#match(&trace(&[151.1805, 151.1815, 151.1825]));
    let forward = result.forward.expect("must match");

    assert_eq!(forward.skipped, vec![0]);
    assert_eq!(forward.matched.len(), 2);
}

#[test_log::test]
fn mode_filter_applies_by_default() {
    let street = Street::default();
    let options = MatchOptions::default().with_mode(TransportMode::Foot);

    // Residential roads permit every mode.
    let mut matcher = HiddenMarkovMatcher::with_network(&street, options);
    assert!(!matcher.r#match(&trace(&[151.1805])).is_empty());

    matcher.set_edge_filter(|edge: &EdgeInfo| edge.class == RoadClass::Footway);
    assert!(matcher.r#match(&trace(&[151.1805])).is_empty());
}

#[test_log::test]
fn max_speed_is_queried_once_per_filter() {
    let street = Street::default();
    let mut matcher = HiddenMarkovMatcher::with_network(&street, both());
    let observations = trace(&[151.1805, 151.1815, 151.1825]);

    matcher.r#match(&observations);
    matcher.r#match(&observations);
    assert_eq!(street.speed_queries.get(), 1);

    matcher.set_edge_filter(|edge: &EdgeInfo| edge.id != 0);
    matcher.r#match(&observations);
    assert_eq!(street.speed_queries.get(), 2);

    // The mode is unchanged, so the filter still applies.
    matcher.set_options(both().with_search_radius(40.0));
    matcher.r#match(&observations);
    assert_eq!(street.speed_queries.get(), 2);
}

/// Positions between the lane and the street, nearer the lane.
fn bypass_trace() -> Vec<Point> {
    [151.1805, 151.1815, 151.1825]
        .iter()
        .map(|x| point! { x: *x, y: STREET + 0.000025 })
        .collect()
}

#[test_log::test]
fn nearest_candidate_alone_follows_the_lane() {
    let mut matcher = HiddenMarkovMatcher::with_network(&Bypass, MatchOptions::default());

    let result = matcher.r#match(&bypass_trace());
    let forward = result.forward.expect("must match");

    assert_eq!(matcher.scratch().candidates().len(), 3);
    assert_eq!(forward.status, MatchStatus::Decoded);
    assert!(forward.matched.iter().all(|position| position.y() == LANE));
}

#[test_log::test]
fn second_nearest_candidate_wins_on_transition() {
    let options = both().with_candidates(CandidatePolicy::NearestN(2));
    let mut matcher = HiddenMarkovMatcher::with_network(&Bypass, options);

    let result = matcher.r#match(&bypass_trace());
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(matcher.scratch().candidates().len(), 6);
    assert_eq!(matcher.scratch().registry().len(), 6);

    // Both candidates of a column share a step, so each may transition to the other.
    let lattice = matcher.scratch().lattice();
    assert!(lattice.ln_transition(0, 1).is_finite());
    assert!(lattice.ln_transition(1, 0).is_finite());

    assert_eq!(result.segments().count(), 2);
    for segment in result.segments() {
        assert_eq!(segment.status, MatchStatus::Decoded);
        assert_eq!(segment.matched.len(), 3);
        assert!(segment.matched.iter().all(|position| position.y() == STREET));
    }
}
