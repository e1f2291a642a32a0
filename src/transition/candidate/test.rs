use crate::config::CandidatePolicy;
use crate::graph::{EdgeFilter, EdgeId, Snap, SpatialIndex, TransportMode};
use crate::transition::{CandidateFinder, Observation, SegmentRegistry};

use geo::{Distance, Haversine, Point, point};

/// Returns a fixed set of snaps, regardless of where is queried.
struct FixedIndex(Vec<Snap>);

impl SpatialIndex for FixedIndex {
    fn nearest_edges(
        &self,
        _point: &Point,
        _distance: f64,
        limit: usize,
        _filter: &dyn EdgeFilter,
    ) -> Vec<Snap> {
        self.0.iter().take(limit).copied().collect()
    }
}

fn snap(edge: EdgeId, position: Point) -> Snap {
    Snap { edge, position }
}

const ORIGIN: Point = Point(geo::Coord {
    x: 151.18,
    y: -33.88,
});

#[test]
fn candidate_exactly_at_radius_is_included() {
    let position = point! { x: 151.1805, y: -33.88 };
    let radius = Haversine.distance(ORIGIN, position);

    let index = FixedIndex(vec![snap(7, position)]);
    let finder = CandidateFinder::new(&index, &TransportMode::Car, CandidatePolicy::Nearest);
    let observation = Observation::new(0, ORIGIN);

    let mut registry = SegmentRegistry::default();
    let inside = finder.find(&observation, radius, &mut registry);
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].distance, radius);

    let mut registry = SegmentRegistry::default();
    let outside = finder.find(&observation, radius - 1e-6, &mut registry);
    assert!(outside.is_empty());
    assert!(registry.is_empty(), "discarded snaps must not be registered");
}

#[test]
fn shared_edges_share_segments() {
    let index = FixedIndex(vec![
        snap(40, point! { x: 151.1801, y: -33.88 }),
        snap(12, point! { x: 151.18, y: -33.8801 }),
    ]);

    let finder = CandidateFinder::new(&index, &TransportMode::Car, CandidatePolicy::NearestN(2));
    let mut registry = SegmentRegistry::default();

    let first = finder.find(&Observation::new(0, ORIGIN), 50.0, &mut registry);
    let second = finder.find(&Observation::new(1, ORIGIN), 50.0, &mut registry);

    assert_eq!(first.len(), 2);
    assert_eq!(
        first.iter().map(|c| c.segment).collect::<Vec<_>>(),
        second.iter().map(|c| c.segment).collect::<Vec<_>>()
    );

    // Assigned in discovery order
    assert_eq!(registry.edge(0), Some(40));
    assert_eq!(registry.edge(1), Some(12));
    assert_eq!(registry.len(), 2);

    assert_eq!(second[0].observation, 1);
}

#[test]
fn nearest_policy_takes_one() {
    let index = FixedIndex(vec![
        snap(1, point! { x: 151.1801, y: -33.88 }),
        snap(2, point! { x: 151.1802, y: -33.88 }),
    ]);

    let finder = CandidateFinder::new(&index, &TransportMode::Car, CandidatePolicy::Nearest);
    let mut registry = SegmentRegistry::default();

    let found = finder.find(&Observation::new(0, ORIGIN), 50.0, &mut registry);
    assert_eq!(found.len(), 1);
    assert_eq!(registry.segment(1), Some(0));
    assert_eq!(registry.segment(2), None);
}

#[test]
fn registry_clears() {
    let mut registry = SegmentRegistry::default();
    assert_eq!(registry.register(9), 0);
    assert_eq!(registry.register(3), 1);
    assert_eq!(registry.register(9), 0);
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![(0, 9), (1, 3)]);

    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.register(3), 0);
}
