//! The probability tables of the hidden markov model,
//! indexed by [`SegmentId`] and column.

use crate::graph::{EdgeFilter, RoutingOracle};
use crate::transition::*;

use geo::{Distance, Haversine, Point};
use log::debug;
use std::ops::Range;

#[cfg(feature = "tracing")]
use tracing::Level;

/// A column of the lattice, holding the candidates of one observation.
///
/// Only observations with at least one candidate form a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Position of the observation within the pass.
    pub step: usize,

    /// The column's candidates, as a range of the candidate buffer.
    pub candidates: Range<usize>,
}

/// The candidates of a single pass, arranged into columns in pass order.
#[derive(Debug, Clone, Copy)]
pub struct Trellis<'s> {
    /// Every observation, in the original order of the trace.
    pub observations: &'s [Point],
    pub candidates: &'s [Candidate],
    pub columns: &'s [Column],

    /// See [`leg_distances`].
    pub legs: &'s [f64],

    /// The number of distinct segments.
    pub segments: usize,
}

impl<'s> Trellis<'s> {
    pub fn column(&self, column: &Column) -> &'s [Candidate] {
        self.candidates
            .get(column.candidates.clone())
            .unwrap_or_default()
    }
}

/// Fills `into` with the great-circle distance from each observation to the next.
///
/// The final observation has no successor, so it repeats the distance
/// of the leg before it. A single observation has a leg of zero.
pub fn leg_distances(observations: impl Iterator<Item = Point>, into: &mut Vec<f64>) {
    into.clear();
    into.extend(
        observations
            .collect::<Vec<_>>()
            .windows(2)
            .map(|pair| Haversine.distance(pair[0], pair[1])),
    );

    into.push(into.last().copied().unwrap_or(0.0));
}

/// Start, emission and transition tables over `R` segments and `C` columns.
///
/// Values are held as natural logarithms, where negative infinity is
/// a probability of zero, marking the impossible or unmodelled.
/// Every probability lies within `[0, 1]`.
///
/// The tables are reused across calls to [`Lattice::reset`].
#[derive(Debug, Default, Clone)]
pub struct Lattice {
    segments: usize,
    columns: usize,

    start: Vec<f64>,
    emission: Vec<f64>,
    transition: Vec<f64>,
}

impl Lattice {
    pub fn new(segments: usize, columns: usize) -> Self {
        let mut lattice = Lattice::default();
        lattice.reset(segments, columns);
        lattice
    }

    /// Resizes the tables, marking every entry impossible.
    pub fn reset(&mut self, segments: usize, columns: usize) {
        self.segments = segments;
        self.columns = columns;

        for (table, size) in [
            (&mut self.start, segments),
            (&mut self.emission, segments * columns),
            (&mut self.transition, segments * segments),
        ] {
            table.clear();
            table.resize(size, f64::NEG_INFINITY);
        }
    }

    pub fn clear(&mut self) {
        self.reset(0, 0);
    }

    #[inline]
    pub fn segments(&self) -> usize {
        self.segments
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn ln_start(&self, segment: SegmentId) -> f64 {
        self.start
            .get(segment)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    #[inline]
    pub fn ln_emission(&self, segment: SegmentId, column: usize) -> f64 {
        if column >= self.columns {
            return f64::NEG_INFINITY;
        }

        self.emission
            .get(segment * self.columns + column)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    #[inline]
    pub fn ln_transition(&self, source: SegmentId, target: SegmentId) -> f64 {
        if target >= self.segments {
            return f64::NEG_INFINITY;
        }

        self.transition
            .get(source * self.segments + target)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    pub fn start(&self, segment: SegmentId) -> f64 {
        self.ln_start(segment).exp()
    }

    pub fn emission(&self, segment: SegmentId, column: usize) -> f64 {
        self.ln_emission(segment, column).exp()
    }

    pub fn transition(&self, source: SegmentId, target: SegmentId) -> f64 {
        self.ln_transition(source, target).exp()
    }

    pub fn set_ln_start(&mut self, segment: SegmentId, value: f64) {
        if let Some(entry) = self.start.get_mut(segment) {
            *entry = value;
        }
    }

    pub fn set_ln_emission(&mut self, segment: SegmentId, column: usize, value: f64) {
        if column >= self.columns {
            return;
        }

        if let Some(entry) = self.emission.get_mut(segment * self.columns + column) {
            *entry = value;
        }
    }

    pub fn set_ln_transition(&mut self, source: SegmentId, target: SegmentId, value: f64) {
        if target >= self.segments {
            return;
        }

        if let Some(entry) = self.transition.get_mut(source * self.segments + target) {
            *entry = value;
        }
    }
}

/// Populates a [`Lattice`] from the candidates of a pass.
///
/// ### Representatives
/// A segment may hold candidates in many columns. Transitions are costed
/// between a single representative of each, being its candidate in the
/// earliest column of the pass. A transition from `i` to `j` is modelled
/// only when `i`'s representative does not come after `j`'s.
pub struct LatticeBuilder<'a, O, E, T>
where
    O: RoutingOracle + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    oracle: &'a O,
    filter: &'a dyn EdgeFilter,
    costing: &'a CostingStrategies<E, T>,
    max_speed: Option<f64>,
}

impl<'a, O, E, T> LatticeBuilder<'a, O, E, T>
where
    O: RoutingOracle + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(
        oracle: &'a O,
        filter: &'a dyn EdgeFilter,
        costing: &'a CostingStrategies<E, T>,
    ) -> Self {
        Self {
            oracle,
            filter,
            costing,
            max_speed: None,
        }
    }

    /// Supplies the fastest speed the filter permits, in km/h,
    /// rather than querying the oracle for it.
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Resets the `lattice` to the shape of the `trellis` and fills every table.
    ///
    /// Issues one routing query per modelled transition, which is up to
    /// `R²` queries and dominates the cost of matching.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip_all))]
    pub fn build(&self, trellis: Trellis, lattice: &mut Lattice) {
        lattice.reset(trellis.segments, trellis.columns.len());

        let mut representatives: Vec<Option<(usize, &Candidate)>> = vec![None; trellis.segments];

        for (index, column) in trellis.columns.iter().enumerate() {
            for candidate in trellis.column(column) {
                let Some(source) = trellis.observations.get(candidate.observation) else {
                    continue;
                };

                let context = EmissionContext::new(&candidate.position, source, candidate.distance);
                let ln_emission = self.costing.ln_emission(context);

                lattice.set_ln_emission(candidate.segment, index, ln_emission);
                if index == 0 {
                    lattice.set_ln_start(candidate.segment, ln_emission);
                }

                if let Some(slot) = representatives.get_mut(candidate.segment) {
                    slot.get_or_insert((column.step, candidate));
                }
            }
        }

        let max_speed = self
            .max_speed
            .unwrap_or_else(|| self.oracle.max_speed(self.filter));
        let reference = TransitionReference::new(trellis.legs, max_speed);
        let mut queries = 0;

        for (i, source) in representatives.iter().enumerate() {
            let Some((source_step, source)) = *source else {
                continue;
            };

            let straightline_distance = trellis.legs.get(source_step).copied().unwrap_or(0.0);

            for (j, target) in representatives.iter().enumerate() {
                let Some((target_step, target)) = *target else {
                    continue;
                };

                if i == j || target_step < source_step {
                    continue;
                }

                queries += 1;
                let ln_transition = match self.oracle.shortest_path(
                    &source.position,
                    &target.position,
                    self.filter,
                ) {
                    Ok(optimal_path) => self.costing.ln_transition(TransitionContext {
                        source_candidate: source,
                        target_candidate: target,
                        optimal_path,
                        straightline_distance,
                        reference,
                    }),
                    Err(error) => {
                        debug!("No transition from segment {i} to {j}: {error}");
                        f64::NEG_INFINITY
                    }
                };

                lattice.set_ln_transition(i, j, ln_transition);
            }
        }

        debug!(
            "Built lattice of {} segments over {} columns using {} routing queries",
            lattice.segments(),
            lattice.columns(),
            queries
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::{PathCost, RoutingError, TransportMode};

    use approx::assert_relative_eq;
    use geo::point;

    /// Routes along the straight line between positions, at 36km/h.
    /// Positions west of the `wall` cannot reach those east of it.
    struct StraightOracle {
        wall: f64,
    }

    impl RoutingOracle for StraightOracle {
        fn shortest_path(
            &self,
            from: &Point,
            to: &Point,
            _filter: &dyn EdgeFilter,
        ) -> Result<PathCost, RoutingError> {
            if (from.x() < self.wall) != (to.x() < self.wall) {
                return Err(RoutingError::NoPath);
            }

            let distance = Haversine.distance(*from, *to);
            Ok(PathCost {
                distance,
                duration: distance / 10.0,
            })
        }

        fn max_speed(&self, _filter: &dyn EdgeFilter) -> f64 {
            36.0
        }
    }

    fn observations() -> Vec<Point> {
        vec![
            point! { x: 151.1800, y: -33.88 },
            point! { x: 151.1810, y: -33.88 },
            point! { x: 151.1820, y: -33.88 },
        ]
    }

    fn candidate(position: Point, segment: SegmentId, observation: usize) -> Candidate {
        Candidate {
            position,
            segment,
            observation,
            distance: 2.0,
        }
    }

    /// One candidate per observation, the first two on segment 0.
    fn candidates(observations: &[Point]) -> Vec<Candidate> {
        vec![
            candidate(observations[0], 0, 0),
            candidate(observations[1], 0, 1),
            candidate(observations[2], 1, 2),
        ]
    }

    fn columns(count: usize) -> Vec<Column> {
        (0..count)
            .map(|step| Column {
                step,
                candidates: step..step + 1,
            })
            .collect()
    }

    fn build(wall: f64) -> Lattice {
        let observations = observations();
        let candidates = candidates(&observations);
        let columns = columns(3);

        let mut buffer = vec![];
        leg_distances(observations.iter().copied(), &mut buffer);

        let oracle = StraightOracle { wall };
        let costing = CostingStrategies::default();
        let builder = LatticeBuilder::new(&oracle, &TransportMode::Car, &costing);

        let mut lattice = Lattice::default();
        builder.build(
            Trellis {
                observations: &observations,
                candidates: &candidates,
                columns: &columns,
                legs: &buffer,
                segments: 2,
            },
            &mut lattice,
        );

        lattice
    }

    #[test]
    fn legs_repeat_final_distance() {
        let mut buffer = vec![1.0; 8];
        leg_distances(observations().into_iter(), &mut buffer);

        assert_eq!(buffer.len(), 3);
        assert_relative_eq!(buffer[0], buffer[1], epsilon = 1e-6);
        assert_eq!(buffer[1], buffer[2]);

        leg_distances(observations().into_iter().take(1), &mut buffer);
        assert_eq!(buffer, vec![0.0]);
    }

    #[test]
    fn emission_only_where_candidates_exist() {
        let lattice = build(180.0);

        assert_eq!(lattice.segments(), 2);
        assert_eq!(lattice.columns(), 3);

        assert!(lattice.emission(0, 0) > 0.0);
        assert!(lattice.emission(0, 1) > 0.0);
        assert_eq!(lattice.emission(0, 2), 0.0);

        assert_eq!(lattice.emission(1, 0), 0.0);
        assert!(lattice.emission(1, 2) > 0.0);
    }

    #[test]
    fn start_only_for_first_column() {
        let lattice = build(180.0);

        assert_relative_eq!(lattice.start(0), lattice.emission(0, 0));
        assert_eq!(lattice.start(1), 0.0);
    }

    #[test]
    fn transitions_follow_observation_order() {
        let lattice = build(180.0);

        // Segment 0 first appears before segment 1, so only 0 -> 1 is modelled.
        assert!(lattice.transition(0, 1) > 0.0);
        assert_eq!(lattice.transition(1, 0), 0.0);

        // No self-transitions are modelled
        assert_eq!(lattice.transition(0, 0), 0.0);
        assert_eq!(lattice.transition(1, 1), 0.0);
    }

    #[test]
    fn unroutable_transitions_are_impossible() {
        let lattice = build(151.1815);

        assert_eq!(lattice.ln_transition(0, 1), f64::NEG_INFINITY);
        assert!(lattice.emission(1, 2) > 0.0);
    }

    #[test]
    fn probabilities_are_bounded() {
        let lattice = build(180.0);

        for r in 0..lattice.segments() {
            assert!((0.0..=1.0).contains(&lattice.start(r)));

            for c in 0..lattice.columns() {
                assert!((0.0..=1.0).contains(&lattice.emission(r, c)));
            }

            for s in 0..lattice.segments() {
                assert!((0.0..=1.0).contains(&lattice.transition(r, s)));
            }
        }
    }

    #[test]
    fn out_of_range_is_impossible() {
        let lattice = Lattice::new(2, 2);

        assert_eq!(lattice.ln_emission(0, 5), f64::NEG_INFINITY);
        assert_eq!(lattice.ln_transition(0, 2), f64::NEG_INFINITY);
        assert_eq!(lattice.ln_start(9), f64::NEG_INFINITY);
    }

    #[test]
    fn reset_reshapes_tables() {
        let mut lattice = build(180.0);
        lattice.reset(1, 4);

        assert_eq!((lattice.segments(), lattice.columns()), (1, 4));
        assert_eq!(lattice.start(0), 0.0);
        assert_eq!(lattice.emission(0, 3), 0.0);
    }
}
