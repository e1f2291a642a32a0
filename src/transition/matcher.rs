use crate::config::MatchOptions;
use crate::graph::{EdgeFilter, RoutingOracle, SegmentAssembler, SpatialIndex, TransportMode};
use crate::transition::*;

use geo::Point;
use log::{debug, info, warn};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Buffers reused across calls to [`HiddenMarkovMatcher::r#match`].
///
/// Every buffer grows to the largest trace matched so far,
/// and is emptied by [`Scratch::clear`] at the start of each call.
#[derive(Debug, Default)]
pub struct Scratch {
    legs: Vec<f64>,
    candidates: Vec<Candidate>,

    /// Columns in the original order of the trace.
    columns: Vec<Column>,

    /// Columns in the order of the current pass.
    oriented: Vec<Column>,
    skipped: Vec<usize>,

    registry: SegmentRegistry,
    lattice: Lattice,
}

impl Scratch {
    pub fn clear(&mut self) {
        self.legs.clear();
        self.candidates.clear();
        self.columns.clear();
        self.oriented.clear();
        self.skipped.clear();
        self.registry.clear();
        self.lattice.clear();
    }

    /// Every candidate of the last trace, in order of observation.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    /// The lattice of the last pass decoded.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Indices of the observations of the last trace without any candidate.
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }
}

/// Matches traces onto a network using a hidden markov model.
///
/// The network is reached only through its collaborators, a [`SpatialIndex`]
/// for candidates, a [`RoutingOracle`] for transitions, and a [`SegmentAssembler`]
/// for the result. The [`Graph`](crate::Graph) implements all three.
///
/// ### Concurrency
/// A matcher owns the [`Scratch`] buffers of the trace it is matching, so
/// matching requires `&mut self`. Concurrent traces each require their own
/// matcher, whereas the collaborators are only ever read, so may be shared.
///
/// ```rust
/// use geo::wkt;
/// use snapline::{GraphBuilder, HiddenMarkovMatcher, MatchOptions, RoadClass};
///
/// let mut builder = GraphBuilder::default();
/// builder.add_way(wkt! { LINESTRING (151.18 -33.88, 151.19 -33.88) }, RoadClass::Primary, false);
/// let graph = builder.build();
///
/// let mut matcher = HiddenMarkovMatcher::with_network(&graph, MatchOptions::default());
/// matcher.set_edge_filter(|edge: &snapline::EdgeInfo| edge.class == RoadClass::Primary);
///
/// let trace = wkt! { LINESTRING (151.182 -33.87991, 151.187409 -33.87991) };
/// let result = matcher.r#match(&trace.into_points());
/// assert!(result.forward.is_some());
/// ```
pub struct HiddenMarkovMatcher<
    'a,
    I,
    O,
    A,
    E = GaussianEmission,
    T = ExponentialTransition,
    S = ViterbiSolver,
> where
    I: SpatialIndex + ?Sized,
    O: RoutingOracle + ?Sized,
    A: SegmentAssembler + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
    S: Solver,
{
    index: &'a I,
    oracle: &'a O,
    assembler: &'a A,

    options: MatchOptions,
    costing: CostingStrategies<E, T>,
    solver: S,

    filter: Option<Box<dyn EdgeFilter + 'a>>,

    /// The fastest speed the edge filter permits, once queried.
    max_speed: Option<f64>,
    scratch: Scratch,
}

impl<'a, N> HiddenMarkovMatcher<'a, N, N, N>
where
    N: SpatialIndex + RoutingOracle + SegmentAssembler + ?Sized,
{
    /// Creates a matcher whose collaborators are all the same `network`.
    pub fn with_network(network: &'a N, options: MatchOptions) -> Self {
        HiddenMarkovMatcher::new(network, network, network, options)
    }
}

impl<'a, I, O, A> HiddenMarkovMatcher<'a, I, O, A>
where
    I: SpatialIndex + ?Sized,
    O: RoutingOracle + ?Sized,
    A: SegmentAssembler + ?Sized,
{
    /// Creates a matcher using the default costing strategies and solver.
    pub fn new(index: &'a I, oracle: &'a O, assembler: &'a A, options: MatchOptions) -> Self {
        Self {
            index,
            oracle,
            assembler,
            options,
            costing: CostingStrategies::default(),
            solver: ViterbiSolver,
            filter: None,
            max_speed: None,
            scratch: Scratch::default(),
        }
    }
}

/// Selects the edge filter in use, defaulting to access of the transport mode.
fn edge_filter<'f, 'a: 'f>(
    filter: &'f Option<Box<dyn EdgeFilter + 'a>>,
    mode: &'f TransportMode,
) -> &'f dyn EdgeFilter {
    match filter {
        Some(filter) => filter.as_ref(),
        None => mode,
    }
}

impl<'a, I, O, A, E, T, S> HiddenMarkovMatcher<'a, I, O, A, E, T, S>
where
    I: SpatialIndex + ?Sized,
    O: RoutingOracle + ?Sized,
    A: SegmentAssembler + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
    S: Solver,
{
    /// Replaces the costing strategies.
    pub fn with_costing<E2, T2>(
        self,
        costing: CostingStrategies<E2, T2>,
    ) -> HiddenMarkovMatcher<'a, I, O, A, E2, T2, S>
    where
        E2: EmissionStrategy,
        T2: TransitionStrategy,
    {
        HiddenMarkovMatcher {
            index: self.index,
            oracle: self.oracle,
            assembler: self.assembler,
            options: self.options,
            costing,
            solver: self.solver,
            filter: self.filter,
            max_speed: self.max_speed,
            scratch: self.scratch,
        }
    }

    /// Replaces the solver.
    pub fn with_solver<S2: Solver>(self, solver: S2) -> HiddenMarkovMatcher<'a, I, O, A, E, T, S2> {
        HiddenMarkovMatcher {
            index: self.index,
            oracle: self.oracle,
            assembler: self.assembler,
            options: self.options,
            costing: self.costing,
            solver,
            filter: self.filter,
            max_speed: self.max_speed,
            scratch: self.scratch,
        }
    }

    /// Restricts the edges used for candidates and transitions.
    ///
    /// By default, the access of the [`TransportMode`] of the options is used.
    /// Assembly always uses the transport mode.
    pub fn set_edge_filter(&mut self, filter: impl EdgeFilter + 'a) {
        self.filter = Some(Box::new(filter));
        self.max_speed = None;
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: MatchOptions) {
        if options.mode != self.options.mode {
            self.max_speed = None;
        }

        self.options = options;
    }

    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Empties the scratch buffers, retaining their allocations.
    pub fn clear(&mut self) {
        self.scratch.clear();
    }

    /// Matches the `observations` onto the network.
    ///
    /// Runs the forward pass, and the reverse pass if the options ask for both
    /// directions. When both succeed they are [reconciled](reconcile), possibly
    /// discarding one. A failure of either pass is recorded in the result,
    /// never returned, so the other pass may still succeed.
    ///
    /// An empty trace gives an empty result without error.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn r#match(&mut self, observations: &[Point]) -> MatchResult {
        let start_time = Instant::now();
        self.clear();

        let mut result = MatchResult::default();
        if observations.is_empty() {
            debug!("No observations to match");
            return result;
        }

        let passes: &[Pass] = if self.options.both_directions {
            &[Pass::Forward, Pass::Reverse]
        } else {
            &[Pass::Forward]
        };

        self.discover(observations);
        if self.scratch.columns.is_empty() {
            warn!(
                "None of {} observations lie within {}m of the network",
                observations.len(),
                self.options.search_radius
            );

            result.errors = passes
                .iter()
                .map(|pass| (*pass, MatchError::NoCandidates))
                .collect();
            return result;
        }

        for pass in passes {
            match self.decode(observations, *pass) {
                Ok(segment) => *result.slot_mut(*pass) = Some(segment),
                Err(error) => {
                    warn!("The {pass} pass failed: {error}");
                    result.errors.push((*pass, error));
                }
            }
        }

        let discarded = match (&result.forward, &result.reverse) {
            (Some(forward), Some(reverse)) => reconcile(forward.distance, reverse.distance),
            _ => None,
        };

        if let Some(pass) = discarded {
            debug!("Discarding the {pass} pass as a likely loop");
            *result.slot_mut(pass) = None;
            result.discarded = Some(pass);
        }

        info!(
            "Matched {} observations ({} skipped) over {} segments in {}us",
            observations.len(),
            self.scratch.skipped.len(),
            self.scratch.registry.len(),
            start_time.elapsed().as_micros()
        );

        result
    }

    /// The fastest speed permitted by the edge filter, queried from the oracle
    /// once per filter rather than once per pass.
    fn max_speed(&mut self) -> f64 {
        if let Some(speed) = self.max_speed {
            return speed;
        }

        let speed = self
            .oracle
            .max_speed(edge_filter(&self.filter, &self.options.mode));
        self.max_speed = Some(speed);
        speed
    }

    /// Finds the candidates of every observation, forming the forward columns.
    fn discover(&mut self, observations: &[Point]) {
        let filter = edge_filter(&self.filter, &self.options.mode);
        let finder = CandidateFinder::new(self.index, filter, self.options.candidates);
        let scratch = &mut self.scratch;

        for (index, position) in observations.iter().enumerate() {
            let observation = Observation::new(index, *position);
            let found = finder.find(
                &observation,
                self.options.search_radius,
                &mut scratch.registry,
            );

            if found.is_empty() {
                scratch.skipped.push(index);
                continue;
            }

            let first = scratch.candidates.len();
            scratch.candidates.extend(found);
            scratch.columns.push(Column {
                step: index,
                candidates: first..scratch.candidates.len(),
            });
        }

        debug!(
            "Found {} candidates upon {} segments",
            scratch.candidates.len(),
            scratch.registry.len()
        );
    }

    /// Decodes and assembles a single pass over the discovered candidates.
    fn decode(&mut self, observations: &[Point], pass: Pass) -> Result<RouteSegmentInfo, MatchError> {
        let max_speed = self.max_speed();
        let filter = edge_filter(&self.filter, &self.options.mode);
        let Scratch {
            legs,
            candidates,
            columns,
            oriented,
            skipped,
            registry,
            lattice,
        } = &mut self.scratch;

        let last = observations.len().saturating_sub(1);
        oriented.clear();

        match pass {
            Pass::Forward => {
                oriented.extend(columns.iter().cloned());
                leg_distances(observations.iter().copied(), legs);
            }
            Pass::Reverse => {
                oriented.extend(columns.iter().rev().map(|column| Column {
                    step: last - column.step,
                    candidates: column.candidates.clone(),
                }));
                leg_distances(observations.iter().rev().copied(), legs);
            }
        }

        let trellis = Trellis {
            observations,
            candidates,
            columns: oriented,
            legs,
            segments: registry.len(),
        };

        LatticeBuilder::new(self.oracle, filter, &self.costing)
            .with_max_speed(max_speed)
            .build(trellis, lattice);

        let (path, status) = match self.solver.solve(lattice) {
            Ok(path) => (path, MatchStatus::Decoded),
            Err(DecodeError::Stationary { segment }) => {
                debug!("The {pass} pass remains upon segment {segment}, using nearest candidates");

                let nearest = oriented
                    .iter()
                    .filter_map(|column| trellis.column(column).first())
                    .map(|candidate| candidate.segment)
                    .collect();

                (nearest, MatchStatus::Fallback)
            }
            Err(error) => return Err(error.into()),
        };

        let coordinates = oriented
            .iter()
            .zip(&path)
            .filter_map(|(column, segment)| {
                trellis
                    .column(column)
                    .iter()
                    .find(|candidate| candidate.segment == *segment)
            })
            .map(|candidate| candidate.position)
            .collect::<Vec<_>>();

        let segment = self.assembler.assemble(&coordinates, self.options.mode)?;

        Ok(segment
            .with_status(status)
            .with_skipped(skipped.clone()))
    }
}
