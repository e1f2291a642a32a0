use crate::transition::{DecodeError, Lattice, SegmentId, Solver};

use log::debug;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Exact decoding of the lattice through the [Viterbi] algorithm.
///
/// Scores are accumulated as log-probabilities, so long traces
/// do not underflow. Remaining upon a segment between columns is
/// not a modelled transition, and is scored as certain, leaving
/// the emission to decide it.
///
/// Where paths score equally, the lowest [`SegmentId`] is preferred.
///
/// [Viterbi]: https://en.wikipedia.org/wiki/Viterbi_algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct ViterbiSolver;

impl ViterbiSolver {
    fn argmax(scores: &[f64]) -> Option<SegmentId> {
        scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score > f64::NEG_INFINITY)
            .fold(None, |best: Option<(SegmentId, f64)>, (segment, score)| match best {
                Some((_, top)) if top >= *score => best,
                _ => Some((segment, *score)),
            })
            .map(|(segment, _)| segment)
    }
}

impl Solver for ViterbiSolver {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip_all))]
    fn solve(&self, lattice: &Lattice) -> Result<Vec<SegmentId>, DecodeError> {
        let (segments, columns) = (lattice.segments(), lattice.columns());
        if segments == 0 || columns == 0 {
            return Err(DecodeError::Empty);
        }

        let mut delta = (0..segments)
            .map(|r| lattice.ln_start(r) + lattice.ln_emission(r, 0))
            .collect::<Vec<_>>();

        if Self::argmax(&delta).is_none() {
            return Err(DecodeError::Unreachable { column: 0 });
        }

        // Back-pointers of column `c` are at `(c - 1) * segments`.
        let mut back = Vec::with_capacity(segments * (columns - 1));
        let mut next = vec![f64::NEG_INFINITY; segments];

        for column in 1..columns {
            for (target, score) in next.iter_mut().enumerate() {
                let emission = lattice.ln_emission(target, column);

                let (mut best, mut from) = (f64::NEG_INFINITY, target);
                if emission > f64::NEG_INFINITY {
                    for (source, previous) in delta.iter().enumerate() {
                        let transition = if source == target {
                            0.0
                        } else {
                            lattice.ln_transition(source, target)
                        };

                        if previous + transition > best {
                            best = previous + transition;
                            from = source;
                        }
                    }
                }

                *score = best + emission;
                back.push(from);
            }

            if Self::argmax(&next).is_none() {
                debug!("Lattice is unreachable at column {column}");
                return Err(DecodeError::Unreachable { column });
            }

            std::mem::swap(&mut delta, &mut next);
        }

        let last = Self::argmax(&delta).ok_or(DecodeError::Unreachable {
            column: columns - 1,
        })?;

        let mut path = vec![last; columns];
        for column in (1..columns).rev() {
            path[column - 1] = back[(column - 1) * segments + path[column]];
        }

        match (path.first(), path.last()) {
            (Some(first), Some(last)) if first == last => {
                Err(DecodeError::Stationary { segment: *first })
            }
            _ => Ok(path),
        }
    }
}
