//! A Hidden-Markov-Model (HMM) matching
//! transition module that allows for
//! matching raw data to an underlying
//! network.
//!
//! Observations are snapped onto nearby segments by the [`CandidateFinder`],
//! costed into a [`Lattice`] by the [`LatticeBuilder`], decoded by a [`Solver`],
//! and assembled into a [`RouteSegmentInfo`]. The [`HiddenMarkovMatcher`]
//! orchestrates each pass, and [reconciles](reconcile) them.

pub mod candidate;
pub mod costing;
pub mod error;
pub mod lattice;
pub mod matcher;
pub mod reconcile;
pub mod segment;
pub mod solver;

#[cfg(test)]
mod test;

// Re-Exports
#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use lattice::*;
#[doc(inline)]
pub use matcher::*;
#[doc(inline)]
pub use reconcile::*;
#[doc(inline)]
pub use segment::*;
#[doc(inline)]
pub use solver::*;
