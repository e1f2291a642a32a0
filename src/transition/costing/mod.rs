//! You may override individual costing strategies
//! in order to apply custom functionality to the
//! matcher. See the [`Strategy`] trait.
//!
//! ## Structure
//! Strategies are joined onto the aggregate [`CostingStrategies`]
//! structure, which is then supplied to the matcher.
//!
//! ```rust
//! use snapline::{CostingStrategies, Graph, HiddenMarkovMatcher, MatchOptions};
//!
//! fn matcher(graph: &Graph) {
//!     // Create default strategies
//!     let costing = CostingStrategies::default();
//!
//!     // Supply them to the matcher
//!     let matcher = HiddenMarkovMatcher::with_network(graph, MatchOptions::default())
//!         .with_costing(costing);
//! }
//!```
//!
//! To override the default strategies, simply apply your own
//! using [`CostingStrategies::new`]. You must create an [`EmissionStrategy`]
//! and  [`TransitionStrategy`].
//!
//! ### Creating your own strategy
//!
//! In order to make your own transition and emission strategies, you must
//! implement [`Strategy`] for your structure, with the context of the heuristic
//! you need to override.
//!
//! The higher-order traits, like [`TransitionStrategy`] are auto-derived for all
//! which implement [`Strategy<TransitionContext>`].
//!
//!```rust
//! use snapline::{Strategy, TransitionContext};
//!
//! struct DistanceOnly;
//!
//! // Implement the strategy with the correct context.
//! impl<'a> Strategy<TransitionContext<'a>> for DistanceOnly {
//!    type Cost = f64;
//!
//!    const ZETA: f64 = 1.0;
//!    const BETA: f64 = 0.05;
//!
//!    fn calculate(&self, context: TransitionContext<'a>) -> Option<Self::Cost> {
//!        Some(context.distance_deviance())
//!    }
//! }
//! ```
//!
//! ### Using Context
//! Each strategy accepts a context, defined in the
//! generic `Ctx` parameter of the [`Strategy`] trait.
//!
//! - [`TransitionContext`]
//!     Supplies the candidates being travelled between,
//!     the fastest path between them, and the straight-line
//!     movement of the trace at that point.
//!
//! - [`EmissionContext`]
//!     Supplies the candidate and the observation it was found for.
//!
//! ### Default Strategies:
//! - [`ExponentialTransition`]: Transition Cost
//! - [`GaussianEmission`]: Emission Cost
//!
#[doc(hidden)]
pub mod default;
#[doc(hidden)]
pub mod emission;
#[doc(hidden)]
pub mod transition;
#[doc(hidden)]
pub mod util;


#[doc(inline)]
pub use default::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
#[doc(inline)]
pub use util::*;
