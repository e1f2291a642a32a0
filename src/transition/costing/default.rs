pub mod emission {
    use crate::transition::*;

    /// Standard deviation of GPS measurement noise, in meters.
    pub const SIGMA_Z: f64 = 4.07;

    /// Observations further than this from a candidate, in meters, cannot have been recorded there.
    pub const MAX_EMISSION_DISTANCE: f64 = 250.0;

    /// Calculates the emission probability of a candidate as a
    /// zero-mean Gaussian over its distance to the observation.
    ///
    /// ## Calculation
    ///
    /// ```math
    /// emission(d) = 1 / (√(2π)·σ) · e^(-0.5 · (d/σ)²)
    /// ```
    ///
    /// The density is not normalised across candidates, only its
    /// relative magnitude matters. Beyond [`MAX_EMISSION_DISTANCE`] it is zero.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GaussianEmission;

    impl<'a> Strategy<EmissionContext<'a>> for GaussianEmission {
        type Cost = f64;

        /// √(2π)·σ
        const ZETA: f64 = 2.506_628_274_631_000_2 * SIGMA_Z;
        const BETA: f64 = 2.0;

        fn calculate(&self, context: EmissionContext<'a>) -> Option<Self::Cost> {
            if context.distance > MAX_EMISSION_DISTANCE {
                return None;
            }

            Some((context.distance / SIGMA_Z).powi(2))
        }
    }
}

pub mod transition {
    use crate::transition::*;

    /// Calculates the transition probability between two candidates.
    ///
    /// Compares the fastest route between the candidates against the
    /// straight-line movement of the observations they stand for.
    ///
    /// # Calculation
    ///
    /// ## Distance Deviance
    /// The difference between the straight-line distance `dz` and the
    /// routed distance `dx`, relative to the first leg of the trace `dz₀`.
    ///
    /// ## Duration Deviance
    /// The difference between the routed duration and the time taken to
    /// travel the first leg at the fastest permitted speed.
    ///
    /// ```math
    /// dt  = |dz - dx| / dz₀
    /// dt2 = |time - perf_time| / perf_time
    /// x   = 0.2·dt + 0.8·dt2
    ///
    /// transition(x) = e^(-x / β)
    /// ```
    ///
    /// The usual `1/β` scale of the exponential distribution is omitted,
    /// keeping probabilities within `[0, 1]`. It is constant across
    /// every transition so does not alter the decoded path.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ExponentialTransition;

    /// Weighting of the distance deviance, the duration deviance takes the remainder.
    const DISTANCE_WEIGHT: f64 = 0.2;

    impl<'a> Strategy<TransitionContext<'a>> for ExponentialTransition {
        type Cost = f64;

        const ZETA: f64 = 1.0;
        const BETA: f64 = 0.009_594_42;

        fn calculate(&self, context: TransitionContext<'a>) -> Option<Self::Cost> {
            let dt = context.distance_deviance();
            let dt2 = context.duration_deviance();

            Some(DISTANCE_WEIGHT * dt + (1.0 - DISTANCE_WEIGHT) * dt2)
        }
    }
}

pub mod costing {
    use super::{ExponentialTransition, GaussianEmission};
    use crate::transition::*;

    #[derive(Debug, Clone, Copy)]
    pub struct CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        emission: E,
        transition: T,
    }

    impl<E, T> CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        pub fn new(emission: E, transition: T) -> Self {
            Self {
                emission,
                transition,
            }
        }
    }

    impl Default for CostingStrategies<GaussianEmission, ExponentialTransition> {
        fn default() -> Self {
            CostingStrategies::new(GaussianEmission, ExponentialTransition)
        }
    }

    impl<E, T> Costing<E, T> for CostingStrategies<E, T>
    where
        T: TransitionStrategy,
        E: EmissionStrategy,
    {
        #[inline]
        fn ln_emission(&self, context: EmissionContext) -> f64 {
            self.emission.ln_probability(context)
        }

        #[inline]
        fn ln_transition(&self, context: TransitionContext) -> f64 {
            self.transition.ln_probability(context)
        }
    }
}

#[doc(hidden)]
pub use costing::*;
#[doc(hidden)]
pub use emission::*;
#[doc(hidden)]
pub use transition::*;
