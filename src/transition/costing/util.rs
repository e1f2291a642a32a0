use crate::transition::{EmissionContext, EmissionStrategy, TransitionContext, TransitionStrategy};

pub trait Strategy<Ctx> {
    /// A calculable cost which can be any required
    /// type, so long as it is castable into a 64-bit float.
    type Cost: Into<f64>;

    /// The zeta (ζ) value in the decay function.
    const ZETA: f64;

    /// The beta (β) value in the decay function.
    const BETA: f64;

    /// The calculation cost you must implement.
    ///
    /// Returning `None` marks the context as impossible,
    /// giving a probability of zero.
    fn calculate(&self, context: Ctx) -> Option<Self::Cost>;

    /// A decay-based probability which accepts the input value and transforms
    /// it using the associated constants `ZETA` and `BETA`.
    ///
    /// ### Formula
    /// The scalar is given by `1 / ζ`. Therefore, if `ζ` is `1`, no
    /// scaling is applied. The exponential component is the negative
    /// value divided by `β`.
    ///
    /// ```math
    /// decay(value) = (1 / ζ) * e^(-1 * value / β)
    /// ```
    #[inline(always)]
    fn probability(&self, ctx: Ctx) -> f64 {
        self.ln_probability(ctx).exp()
    }

    /// The natural logarithm of [`Strategy::probability`].
    ///
    /// Computed directly, so that very small probabilities
    /// remain distinguishable rather than underflowing to zero.
    /// An impossible context yields negative infinity.
    #[inline(always)]
    fn ln_probability(&self, ctx: Ctx) -> f64 {
        match self.calculate(ctx) {
            Some(value) => -Self::ZETA.ln() - value.into() / Self::BETA,
            None => f64::NEG_INFINITY,
        }
    }
}

pub trait Costing<Emission, Transition>
where
    Transition: TransitionStrategy,
    Emission: EmissionStrategy,
{
    /// The log-probability of the observation having been recorded from the candidate.
    fn ln_emission(&self, context: EmissionContext) -> f64;

    /// The log-probability of travel between the two candidates.
    fn ln_transition(&self, context: TransitionContext) -> f64;
}
