//! Suppression of spurious loops, by comparing the distances
//! of the forward and reverse matches of a trace.

use crate::transition::Pass;

/// The ratio by which one pass may exceed the other before it is assumed
/// to contain a loop, given the forward `distance` in meters.
///
/// Short traces are dominated by positional noise, so are given more slack.
pub fn koef(distance: f64) -> f64 {
    if distance < 100.0 {
        1.2
    } else if distance > 1000.0 {
        1.25
    } else {
        1.1
    }
}

/// Decides which pass, if any, to discard given the routed
/// distance of the `forward` and `reverse` matches.
///
/// The longer is discarded only if it exceeds the shorter by more than the
/// [`koef`] of the forward distance, otherwise both are kept.
///
/// ```rust
/// use snapline::{reconcile, Pass};
///
/// assert_eq!(reconcile(500.0, 505.0), None);
/// assert_eq!(reconcile(500.0, 900.0), Some(Pass::Reverse));
/// ```
pub fn reconcile(forward: f64, reverse: f64) -> Option<Pass> {
    let ratio = koef(forward);

    if reverse > ratio * forward {
        Some(Pass::Reverse)
    } else if forward > ratio * reverse {
        Some(Pass::Forward)
    } else {
        None
    }
}
