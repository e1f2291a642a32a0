use crate::config::MatchOptions;
use crate::transition::MatchResult;

use geo::LineString;

pub trait Match {
    /// Matches a given [linestring](LineString) against the map.
    ///
    /// Matching involves the use of a hidden markov model using the
    /// [`HiddenMarkovMatcher`](crate::HiddenMarkovMatcher) to collapse
    /// the given input onto the map, finding appropriate matching for each input value.
    ///
    /// A fresh matcher is created for every call. To reuse scratch space
    /// across many traces, hold a [`HiddenMarkovMatcher`](crate::HiddenMarkovMatcher) instead.
    fn r#match(&self, linestring: LineString, options: MatchOptions) -> MatchResult;
}
