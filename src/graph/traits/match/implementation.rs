use crate::config::MatchOptions;
use crate::graph::Graph;
use crate::graph::r#match::definition::Match;
use crate::transition::{HiddenMarkovMatcher, MatchResult};

use geo::LineString;
use log::info;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Match for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    fn r#match(&self, linestring: LineString, options: MatchOptions) -> MatchResult {
        info!("Finding matched route for {} positions", linestring.0.len());

        let observations = linestring.into_points();
        HiddenMarkovMatcher::with_network(self, options).r#match(&observations)
    }
}
