use crate::config::ConfigError;
use crate::graph::{AssemblyError, RoutingError};
use crate::transition::MatchError;

use thiserror::Error;

/// The crate-level error, unifying the errors of each submodule.
///
/// Note that [`HiddenMarkovMatcher::r#match`](crate::HiddenMarkovMatcher::r#match)
/// never returns this type. Failures during matching are recorded inside the
/// [`MatchResult`](crate::MatchResult) instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("matching failed: {0}")]
    Match(#[from] MatchError),

    #[error("routing failed: {0}")]
    Routing(#[from] RoutingError),

    #[error("assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("could not parse network geometry: {0}")]
    Geometry(String),
}
