//! Options of a matching call, see [`MatchOptions`].

use crate::graph::TransportMode;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

const SEARCH_RADIUS: &str = "SNAPLINE_SEARCH_RADIUS";
const MODE: &str = "SNAPLINE_MODE";
const BOTH_DIRECTIONS: &str = "SNAPLINE_BOTH_DIRECTIONS";
const CANDIDATES: &str = "SNAPLINE_CANDIDATES";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{variable} is not valid unicode")]
    NotUnicode { variable: &'static str },

    #[error("{variable}={value:?} is invalid: {reason}")]
    Invalid {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

/// How many candidates are searched for per observation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    /// Only the single nearest edge.
    #[default]
    Nearest,

    /// Up to `n` distinct edges, nearest first.
    NearestN(usize),
}

impl CandidatePolicy {
    #[inline]
    pub fn limit(&self) -> usize {
        match self {
            CandidatePolicy::Nearest => 1,
            CandidatePolicy::NearestN(n) => *n,
        }
    }
}

impl FromStr for CandidatePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().parse::<usize>() {
            Ok(0) => Err("at least one candidate is required".to_string()),
            Ok(1) => Ok(CandidatePolicy::Nearest),
            Ok(n) => Ok(CandidatePolicy::NearestN(n)),
            Err(err) => Err(err.to_string()),
        }
    }
}

/// Options of a single matching call.
///
/// ```rust
/// use snapline::{CandidatePolicy, MatchOptions, TransportMode};
///
/// let options = MatchOptions::default()
///     .with_search_radius(35.0)
///     .with_mode(TransportMode::Bicycle)
///     .with_candidates(CandidatePolicy::NearestN(3));
///
/// assert!(!options.both_directions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// The furthest an observation may lie from its candidates, in meters.
    pub search_radius: f64,

    /// Selects the edges which may be matched onto and routed across.
    pub mode: TransportMode,

    /// Also decode the trace in reverse, keeping both results
    /// unless one appears to contain a spurious loop.
    pub both_directions: bool,

    pub candidates: CandidatePolicy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            search_radius: 50.0,
            mode: TransportMode::default(),
            both_directions: false,
            candidates: CandidatePolicy::default(),
        }
    }
}

impl MatchOptions {
    pub fn with_search_radius(mut self, search_radius: f64) -> Self {
        self.search_radius = search_radius;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_both_directions(mut self, both_directions: bool) -> Self {
        self.both_directions = both_directions;
        self
    }

    pub fn with_candidates(mut self, candidates: CandidatePolicy) -> Self {
        self.candidates = candidates;
        self
    }

    /// Reads options from the environment, using the default of any variable which is unset.
    ///
    /// Callers wishing to load a `.env` file should call `dotenv()` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env::var)
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, ConfigError> {
        let defaults = MatchOptions::default();

        Ok(Self {
            search_radius: parse(&lookup, SEARCH_RADIUS)?
                .map(|radius: f64| {
                    (radius.is_finite() && radius >= 0.0)
                        .then_some(radius)
                        .ok_or_else(|| ConfigError::Invalid {
                            variable: SEARCH_RADIUS,
                            value: radius.to_string(),
                            reason: "must be a non-negative distance".to_string(),
                        })
                })
                .transpose()?
                .unwrap_or(defaults.search_radius),
            mode: parse(&lookup, MODE)?.unwrap_or(defaults.mode),
            both_directions: parse(&lookup, BOTH_DIRECTIONS)?.unwrap_or(defaults.both_directions),
            candidates: parse(&lookup, CANDIDATES)?.unwrap_or(defaults.candidates),
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&'static str) -> Result<String, env::VarError>,
    variable: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    let value = match lookup(variable) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode { variable }),
    };

    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|err| ConfigError::Invalid {
            variable,
            reason: err.to_string(),
            value,
        })
}
