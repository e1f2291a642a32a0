use thiserror::Error;

/// Failure of a single point-to-point query against a [`RoutingOracle`](crate::RoutingOracle).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("no permitted edge within {radius}m of the {end} position")]
    Unsnappable { end: &'static str, radius: f64 },

    #[error("no path exists between the positions")]
    NoPath,
}

/// Failure to assemble matched coordinates into a [`RouteSegmentInfo`](crate::RouteSegmentInfo).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("no coordinates were given")]
    NoCoordinates,

    #[error("leg {leg} could not be connected: {source}")]
    Disconnected { leg: usize, source: RoutingError },
}
