use crate::graph::AssemblyError;
use crate::transition::SegmentId;

use thiserror::Error;

/// Failure to decode a lattice into a path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("the lattice has no columns or no segments")]
    Empty,

    /// Every segment had zero probability at the column.
    #[error("no segment is reachable at column {column}")]
    Unreachable { column: usize },

    /// The most probable path starts and finishes upon the same segment.
    #[error("the path starts and finishes on segment {segment}")]
    Stationary { segment: SegmentId },
}

/// Failure of a single matching pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("no observation has a candidate within the search radius")]
    NoCandidates,

    #[error("no plausible path: {0}")]
    Degenerate(#[from] DecodeError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
