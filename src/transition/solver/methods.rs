use crate::transition::{DecodeError, Lattice, SegmentId};

/// Decodes a [`Lattice`] into the most probable sequence of segments.
pub trait Solver {
    /// Returns the chosen segment of each column of the lattice, in column order.
    ///
    /// Fails if some column is unreachable, or if the most probable
    /// path starts and finishes upon the same segment.
    fn solve(&self, lattice: &Lattice) -> Result<Vec<SegmentId>, DecodeError>;
}
