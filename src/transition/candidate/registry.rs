use crate::graph::EdgeId;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// The index of a distinct segment within a [`SegmentRegistry`].
pub type SegmentId = usize;

/// The distinct edges discovered while searching for candidates, in discovery order.
///
/// Candidates of different observations which lie on the same underlying edge
/// share one [`SegmentId`], which is the row/column index of that edge in the lattice.
/// Identifiers are never reused until the registry is cleared.
#[derive(Debug, Default, Clone)]
pub struct SegmentRegistry {
    edges: IndexSet<EdgeId, FxBuildHasher>,
}

impl SegmentRegistry {
    /// Returns the [`SegmentId`] of the edge, assigning the next one if unseen.
    #[inline]
    pub fn register(&mut self, edge: EdgeId) -> SegmentId {
        self.edges.insert_full(edge).0
    }

    #[inline]
    pub fn edge(&self, segment: SegmentId) -> Option<EdgeId> {
        self.edges.get_index(segment).copied()
    }

    #[inline]
    pub fn segment(&self, edge: EdgeId) -> Option<SegmentId> {
        self.edges.get_index_of(&edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, EdgeId)> + '_ {
        self.edges.iter().copied().enumerate()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }
}
