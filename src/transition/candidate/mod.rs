//! Candidates are the positions upon the network which an observation
//! may have been recorded from. Each lies upon a segment, identified
//! by its index within the trace's [`SegmentRegistry`].

#[doc(hidden)]
pub mod entry;
#[doc(hidden)]
pub mod finder;
#[doc(hidden)]
pub mod registry;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use entry::*;
#[doc(inline)]
pub use finder::*;
#[doc(inline)]
pub use registry::*;
