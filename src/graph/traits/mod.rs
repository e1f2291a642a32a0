pub mod assemble;
pub mod r#match;
pub mod proximity;
pub mod route;

pub use assemble::SegmentAssembler;
pub use r#match::Match;
pub use proximity::{Scan, Snap, SpatialIndex};
pub use route::{Leg, PathCost, Route, RoutingOracle};
