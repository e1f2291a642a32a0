#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod error;
pub mod graph;
pub mod transition;

#[doc(inline)]
pub use config::{CandidatePolicy, MatchOptions};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use graph::*;
#[doc(inline)]
pub use transition::*;
