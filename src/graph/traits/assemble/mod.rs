pub mod definition;
pub mod implementation;


pub use definition::*;
