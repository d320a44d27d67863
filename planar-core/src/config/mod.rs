//! Configuration types
//!
//! Panel parameters are fixed at build time; there is no runtime
//! reconfiguration path.

pub mod geometry;

pub use geometry::*;
