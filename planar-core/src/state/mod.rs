//! Touch sampling state
//!
//! Sampling is triggered from outside (interrupt or level wait); this
//! module only tracks whether a sample is in flight and what it decoded to.

pub mod touch;

pub use touch::{TouchMachine, TouchState};
