//! Board-agnostic core logic for the Planar panel driver
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Build-time panel geometry and its validation
//! - Pixel addressing into the controller's graphics region
//! - Draw modes and the drawing primitives (line, circle, rectangle, radial line)
//! - The `PixelTarget` seam the primitives draw through
//! - Touch sampling state machine

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod draw;
pub mod state;
pub mod traits;
