//! Drawing traits
//!
//! These traits define the interface between the drawing algorithms and
//! whatever stores the pixels (the controller, or a recorder in tests).

pub mod pixel;

pub use pixel::{PixelTarget, Primitives};
