//! Pixel addressing and draw modes

pub mod address;
pub mod mode;

pub use address::PixelAddress;
pub use mode::DrawMode;
