//! RP2040 implementation of the Planar HAL
//!
//! - [`RpParallelBus`]: the panel's data bus and control lines on plain GPIO
//!
//! The remaining collaborators come straight from embassy:
//!
//! - [`Delay`] is the strobe and reset delay source
//! - `embassy_rp::gpio::Input` on the touch line (pulled up) implements
//!   `embedded_hal_async::digital::Wait` for the touch watcher

#![no_std]

pub mod bus;

pub use bus::RpParallelBus;
pub use embassy_time::Delay;
