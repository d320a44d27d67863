//! Planar Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the panel driver is
//! written against. A chip-specific HAL implements them once; the driver,
//! the touch decoder and the host-side mock controller all share them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  planar-drivers (session, canvas, touch)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  planar-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ planar-hal-   │       │ MockController│
//! │    rp2040     │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::ParallelBus`] - 8-bit data bus with switchable direction plus control lines
//! - [`irq::TouchMask`] - Masking of the touch interrupt around multi-step transactions

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod irq;
pub mod lines;

// Re-export key traits at crate root for convenience
pub use bus::{BusDirection, ParallelBus};
pub use irq::{MaskGuard, NoMask, TouchMask};
pub use lines::{ControlLine, Level};
