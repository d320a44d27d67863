//! SED1330 bus protocol
//!
//! This crate defines what travels over the parallel bus between the MCU and
//! the panel: the controller's command set, the three kinds of read, the
//! status register, command frames with their parameter blocks, and the
//! wire format of the touch matrix.
//!
//! # Bus cycles
//!
//! ```text
//! ┌──────┬────┬────┬─────────────────────────────────┐
//! │  A1  │ A0 │ RW │ Meaning                         │
//! ├──────┼────┼────┼─────────────────────────────────┤
//! │  0   │ 1  │ WR │ command byte                    │
//! │  0   │ 0  │ WR │ parameter / display data        │
//! │  0   │ 0  │ RD │ status register                 │
//! │  0   │ 1  │ RD │ display memory / cursor address │
//! │  1   │ 0  │ RD │ touch columns (6 bits)          │
//! │  1   │ 1  │ RD │ touch rows (3 bits)             │
//! └──────┴────┴────┴─────────────────────────────────┘
//! ```
//!
//! The controller itself knows nothing about the touch matrix; A1 routes the
//! matrix sense lines onto the data bus instead of the controller.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod read;
pub mod touch;

pub use command::Command;
pub use frame::{CommandFrame, FrameError, MAX_PARAMS};
pub use read::{ReadKind, Status, INVALID_READ, STATUS_READY};
pub use touch::{DecodeFault, TouchEvent, TouchSample};
