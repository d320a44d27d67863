//! Panel drivers
//!
//! Concrete implementations on top of the planar-hal traits:
//!
//! - SED1330 bus transport, controller session and pixel canvas
//! - Touch matrix sampling, interrupt watcher and event dispatch
//! - A host-side controller emulation for tests (`mock` feature)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod sed1330;
pub mod touch;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
