//! Parallel bus abstraction
//!
//! An 8-bit data bus whose direction is switched per transaction, plus the
//! control lines from [`crate::lines`]. Implementations only move bits; all
//! sequencing and timing lives in the driver.

use crate::lines::{ControlLine, Level};

/// Direction of the data lines, seen from the MCU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusDirection {
    /// MCU samples the data lines
    Input,
    /// MCU drives the data lines
    Output,
}

/// Parallel bus with direction control
///
/// The data direction must match the transaction in flight: output while a
/// write strobe is asserted, input while a read strobe is asserted. The
/// trait does not enforce this; the driver does.
pub trait ParallelBus {
    /// Switch the data lines to the given direction
    fn set_direction(&mut self, direction: BusDirection);

    /// Current data line direction
    fn direction(&self) -> BusDirection;

    /// Drive a byte onto the data lines
    ///
    /// Only meaningful while the bus is in [`BusDirection::Output`].
    fn write_data(&mut self, value: u8);

    /// Sample the data lines
    ///
    /// Only meaningful while the bus is in [`BusDirection::Input`].
    fn read_data(&mut self) -> u8;

    /// Drive a control line
    fn set_line(&mut self, line: ControlLine, level: Level);

    /// Level currently driven on a control line
    fn line(&self, line: ControlLine) -> Level;

    /// Drive a control line high
    fn set_high(&mut self, line: ControlLine) {
        self.set_line(line, Level::High);
    }

    /// Drive a control line low
    fn set_low(&mut self, line: ControlLine) {
        self.set_line(line, Level::Low);
    }

    /// Put every control line in its idle level and the data lines in output
    fn idle(&mut self) {
        for line in ControlLine::ALL {
            self.set_line(line, line.idle_level());
        }
        self.set_direction(BusDirection::Output);
    }
}
