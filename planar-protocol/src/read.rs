//! Read cycles and the status register

use crate::command::Command;

/// Value returned for a read request the protocol does not know
pub const INVALID_READ: u8 = 0xFF;

/// Status register bit that is set when the controller accepts a write
pub const STATUS_READY: u8 = 0x40;

/// Wire value used to request a status (busy) read
const BUSY_CHECK: u8 = 0xFF;

/// The three things that can be read back from the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadKind {
    /// Display memory byte at the cursor (issues `MemoryRead` first)
    MemoryRead,
    /// Cursor address byte (issues `CursorRead` first)
    CursorRead,
    /// Status register, no command issued
    BusyCheck,
}

impl ReadKind {
    /// Parse a read request from its wire value
    ///
    /// The memory and cursor reads use their command bytes; the status read
    /// uses 0xFF, which is not a controller command.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b if b == Command::MemoryRead.to_byte() => Some(ReadKind::MemoryRead),
            b if b == Command::CursorRead.to_byte() => Some(ReadKind::CursorRead),
            BUSY_CHECK => Some(ReadKind::BusyCheck),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_byte(self) -> u8 {
        match self {
            ReadKind::MemoryRead => Command::MemoryRead.to_byte(),
            ReadKind::CursorRead => Command::CursorRead.to_byte(),
            ReadKind::BusyCheck => BUSY_CHECK,
        }
    }

    /// Command that must precede the read, if any
    pub fn command(self) -> Option<Command> {
        match self {
            ReadKind::MemoryRead => Some(Command::MemoryRead),
            ReadKind::CursorRead => Some(Command::CursorRead),
            ReadKind::BusyCheck => None,
        }
    }
}

/// Controller status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    /// Controller accepts the next write
    pub fn is_ready(self) -> bool {
        self.0 & STATUS_READY != 0
    }

    /// Controller is still processing the previous byte
    pub fn is_busy(self) -> bool {
        !self.is_ready()
    }
}
