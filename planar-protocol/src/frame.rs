//! Command frames
//!
//! A frame is one command byte followed by its parameter block:
//! - COMMAND (1 byte): written with A0 high
//! - PARAMS (0-16 bytes): written with A0 low, in order

use heapless::Vec;

use crate::command::Command;

/// Maximum parameter block length carried by a frame
pub const MAX_PARAMS: usize = 16;

/// Errors that can occur while building a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Parameter block exceeds [`MAX_PARAMS`]
    TooManyParams,
}

/// A command with its parameter block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    /// Command byte
    pub command: Command,
    /// Parameter bytes, sent in order after the command
    pub params: Vec<u8, MAX_PARAMS>,
}

impl CommandFrame {
    /// Create a new frame with the given parameters
    pub fn new(command: Command, params: &[u8]) -> Result<Self, FrameError> {
        let mut block = Vec::new();
        block
            .extend_from_slice(params)
            .map_err(|_| FrameError::TooManyParams)?;

        Ok(Self {
            command,
            params: block,
        })
    }

    /// Create a frame with no parameters
    pub fn bare(command: Command) -> Self {
        Self {
            command,
            params: Vec::new(),
        }
    }

    /// Append one parameter byte
    pub fn push_param(&mut self, byte: u8) -> Result<(), FrameError> {
        self.params.push(byte).map_err(|_| FrameError::TooManyParams)
    }

    /// Number of bytes this frame puts on the bus
    pub fn wire_len(&self) -> usize {
        1 + self.params.len()
    }
}
