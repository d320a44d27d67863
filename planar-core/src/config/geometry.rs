//! Panel geometry
//!
//! Describes how the panel's pixels and character cells map onto the
//! controller's single 16-bit address space:
//!
//! ```text
//! 0x0000 ┌──────────────────────────┐ text_base
//!        │ text: 1 byte per cell    │ row_stride * char_rows
//!        ├──────────────────────────┤
//!        │            ...           │
//! 0x1000 ├──────────────────────────┤ graphics_base
//!        │ graphics: 1 byte per     │ row_stride * char_rows * char_height
//!        │ char_width pixels        │
//!        └──────────────────────────┘
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the controller address space
pub const ADDRESS_SPACE: u32 = 0x1_0000;

/// Geometry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A resolution or cell count is zero
    ZeroDimension,
    /// Character width outside 1..=8 (one graphics byte per cell row)
    CharWidth,
    /// More characters per row than bytes per display line
    RowStride,
    /// Panel pixels do not fit the declared character grid
    GridTooSmall,
    /// A region runs past the end of the address space
    AddressSpace,
    /// Text and graphics regions overlap
    RegionOverlap,
}

/// Panel and controller memory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Horizontal resolution in pixels
    pub resx: u16,
    /// Vertical resolution in pixels
    pub resy: u16,
    /// Character cell width in pixels (pixels per graphics byte)
    pub char_width: u8,
    /// Character cell height in pixels
    pub char_height: u8,
    /// Characters per text row
    pub chars_per_row: u8,
    /// Text rows
    pub char_rows: u8,
    /// Bytes per display line, in both regions
    pub row_stride: u16,
    /// Start of the text region
    pub text_base: u16,
    /// Start of the graphics region
    pub graphics_base: u16,
    /// Settle time around each strobe edge, microseconds
    pub strobe_delay_us: u32,
    /// Length of the hardware reset pulse, milliseconds
    pub reset_pulse_ms: u32,
}

impl PanelGeometry {
    /// Planar EL160.80.38-SM1: 160x80 pixels, 6x8 cells, 27x10 characters
    pub const EL160_80: Self = Self {
        resx: 160,
        resy: 80,
        char_width: 6,
        char_height: 8,
        chars_per_row: 27,
        char_rows: 10,
        row_stride: 32,
        text_base: 0x0000,
        graphics_base: 0x1000,
        strobe_delay_us: 1,
        reset_pulse_ms: 500,
    };

    /// Bytes in the text region
    pub const fn text_extent(&self) -> u32 {
        self.row_stride as u32 * self.char_rows as u32
    }

    /// Bytes in the graphics region
    pub const fn graphics_extent(&self) -> u32 {
        self.text_extent() * self.char_height as u32
    }

    /// Lines scanned per frame (the panel is driven as two stacked halves)
    pub const fn scan_lines(&self) -> u32 {
        self.char_rows as u32 * self.char_height as u32 * 2
    }

    /// Check that the layout is usable
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.resx == 0
            || self.resy == 0
            || self.char_height == 0
            || self.chars_per_row == 0
            || self.char_rows == 0
            || self.row_stride == 0
        {
            return Err(ConfigError::ZeroDimension);
        }

        if self.char_width == 0 || self.char_width > 8 {
            return Err(ConfigError::CharWidth);
        }

        if self.chars_per_row as u16 > self.row_stride {
            return Err(ConfigError::RowStride);
        }

        if self.resx as u32 > self.row_stride as u32 * self.char_width as u32
            || self.resy as u32 > self.char_rows as u32 * self.char_height as u32
        {
            return Err(ConfigError::GridTooSmall);
        }

        let text_end = self.text_base as u32 + self.text_extent();
        let graphics_end = self.graphics_base as u32 + self.graphics_extent();
        if text_end > ADDRESS_SPACE || graphics_end > ADDRESS_SPACE {
            return Err(ConfigError::AddressSpace);
        }

        if (self.text_base as u32) < graphics_end && (self.graphics_base as u32) < text_end {
            return Err(ConfigError::RegionOverlap);
        }

        Ok(())
    }

    /// Text-region address of a character cell, clamped to the grid
    ///
    /// The clamp is inclusive of `chars_per_row` and `char_rows`, so the
    /// cursor may sit one cell past the last column or row.
    pub const fn text_address(&self, col: u8, row: u8) -> u16 {
        let col = if col > self.chars_per_row {
            self.chars_per_row
        } else {
            col
        };
        let row = if row > self.char_rows {
            self.char_rows
        } else {
            row
        };

        self.text_base
            .wrapping_add((row as u16).wrapping_mul(self.row_stride))
            .wrapping_add(col as u16)
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::EL160_80
    }
}

// Catch a broken default layout at build time
const _: () = assert!(PanelGeometry::EL160_80.validate().is_ok());
