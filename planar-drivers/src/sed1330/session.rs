//! SED1330 controller session
//!
//! Owns the transport and the panel geometry. The controller holds all
//! display state; the session keeps none of its own beyond the geometry.

use core::fmt;

use embedded_hal::delay::DelayNs;
use planar_core::config::{ConfigError, PanelGeometry};
use planar_hal::ParallelBus;
use planar_protocol::{Command, CommandFrame, FrameError, ReadKind, TouchEvent, TouchSample};

use super::Transport;

/// Number of command frames in the configuration sequence
pub const INIT_FRAMES: usize = 7;

/// SYSSET P1: internal CG ROM, 8-line cells, dual-panel drive, no inversion
const SYSTEM_MODE: u8 = 0x38;

/// SYSSET P2 flag: two-frame AC drive
const TWO_FRAME_DRIVE: u8 = 0x80;

/// OVERLAY: text and graphics layers combined by XOR, simple overlay
const OVERLAY_XOR: u8 = 0x01;

/// Start of the second-screen text block (unused by this panel)
const SECOND_TEXT_BASE: u16 = 0x0400;

/// Start of the second-screen graphics block (unused by this panel)
const SECOND_GRAPHICS_BASE: u16 = 0x3000;

/// CSRFORM P1..P3
const CURSOR_FORM: [u8; 3] = [0x5D, 0x04, 0x86];

/// HDOTSCR: no horizontal dot scroll
const NO_DOT_SCROLL: u8 = 0x00;

/// DISPON/DISPOFF attribute: both screen blocks on, cursor glyph off
///
/// The cursor glyph is drawn into the overlay and corrupts graphics.
const SCREEN_ATTRIBUTES: u8 = 0x14;

/// Blank text cell
const SPACE: u8 = b' ';

fn lo(value: u16) -> u8 {
    (value & 0xFF) as u8
}

fn hi(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Configuration sequence for a geometry, in send order
///
/// SYSSET, OVERLAY, SCROLL, CSRFORM, HDOTSCR, CSRDIR and DISPON. Clearing
/// text and graphics memory follows separately.
pub fn init_frames(geometry: &PanelGeometry) -> Result<[CommandFrame; INIT_FRAMES], FrameError> {
    let g = geometry;
    let cells_per_row = g.chars_per_row.wrapping_sub(1);
    let scan_lines = g.scan_lines().wrapping_sub(1) as u8;

    let system_set = CommandFrame::new(
        Command::SystemSet,
        &[
            SYSTEM_MODE,
            g.char_width.wrapping_sub(1) | TWO_FRAME_DRIVE,
            g.char_height.wrapping_sub(1),
            cells_per_row,
            cells_per_row.wrapping_add(8),
            scan_lines,
            lo(g.row_stride),
            hi(g.row_stride),
        ],
    )?;

    let scroll = CommandFrame::new(
        Command::Scroll,
        &[
            lo(g.text_base),
            hi(g.text_base),
            scan_lines,
            lo(g.graphics_base),
            hi(g.graphics_base),
            scan_lines,
            lo(SECOND_TEXT_BASE),
            hi(SECOND_TEXT_BASE),
            lo(SECOND_GRAPHICS_BASE),
            hi(SECOND_GRAPHICS_BASE),
        ],
    )?;

    Ok([
        system_set,
        CommandFrame::new(Command::Overlay, &[OVERLAY_XOR])?,
        scroll,
        CommandFrame::new(Command::CursorForm, &CURSOR_FORM)?,
        CommandFrame::new(Command::HorizontalScroll, &[NO_DOT_SCROLL])?,
        CommandFrame::bare(Command::CursorRight),
        CommandFrame::new(Command::DisplayOn, &[SCREEN_ATTRIBUTES])?,
    ])
}

/// A configured SED1330 and its panel
pub struct Sed1330<B, D> {
    transport: Transport<B, D>,
    geometry: PanelGeometry,
}

impl<B: ParallelBus, D: DelayNs> Sed1330<B, D> {
    /// Create a session; nothing is sent until [`Sed1330::initialize`]
    pub fn new(bus: B, delay: D, geometry: PanelGeometry) -> Result<Self, ConfigError> {
        geometry.validate()?;

        Ok(Self {
            transport: Transport::new(bus, delay, geometry.strobe_delay_us),
            geometry,
        })
    }

    /// Panel geometry
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Bus cycle layer
    pub fn transport(&self) -> &Transport<B, D> {
        &self.transport
    }

    /// Mutable bus cycle layer
    pub fn transport_mut(&mut self) -> &mut Transport<B, D> {
        &mut self.transport
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        self.transport.release()
    }

    /// Hardware reset: lines to idle, then pulse the reset line
    pub fn reset(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("sed1330 reset, {} ms", self.geometry.reset_pulse_ms);

        self.transport.pulse_reset(self.geometry.reset_pulse_ms);
    }

    /// Reset and configure the controller, then clear both layers
    ///
    /// Call once after power-up. Drawing before this leaves the result to
    /// whatever state the controller came up in.
    pub fn initialize(&mut self) -> Result<(), FrameError> {
        let frames = init_frames(&self.geometry)?;

        self.reset();
        for frame in frames.iter() {
            self.transport.send_frame(frame);
        }

        self.clear_text();
        self.clear_graphics();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "sed1330 ready: {}x{} px, {}x{} chars",
            self.geometry.resx,
            self.geometry.resy,
            self.geometry.chars_per_row,
            self.geometry.char_rows
        );

        Ok(())
    }

    /// Write the cursor address register, low byte first
    pub fn set_cursor_address(&mut self, address: u16) {
        self.transport.send_command(Command::CursorWrite);
        self.transport.send_data(lo(address));
        self.transport.send_data(hi(address));
    }

    /// Read the cursor address register back
    ///
    /// `CSRR` is issued once; its two data reads return the low and then
    /// the high byte.
    pub fn cursor_address(&mut self) -> u16 {
        let low = self.transport.read(ReadKind::CursorRead);
        let high = self.transport.read_next();
        u16::from_le_bytes([low, high])
    }

    /// Move the cursor to a text cell, clamping to the character grid
    pub fn move_text_cursor(&mut self, col: u8, row: u8) {
        let address = self.geometry.text_address(col, row);
        self.set_cursor_address(address);
    }

    /// Fill the text layer with spaces and home the cursor
    ///
    /// The display is switched off while the layer is rewritten. Both
    /// DISPOFF and DISPON go out without their attribute byte; the
    /// controller keeps the attributes set by [`Sed1330::initialize`].
    pub fn clear_text(&mut self) {
        self.move_text_cursor(0, 0);
        self.transport.send_command(Command::DisplayOff);

        self.transport.send_command(Command::MemoryWrite);
        for _ in 0..self.geometry.text_extent() {
            self.transport.send_data(SPACE);
        }

        self.move_text_cursor(0, 0);
        self.transport.send_command(Command::DisplayOn);
    }

    /// Zero the graphics layer
    pub fn clear_graphics(&mut self) {
        self.set_cursor_address(self.geometry.graphics_base);

        self.transport.send_command(Command::MemoryWrite);
        for _ in 0..self.geometry.graphics_extent() {
            self.transport.send_data(0x00);
        }
    }

    /// Write one character code at the cursor
    ///
    /// Glyphs come from the controller's character generator ROM.
    pub fn put_char(&mut self, code: u8) {
        self.transport.send_command(Command::MemoryWrite);
        self.transport.send_data(code);
    }

    /// Write each byte of `text` through [`Sed1330::put_char`]
    pub fn print(&mut self, text: &str) {
        for code in text.bytes() {
            self.put_char(code);
        }
    }

    /// Switch the panel output on or off
    pub fn set_display_enabled(&mut self, enabled: bool) {
        let command = if enabled {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        };

        self.transport.send_command(command);
        self.transport.send_data(SCREEN_ATTRIBUTES);
    }

    /// Sample the touch matrix
    pub fn read_touch(&mut self) -> TouchSample {
        self.transport.read_touch()
    }

    /// Sample and decode the touch matrix
    ///
    /// Releases and rejected samples both read as `None`.
    pub fn touch_event(&mut self) -> Option<TouchEvent> {
        self.read_touch().event()
    }
}

impl<B: ParallelBus, D: DelayNs> fmt::Write for Sed1330<B, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}
