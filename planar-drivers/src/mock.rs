//! Host-side SED1330 emulation
//!
//! [`MockController`] implements [`ParallelBus`] and decodes the line
//! activity the way the controller and the panel's touch matrix would:
//!
//! - /WR rising edge latches a command (A0 high) or data byte (A0 low)
//! - /RD falling edge latches status (A0 low) or data (A0 high)
//! - A1 high routes the touch matrix onto the bus, sampled live
//! - /RES falling edge resets the command state; memory survives
//!
//! Protocol misuse (writes while busy, strobes against the data direction,
//! unknown commands, stray data bytes) is counted rather than panicking, so
//! tests can assert on it.

use core::ops::Range;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use planar_core::config::{PanelGeometry, ADDRESS_SPACE};
use planar_core::draw::PixelAddress;
use planar_hal::{BusDirection, ControlLine, Level, ParallelBus};
use planar_protocol::touch::{COLUMN_MASK, ROW_MASK};
use planar_protocol::{Command, CommandFrame, TouchEvent, STATUS_READY};

/// Emulated display memory size
const MEMORY_SIZE: usize = ADDRESS_SPACE as usize;

/// Command frames kept in the log
pub const LOG_CAPACITY: usize = 64;

/// Emulated controller plus touch matrix
pub struct MockController {
    memory: [u8; MEMORY_SIZE],
    written: [u32; MEMORY_SIZE / 32],
    direction: BusDirection,
    lines: [Level; ControlLine::COUNT],
    driven: u8,
    latched: u8,
    cursor: u16,
    current: Option<Command>,
    param_index: usize,
    logging: bool,
    log: Vec<CommandFrame, LOG_CAPACITY>,
    busy: u32,
    busy_cycles: u32,
    display_on: bool,
    touch_columns: u8,
    touch_rows: u8,
    resets: u32,
    status_reads: u32,
    read_strobes: u32,
    violations: u32,
}

impl Default for MockController {
    fn default() -> Self {
        Self::new()
    }
}

impl MockController {
    /// Powered-up controller with zeroed memory and an idle bus
    ///
    /// Reports busy for one status read after every write.
    pub fn new() -> Self {
        Self {
            memory: [0; MEMORY_SIZE],
            written: [0; MEMORY_SIZE / 32],
            direction: BusDirection::Output,
            lines: ControlLine::ALL.map(ControlLine::idle_level),
            driven: 0,
            latched: 0,
            cursor: 0,
            current: None,
            param_index: 0,
            logging: false,
            log: Vec::new(),
            busy: 0,
            busy_cycles: 1,
            display_on: false,
            touch_columns: COLUMN_MASK,
            touch_rows: ROW_MASK,
            resets: 0,
            status_reads: 0,
            read_strobes: 0,
            violations: 0,
        }
    }

    /// Report busy for `cycles` status reads after every write
    pub fn with_busy_cycles(mut self, cycles: u32) -> Self {
        self.busy_cycles = cycles;
        self
    }

    /// Memory byte
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    /// Set a memory byte without going through the bus
    pub fn poke(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }

    /// Fill all of memory without going through the bus
    pub fn fill(&mut self, value: u8) {
        self.memory = [value; MEMORY_SIZE];
    }

    /// Whether pixel (x, y) is lit under `geometry`
    pub fn pixel_set(&self, geometry: &PanelGeometry, x: i32, y: i32) -> bool {
        let target = PixelAddress::of(geometry, x, y);
        target.is_set_in(self.peek(target.address))
    }

    /// Whether the bus has written `address`
    pub fn was_written(&self, address: u16) -> bool {
        let address = address as usize;
        self.written[address / 32] & (1 << (address % 32)) != 0
    }

    /// Addresses written over the bus that fall outside every range
    pub fn writes_outside(&self, ranges: &[Range<u32>]) -> usize {
        (0..ADDRESS_SPACE)
            .filter(|&address| self.was_written(address as u16))
            .filter(|address| !ranges.iter().any(|r| r.contains(address)))
            .count()
    }

    /// Forget which addresses have been written
    pub fn clear_written(&mut self) {
        self.written = [0; MEMORY_SIZE / 32];
    }

    /// Commands received, with parameters truncated to the frame capacity
    ///
    /// Stops recording once [`LOG_CAPACITY`] frames are held.
    pub fn frames(&self) -> &[CommandFrame] {
        &self.log
    }

    /// Drop the command log
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.logging = false;
    }

    /// Cursor address register
    pub fn cursor(&self) -> u16 {
        self.cursor
    }

    /// Display output enabled
    pub fn display_on(&self) -> bool {
        self.display_on
    }

    /// Reset pulses seen
    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// Status register reads
    pub fn status_reads(&self) -> u32 {
        self.status_reads
    }

    /// /RD pulses of any kind
    pub fn read_strobes(&self) -> u32 {
        self.read_strobes
    }

    /// Protocol misuse seen so far
    pub fn violations(&self) -> u32 {
        self.violations
    }

    /// Hold a press at one matrix position
    ///
    /// An index of 0, or one past the width of the byte, drives no line on
    /// that axis.
    pub fn set_touch(&mut self, event: TouchEvent) {
        self.touch_columns = sense_bit(event.column);
        self.touch_rows = sense_bit(event.row);
    }

    /// Drive arbitrary sense line levels
    pub fn set_touch_lines(&mut self, columns: u8, rows: u8) {
        self.touch_columns = columns;
        self.touch_rows = rows;
    }

    /// Let go of the panel
    pub fn release_touch(&mut self) {
        self.touch_columns = COLUMN_MASK;
        self.touch_rows = ROW_MASK;
    }

    fn level(&self, line: ControlLine) -> Level {
        self.lines[line.index()]
    }

    fn store(&mut self, value: u8) {
        let address = self.cursor as usize;
        self.memory[address] = value;
        self.written[address / 32] |= 1 << (address % 32);
        self.cursor = self.cursor.wrapping_add(1);
    }

    fn on_reset(&mut self) {
        self.resets += 1;
        self.busy = 0;
        self.cursor = 0;
        self.current = None;
        self.logging = false;
        self.display_on = false;
    }

    fn on_write_strobe(&mut self) {
        if self.direction != BusDirection::Output || self.busy > 0 {
            self.violations += 1;
        }

        let value = self.driven;
        if self.level(ControlLine::A0).is_high() {
            self.on_command(value);
        } else {
            self.on_data(value);
        }
        self.busy = self.busy_cycles;
    }

    fn on_command(&mut self, byte: u8) {
        self.param_index = 0;
        self.current = Command::from_byte(byte);

        let Some(command) = self.current else {
            self.violations += 1;
            self.logging = false;
            return;
        };

        self.logging = self.log.push(CommandFrame::bare(command)).is_ok();

        match command {
            Command::DisplayOn => self.display_on = true,
            Command::DisplayOff => self.display_on = false,
            _ => {}
        }
    }

    fn on_data(&mut self, value: u8) {
        let Some(command) = self.current else {
            self.violations += 1;
            return;
        };

        if self.logging {
            if let Some(frame) = self.log.last_mut() {
                let _ = frame.push_param(value);
            }
        }

        match (command, self.param_index) {
            (Command::MemoryWrite, _) => self.store(value),
            (Command::CursorWrite, 0) => self.cursor = (self.cursor & 0xFF00) | value as u16,
            (Command::CursorWrite, 1) => {
                self.cursor = (self.cursor & 0x00FF) | ((value as u16) << 8)
            }
            _ => {}
        }
        self.param_index += 1;
    }

    fn on_read_strobe(&mut self) {
        self.read_strobes += 1;
        if self.direction != BusDirection::Input {
            self.violations += 1;
        }

        if self.level(ControlLine::A1).is_high() {
            return;
        }

        self.latched = if self.level(ControlLine::A0).is_low() {
            self.status_reads += 1;
            if self.busy > 0 {
                self.busy -= 1;
                0x00
            } else {
                STATUS_READY
            }
        } else {
            self.data_read()
        };
    }

    fn data_read(&mut self) -> u8 {
        match self.current {
            Some(Command::MemoryRead) => {
                let value = self.memory[self.cursor as usize];
                self.cursor = self.cursor.wrapping_add(1);
                value
            }
            Some(Command::CursorRead) => {
                let [low, high] = self.cursor.to_le_bytes();
                let value = if self.param_index == 0 { low } else { high };
                self.param_index = (self.param_index + 1) % 2;
                value
            }
            _ => {
                self.violations += 1;
                0xFF
            }
        }
    }
}

/// Line bit for a 1-based sense index
fn sense_bit(index: u8) -> u8 {
    index
        .checked_sub(1)
        .and_then(|shift| 1u8.checked_shl(u32::from(shift)))
        .unwrap_or(0)
}

impl ParallelBus for MockController {
    fn set_direction(&mut self, direction: BusDirection) {
        self.direction = direction;
    }

    fn direction(&self) -> BusDirection {
        self.direction
    }

    fn write_data(&mut self, value: u8) {
        self.driven = value;
    }

    fn read_data(&mut self) -> u8 {
        if self.direction == BusDirection::Output {
            return self.driven;
        }

        // Unused high lines of the matrix float high
        if self.level(ControlLine::A1).is_high() {
            return if self.level(ControlLine::A0).is_low() {
                self.touch_columns | !COLUMN_MASK
            } else {
                self.touch_rows | !ROW_MASK
            };
        }

        self.latched
    }

    fn set_line(&mut self, line: ControlLine, level: Level) {
        let previous = self.level(line);
        self.lines[line.index()] = level;

        match (line, previous, level) {
            (ControlLine::Write, Level::Low, Level::High) => self.on_write_strobe(),
            (ControlLine::Read, Level::High, Level::Low) => self.on_read_strobe(),
            (ControlLine::Reset, Level::High, Level::Low) => self.on_reset(),
            _ => {}
        }
    }

    fn line(&self, line: ControlLine) -> Level {
        self.level(line)
    }
}

/// Delay source that only adds up the requested time
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    /// Create a delay with nothing elapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay, nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
