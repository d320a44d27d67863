//! SED1330 bus cycles
//!
//! ```text
//! cycle          A0   strobe   direction
//! command write  1    /WR      output
//! data write     0    /WR      output
//! status read    0    /RD      input
//! data read      1    /RD      input
//! ```
//!
//! Every write waits for the status ready bit first. There is no timeout: a
//! controller that never becomes ready blocks the caller forever.

use embedded_hal::delay::DelayNs;
use planar_hal::{BusDirection, ControlLine, ParallelBus};
use planar_protocol::{Command, CommandFrame, ReadKind, Status, TouchSample, INVALID_READ};

use crate::touch::sample_matrix;

/// Owns the bus and the strobe timing
pub struct Transport<B, D> {
    bus: B,
    delay: D,
    strobe_delay_us: u32,
}

impl<B: ParallelBus, D: DelayNs> Transport<B, D> {
    /// Wrap a bus and a delay source
    pub fn new(bus: B, delay: D, strobe_delay_us: u32) -> Self {
        Self {
            bus,
            delay,
            strobe_delay_us,
        }
    }

    /// Settle time around a strobe edge
    fn settle(&mut self) {
        self.delay.delay_us(self.strobe_delay_us);
    }

    /// Drive `value` onto the bus and pulse /WR
    fn strobe_write(&mut self, value: u8) {
        self.bus.write_data(value);
        self.settle();
        self.bus.set_low(ControlLine::Write);
        self.settle();
        self.bus.set_high(ControlLine::Write);
    }

    /// One read cycle; A0 must already select status or data
    fn strobe_read(&mut self) -> u8 {
        self.bus.set_direction(BusDirection::Input);

        self.settle();
        self.bus.set_low(ControlLine::Read);
        self.settle();
        let value = self.bus.read_data();
        self.bus.set_high(ControlLine::Read);

        self.bus.set_low(ControlLine::A0);
        self.bus.set_direction(BusDirection::Output);
        value
    }

    /// Read the status register
    pub fn status(&mut self) -> Status {
        Status(self.strobe_read())
    }

    /// Controller accepts the next write
    pub fn is_ready(&mut self) -> bool {
        self.status().is_ready()
    }

    /// Spin until the controller accepts the next write
    pub fn wait_ready(&mut self) {
        while !self.is_ready() {}
    }

    /// Write a command byte
    pub fn send_command(&mut self, command: Command) {
        self.send_command_byte(command.to_byte());
    }

    /// Write a raw command byte
    ///
    /// The controller ignores bytes it does not know; this exists for
    /// exercising that path.
    pub fn send_command_byte(&mut self, byte: u8) {
        self.wait_ready();
        self.bus.set_high(ControlLine::A0);
        self.strobe_write(byte);
        self.bus.set_low(ControlLine::A0);
    }

    /// Write a parameter or memory byte
    pub fn send_data(&mut self, value: u8) {
        self.wait_ready();
        self.strobe_write(value);
    }

    /// Write a command followed by its parameter block
    pub fn send_frame(&mut self, frame: &CommandFrame) {
        self.send_command(frame.command);
        for &param in frame.params.iter() {
            self.send_data(param);
        }
    }

    /// Read back from the controller
    ///
    /// Memory and cursor reads issue their command first and return the raw
    /// byte. A busy check returns 1 while the controller is busy, 0 once it
    /// is ready.
    pub fn read(&mut self, kind: ReadKind) -> u8 {
        match kind.command() {
            Some(command) => {
                self.send_command(command);
                self.read_next()
            }
            None => self.status().is_busy() as u8,
        }
    }

    /// [`Transport::read`] keyed by wire value
    ///
    /// Returns [`INVALID_READ`] without touching the bus for anything other
    /// than `MREAD`, `CSRR` or the 0xFF busy check.
    pub fn read_raw(&mut self, kind: u8) -> u8 {
        match ReadKind::from_byte(kind) {
            Some(kind) => self.read(kind),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("unknown read kind {=u8:#x}", kind);
                INVALID_READ
            }
        }
    }

    /// Next data byte of a read already in progress
    ///
    /// Used after `MREAD` or `CSRR` has been issued, to fetch the following
    /// byte without re-sending the command.
    pub fn read_next(&mut self) -> u8 {
        self.bus.set_high(ControlLine::A0);
        self.strobe_read()
    }

    /// Sample the touch matrix
    pub fn read_touch(&mut self) -> TouchSample {
        sample_matrix(&mut self.bus, &mut self.delay, self.strobe_delay_us)
    }

    /// Hold the reset line low for `pulse_ms`, with every other line idle
    pub fn pulse_reset(&mut self, pulse_ms: u32) {
        self.bus.idle();
        self.bus.set_low(ControlLine::Reset);
        self.delay.delay_ms(pulse_ms);
        self.bus.set_high(ControlLine::Reset);
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Mutable access to the delay source
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockController, MockDelay};
    use planar_hal::Level;

    fn transport() -> Transport<MockController, MockDelay> {
        let mut bus = MockController::new();
        bus.idle();
        Transport::new(bus, MockDelay::new(), 1)
    }

    #[test]
    fn test_command_then_data() {
        let mut t = transport();
        t.send_command(Command::Overlay);
        t.send_data(0x01);

        let frames = t.bus().frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, Command::Overlay);
        assert_eq!(frames[0].params.as_slice(), &[0x01]);
        assert_eq!(t.bus().violations(), 0);
    }

    #[test]
    fn test_lines_idle_after_cycles() {
        let mut t = transport();
        t.send_command(Command::CursorWrite);
        t.send_data(0x00);
        t.read(ReadKind::MemoryRead);

        let bus = t.bus();
        assert_eq!(bus.direction(), BusDirection::Output);
        assert_eq!(bus.line(ControlLine::A0), Level::Low);
        assert_eq!(bus.line(ControlLine::Read), Level::High);
        assert_eq!(bus.line(ControlLine::Write), Level::High);
    }

    #[test]
    fn test_waits_out_busy_controller() {
        let mut bus = MockController::new().with_busy_cycles(5);
        bus.idle();
        let mut t = Transport::new(bus, MockDelay::new(), 1);

        t.send_command(Command::MemoryWrite);
        for b in 0..8 {
            t.send_data(b);
        }
        assert_eq!(t.bus().violations(), 0);
        assert!(t.bus().status_reads() >= 8 * 5);
    }

    #[test]
    fn test_busy_check_reports_busy_flag() {
        let mut bus = MockController::new().with_busy_cycles(1);
        bus.idle();
        let mut t = Transport::new(bus, MockDelay::new(), 1);

        assert_eq!(t.read(ReadKind::BusyCheck), 0);
        t.send_command(Command::MemoryWrite);
        assert_eq!(t.read(ReadKind::BusyCheck), 1);
        assert_eq!(t.read(ReadKind::BusyCheck), 0);
    }

    #[test]
    fn test_unknown_read_is_invalid() {
        let mut t = transport();
        assert_eq!(t.read_raw(0x42), INVALID_READ);
        assert_eq!(t.read_raw(0x00), INVALID_READ);
        assert!(t.bus().frames().is_empty());
        assert_eq!(t.bus().status_reads(), 0);
    }

    #[test]
    fn test_memory_read() {
        let mut t = transport();
        t.bus_mut().poke(0x1234, 0xA5);
        t.bus_mut().poke(0x1235, 0x5A);

        t.send_frame(&CommandFrame::new(Command::CursorWrite, &[0x34, 0x12]).unwrap());
        assert_eq!(t.read_raw(0x43), 0xA5);
        assert_eq!(t.read_next(), 0x5A);
    }

    #[test]
    fn test_strobe_delays() {
        let mut t = transport();
        t.send_command(Command::CursorRight);
        // Status read and command write, two settles each
        assert_eq!(t.delay_mut().total_ns(), 4 * 1_000);
    }
}
