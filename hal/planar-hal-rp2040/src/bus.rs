//! GPIO parallel bus
//!
//! Eight bidirectional data pins (D0 first) and five push-pull control
//! outputs. The data pins change direction per transaction; the control
//! lines are always outputs.

use embassy_rp::gpio::{AnyPin, Flex, Level as PinLevel, Output, Pin};
use embassy_rp::Peri;
use planar_hal::{BusDirection, ControlLine, Level, ParallelBus};

fn pin_level(level: Level) -> PinLevel {
    match level {
        Level::Low => PinLevel::Low,
        Level::High => PinLevel::High,
    }
}

/// Control line pins
pub struct ControlPins<'d> {
    /// /RD
    pub read: Peri<'d, AnyPin>,
    /// /WR
    pub write: Peri<'d, AnyPin>,
    /// /RES
    pub reset: Peri<'d, AnyPin>,
    /// A0
    pub a0: Peri<'d, AnyPin>,
    /// A1
    pub a1: Peri<'d, AnyPin>,
}

/// SED1330 bus on RP2040 GPIO
pub struct RpParallelBus<'d> {
    data: [Flex<'d>; 8],
    read: Output<'d>,
    write: Output<'d>,
    reset: Output<'d>,
    a0: Output<'d>,
    a1: Output<'d>,
    direction: BusDirection,
}

impl<'d> RpParallelBus<'d> {
    /// Claim the pins; every control line starts at its idle level and the
    /// data lines start as outputs driving zero
    pub fn new<P: Pin>(data: [Peri<'d, P>; 8], control: ControlPins<'d>) -> Self {
        let idle = |line: ControlLine| pin_level(line.idle_level());

        let mut bus = Self {
            data: data.map(|pin| Flex::new(pin)),
            read: Output::new(control.read, idle(ControlLine::Read)),
            write: Output::new(control.write, idle(ControlLine::Write)),
            reset: Output::new(control.reset, idle(ControlLine::Reset)),
            a0: Output::new(control.a0, idle(ControlLine::A0)),
            a1: Output::new(control.a1, idle(ControlLine::A1)),
            direction: BusDirection::Input,
        };

        bus.write_data(0x00);
        bus.set_direction(BusDirection::Output);
        bus
    }

    fn output(&self, line: ControlLine) -> &Output<'d> {
        match line {
            ControlLine::Read => &self.read,
            ControlLine::Write => &self.write,
            ControlLine::Reset => &self.reset,
            ControlLine::A0 => &self.a0,
            ControlLine::A1 => &self.a1,
        }
    }

    fn output_mut(&mut self, line: ControlLine) -> &mut Output<'d> {
        match line {
            ControlLine::Read => &mut self.read,
            ControlLine::Write => &mut self.write,
            ControlLine::Reset => &mut self.reset,
            ControlLine::A0 => &mut self.a0,
            ControlLine::A1 => &mut self.a1,
        }
    }
}

impl ParallelBus for RpParallelBus<'_> {
    fn set_direction(&mut self, direction: BusDirection) {
        if direction == self.direction {
            return;
        }

        for pin in self.data.iter_mut() {
            match direction {
                BusDirection::Input => pin.set_as_input(),
                BusDirection::Output => pin.set_as_output(),
            }
        }
        self.direction = direction;
    }

    fn direction(&self) -> BusDirection {
        self.direction
    }

    fn write_data(&mut self, value: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_level(PinLevel::from(value & (1 << bit) != 0));
        }
    }

    fn read_data(&mut self) -> u8 {
        self.data
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| acc | ((pin.is_high() as u8) << bit))
    }

    fn set_line(&mut self, line: ControlLine, level: Level) {
        self.output_mut(line).set_level(pin_level(level));
    }

    fn line(&self, line: ControlLine) -> Level {
        Level::from(self.output(line).is_set_high())
    }
}
