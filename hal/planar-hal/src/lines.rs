//! Control line abstractions
//!
//! The controller is framed by five single-bit lines next to the data bus.
//! All of them are active-low except the two address selects.

/// Logic level of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if the level is low
    pub const fn is_low(self) -> bool {
        !self.is_high()
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Control lines between the MCU and the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// /RD read strobe (active low)
    Read,
    /// /WR write strobe (active low)
    Write,
    /// /RES controller reset (active low)
    Reset,
    /// A0 address select: command on write, data on read
    A0,
    /// A1 address select: routes the touch matrix onto the data bus
    A1,
}

impl ControlLine {
    /// Number of control lines
    pub const COUNT: usize = 5;

    /// All lines, in index order
    pub const ALL: [ControlLine; Self::COUNT] = [
        ControlLine::Read,
        ControlLine::Write,
        ControlLine::Reset,
        ControlLine::A0,
        ControlLine::A1,
    ];

    /// Stable index for table-backed implementations
    pub const fn index(self) -> usize {
        match self {
            ControlLine::Read => 0,
            ControlLine::Write => 1,
            ControlLine::Reset => 2,
            ControlLine::A0 => 3,
            ControlLine::A1 => 4,
        }
    }

    /// Level of the line when no transaction is in flight
    pub const fn idle_level(self) -> Level {
        match self {
            ControlLine::Read | ControlLine::Write | ControlLine::Reset => Level::High,
            ControlLine::A0 | ControlLine::A1 => Level::Low,
        }
    }
}
