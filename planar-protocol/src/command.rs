//! SED1330 command set

/// Controller commands
///
/// A command is written with A0 high; its parameters follow as data writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Initialize device and display geometry (8 parameters)
    SystemSet,
    /// Enter standby mode
    SleepIn,
    /// Display off (1 parameter: display attributes)
    DisplayOff,
    /// Display on (1 parameter: display attributes)
    DisplayOn,
    /// Display start addresses and screen regions (10 parameters)
    Scroll,
    /// Cursor shape
    CursorForm,
    /// Character generator RAM start address
    CgRamAddress,
    /// Cursor auto-increment direction: shift right
    CursorRight,
    /// Horizontal dot scroll position (1 parameter)
    HorizontalScroll,
    /// Overlay format of the display layers (1 parameter)
    Overlay,
    /// Set cursor address (2 parameters, low byte first)
    CursorWrite,
    /// Read cursor address (2 data reads, low byte first)
    CursorRead,
    /// Write to display memory at the cursor
    MemoryWrite,
    /// Read from display memory at the cursor
    MemoryRead,
}

// Wire format values
const SYSTEM_SET: u8 = 0x40;
const SLEEP_IN: u8 = 0x53;
const DISPLAY_OFF: u8 = 0x58;
const DISPLAY_ON: u8 = 0x59;
const SCROLL: u8 = 0x44;
const CURSOR_FORM: u8 = 0x5D;
const CG_RAM_ADDRESS: u8 = 0x5C;
const CURSOR_RIGHT: u8 = 0x4C;
const HORIZONTAL_SCROLL: u8 = 0x5A;
const OVERLAY: u8 = 0x5B;
const CURSOR_WRITE: u8 = 0x46;
const CURSOR_READ: u8 = 0x47;
const MEMORY_WRITE: u8 = 0x42;
const MEMORY_READ: u8 = 0x43;

impl Command {
    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SYSTEM_SET => Some(Command::SystemSet),
            SLEEP_IN => Some(Command::SleepIn),
            DISPLAY_OFF => Some(Command::DisplayOff),
            DISPLAY_ON => Some(Command::DisplayOn),
            SCROLL => Some(Command::Scroll),
            CURSOR_FORM => Some(Command::CursorForm),
            CG_RAM_ADDRESS => Some(Command::CgRamAddress),
            CURSOR_RIGHT => Some(Command::CursorRight),
            HORIZONTAL_SCROLL => Some(Command::HorizontalScroll),
            OVERLAY => Some(Command::Overlay),
            CURSOR_WRITE => Some(Command::CursorWrite),
            CURSOR_READ => Some(Command::CursorRead),
            MEMORY_WRITE => Some(Command::MemoryWrite),
            MEMORY_READ => Some(Command::MemoryRead),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::SystemSet => SYSTEM_SET,
            Command::SleepIn => SLEEP_IN,
            Command::DisplayOff => DISPLAY_OFF,
            Command::DisplayOn => DISPLAY_ON,
            Command::Scroll => SCROLL,
            Command::CursorForm => CURSOR_FORM,
            Command::CgRamAddress => CG_RAM_ADDRESS,
            Command::CursorRight => CURSOR_RIGHT,
            Command::HorizontalScroll => HORIZONTAL_SCROLL,
            Command::Overlay => OVERLAY,
            Command::CursorWrite => CURSOR_WRITE,
            Command::CursorRead => CURSOR_READ,
            Command::MemoryWrite => MEMORY_WRITE,
            Command::MemoryRead => MEMORY_READ,
        }
    }

    /// Returns true if the command is followed by data reads rather than writes
    pub fn is_read(&self) -> bool {
        matches!(self, Command::CursorRead | Command::MemoryRead)
    }
}
