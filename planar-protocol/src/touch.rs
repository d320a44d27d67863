//! Touch matrix wire format
//!
//! The panel's resistive overlay is a 6 column x 3 row switch matrix whose
//! sense lines are read through the data bus. Idle lines read high. A clean
//! press shows up as exactly one set bit per axis; anything else is noise.

/// Significant bits of a column read
pub const COLUMN_MASK: u8 = 0x3F;

/// Significant bits of a row read
pub const ROW_MASK: u8 = 0x07;

/// Largest valid 1-based column index
pub const MAX_COLUMN: u8 = 6;

/// Largest valid 1-based row index
pub const MAX_ROW: u8 = 3;

/// Raw sense-line read, one byte per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Column lines (low 6 bits)
    pub columns: u8,
    /// Row lines (low 3 bits)
    pub rows: u8,
}

/// Why a sample did not decode to a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeFault {
    /// All lines high: nothing pressed
    Released,
    /// More than one line set on an axis
    MultipleBits,
    /// No line set on an axis
    NoBits,
    /// Decoded index beyond the matrix
    OutOfRange,
}

/// A decoded press, 1-based row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    /// Row index (1..=3)
    pub row: u8,
    /// Column index (1..=6)
    pub column: u8,
}

impl TouchSample {
    /// Build a sample, dropping bits outside each axis
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns: columns & COLUMN_MASK,
            rows: rows & ROW_MASK,
        }
    }

    /// Sample with every line high
    pub const fn released() -> Self {
        Self::new(COLUMN_MASK, ROW_MASK)
    }

    /// All lines read high
    pub const fn is_released(&self) -> bool {
        self.columns == COLUMN_MASK && self.rows == ROW_MASK
    }

    /// Decode the sample
    ///
    /// Only a read with exactly one set bit on each axis is trusted. The
    /// index of that bit (1-based) gives the row or column.
    pub fn decode(&self) -> Result<TouchEvent, DecodeFault> {
        if self.is_released() {
            return Err(DecodeFault::Released);
        }

        let column = single_bit_position(self.columns)?;
        let row = single_bit_position(self.rows)?;

        if row > MAX_ROW || column > MAX_COLUMN {
            return Err(DecodeFault::OutOfRange);
        }

        Ok(TouchEvent { row, column })
    }

    /// Decode, collapsing every fault to "no touch"
    pub fn event(&self) -> Option<TouchEvent> {
        self.decode().ok()
    }
}

/// 1-based position of the only set bit
fn single_bit_position(bits: u8) -> Result<u8, DecodeFault> {
    match bits.count_ones() {
        0 => Err(DecodeFault::NoBits),
        1 => Ok(bits.trailing_zeros() as u8 + 1),
        _ => Err(DecodeFault::MultipleBits),
    }
}

impl TouchEvent {
    /// Parse the packed `(row << 8) | column` word; 0 means no touch
    pub fn from_word(word: u16) -> Option<Self> {
        let row = (word >> 8) as u8;
        let column = word as u8;

        if row == 0 || column == 0 || row > MAX_ROW || column > MAX_COLUMN {
            return None;
        }

        Some(Self { row, column })
    }

    /// Pack as `(row << 8) | column`
    pub fn to_word(self) -> u16 {
        ((self.row as u16) << 8) | self.column as u16
    }

    /// Pack an optional event, 0 for no touch
    pub fn word_of(event: Option<Self>) -> u16 {
        event.map_or(0, Self::to_word)
    }
}
