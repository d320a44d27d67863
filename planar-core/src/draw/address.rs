//! Pixel addressing
//!
//! Each graphics byte holds one character-cell row: `char_width` pixels,
//! MSB first. A pixel therefore lives at
//!
//! ```text
//! address = graphics_base + y * row_stride + x / char_width
//! bit     = 7 - (x % char_width)
//! ```
//!
//! Coordinates are not checked against the panel resolution. Out-of-range
//! values wrap within the 16-bit address space and land in unrelated
//! memory; range validation is the caller's job.

use crate::config::PanelGeometry;
use crate::draw::DrawMode;

/// Location of one pixel in controller memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Graphics-region byte address
    pub address: u16,
    /// Bit index within the byte (7 = leftmost pixel)
    pub bit: u8,
}

impl PixelAddress {
    /// Address of pixel (x, y)
    pub fn of(geometry: &PanelGeometry, x: i32, y: i32) -> Self {
        let width = geometry.char_width as i32;
        let cell = x.checked_div(width).unwrap_or(0);
        let offset = y
            .wrapping_mul(geometry.row_stride as i32)
            .wrapping_add(cell);

        Self {
            address: geometry.graphics_base.wrapping_add(offset as u16),
            bit: (7 - x.checked_rem(width).unwrap_or(0)) as u8,
        }
    }

    /// Single-bit mask for this pixel
    ///
    /// Zero when the bit index falls outside the byte, which happens only
    /// for negative x.
    pub fn mask(&self) -> u8 {
        1u8.checked_shl(self.bit as u32).unwrap_or(0)
    }

    /// Byte value after drawing this pixel in `mode`
    pub fn apply(&self, byte: u8, mode: DrawMode) -> u8 {
        mode.apply(byte, self.mask())
    }

    /// Whether this pixel is lit in `byte`
    pub fn is_set_in(&self, byte: u8) -> bool {
        byte & self.mask() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: PanelGeometry = PanelGeometry::EL160_80;

    #[test]
    fn test_origin() {
        let p = PixelAddress::of(&G, 0, 0);
        assert_eq!(p.address, 0x1000);
        assert_eq!(p.bit, 7);
        assert_eq!(p.mask(), 0x80);
    }

    #[test]
    fn test_pixels_pack_into_one_byte() {
        let first = PixelAddress::of(&G, 0, 0);
        let last = PixelAddress::of(&G, 5, 0);
        assert_eq!(first.address, last.address);
        assert_eq!(last.bit, 2);

        let next = PixelAddress::of(&G, 6, 0);
        assert_eq!(next.address, 0x1001);
        assert_eq!(next.bit, 7);
    }

    #[test]
    fn test_row_stride() {
        let p = PixelAddress::of(&G, 159, 79);
        assert_eq!(p.address, 0x1000 + 79 * 32 + 26);
        assert_eq!(p.bit, 7 - 3);
    }

    #[test]
    fn test_apply() {
        let p = PixelAddress::of(&G, 1, 0);
        let lit = p.apply(0x00, DrawMode::Set);
        assert_eq!(lit, 0x40);
        assert!(p.is_set_in(lit));
        assert_eq!(p.apply(lit, DrawMode::Clear), 0x00);
    }

    #[test]
    fn test_negative_x_does_not_panic() {
        // Unchecked coordinates wrap; they must not panic
        let p = PixelAddress::of(&G, -1, 0);
        assert_eq!(p.mask(), 0);
        assert_eq!(p.apply(0x5A, DrawMode::Set), 0x5A);

        let p = PixelAddress::of(&G, 0, -1);
        assert_eq!(p.address, 0x1000u16.wrapping_sub(32));
    }
}
