//! Draw modes

/// How a primitive affects the pixels it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// Set pixels; closed shapes draw their outline only
    #[default]
    Set,
    /// Clear pixels; closed shapes clear their outline only
    Clear,
    /// Set pixels; closed shapes are filled
    Fill,
    /// Clear pixels; closed shapes are cleared inside too
    Erase,
}

impl DrawMode {
    /// Returns true if the mode turns pixels on
    pub fn sets_pixels(self) -> bool {
        matches!(self, DrawMode::Set | DrawMode::Fill)
    }

    /// Returns true if closed shapes also cover their interior
    pub fn covers_interior(self) -> bool {
        matches!(self, DrawMode::Fill | DrawMode::Erase)
    }

    /// Apply the mode to one bit of a display byte
    pub fn apply(self, byte: u8, mask: u8) -> u8 {
        if self.sets_pixels() {
            byte | mask
        } else {
            byte & !mask
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_pixels() {
        assert!(DrawMode::Set.sets_pixels());
        assert!(DrawMode::Fill.sets_pixels());
        assert!(!DrawMode::Clear.sets_pixels());
        assert!(!DrawMode::Erase.sets_pixels());
    }

    #[test]
    fn test_covers_interior() {
        assert!(DrawMode::Fill.covers_interior());
        assert!(DrawMode::Erase.covers_interior());
        assert!(!DrawMode::Set.covers_interior());
        assert!(!DrawMode::Clear.covers_interior());
    }

    #[test]
    fn test_apply_only_touches_mask() {
        assert_eq!(DrawMode::Set.apply(0b0000_0001, 0b1000_0000), 0b1000_0001);
        assert_eq!(DrawMode::Fill.apply(0b1000_0000, 0b1000_0000), 0b1000_0000);
        assert_eq!(DrawMode::Clear.apply(0b1000_0001, 0b1000_0000), 0b0000_0001);
        assert_eq!(DrawMode::Erase.apply(0xFF, 0b0000_0100), 0b1111_1011);
    }
}
