//! Pixel access on the graphics layer
//!
//! The controller has no single-pixel write, so every pixel is a
//! read-modify-write of the byte that holds it:
//!
//! 1. CSRW to the byte
//! 2. MREAD one byte (advances the cursor)
//! 3. CSRW to the same byte again
//! 4. MWRITE the modified byte
//!
//! A touch sample taken between steps 1 and 4 would leave the bus in the
//! wrong state, so the whole sequence runs under a [`MaskGuard`].

use embedded_hal::delay::DelayNs;
use planar_core::draw::{DrawMode, PixelAddress};
use planar_core::traits::PixelTarget;
use planar_hal::{MaskGuard, ParallelBus, TouchMask};
use planar_protocol::{Command, ReadKind};

use super::Sed1330;

/// Drawing surface over a controller session
pub struct Canvas<B, D, M> {
    session: Sed1330<B, D>,
    mask: M,
}

impl<B: ParallelBus, D: DelayNs, M: TouchMask> Canvas<B, D, M> {
    /// Draw through `session`, masking the touch path with `mask`
    pub fn new(session: Sed1330<B, D>, mask: M) -> Self {
        Self { session, mask }
    }

    /// Read back one pixel
    pub fn pixel(&mut self, x: i32, y: i32) -> bool {
        let target = PixelAddress::of(self.session.geometry(), x, y);

        let _guard = MaskGuard::new(&mut self.mask);
        self.session.set_cursor_address(target.address);
        let byte = self.session.transport_mut().read(ReadKind::MemoryRead);
        target.is_set_in(byte)
    }

    /// Controller session
    pub fn session(&self) -> &Sed1330<B, D> {
        &self.session
    }

    /// Mutable controller session
    pub fn session_mut(&mut self) -> &mut Sed1330<B, D> {
        &mut self.session
    }

    /// Split back into session and mask
    pub fn into_parts(self) -> (Sed1330<B, D>, M) {
        (self.session, self.mask)
    }
}

impl<B: ParallelBus, D: DelayNs, M: TouchMask> PixelTarget for Canvas<B, D, M> {
    fn set_pixel(&mut self, x: i32, y: i32, mode: DrawMode) {
        let target = PixelAddress::of(self.session.geometry(), x, y);

        let _guard = MaskGuard::new(&mut self.mask);
        self.session.set_cursor_address(target.address);
        let byte = self.session.transport_mut().read(ReadKind::MemoryRead);

        self.session.set_cursor_address(target.address);
        let transport = self.session.transport_mut();
        transport.send_command(Command::MemoryWrite);
        transport.send_data(target.apply(byte, mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockController, MockDelay};
    use planar_core::config::PanelGeometry;
    use planar_core::traits::Primitives;
    use planar_hal::NoMask;
    use proptest::prelude::*;

    const G: PanelGeometry = PanelGeometry::EL160_80;

    type TestCanvas<M> = Canvas<MockController, MockDelay, M>;

    fn canvas() -> TestCanvas<NoMask> {
        let session = Sed1330::new(MockController::new(), MockDelay::new(), G).unwrap();
        Canvas::new(session, NoMask)
    }

    fn bus<M: TouchMask>(canvas: &TestCanvas<M>) -> &MockController {
        canvas.session().transport().bus()
    }

    /// Interrupt mask that records how it was used
    #[derive(Default)]
    struct CountingMask {
        enabled: bool,
        disables: u32,
        restores: u32,
    }

    impl TouchMask for CountingMask {
        fn disable(&mut self) -> bool {
            self.disables += 1;
            core::mem::replace(&mut self.enabled, false)
        }

        fn restore(&mut self, was_enabled: bool) {
            self.restores += 1;
            self.enabled = was_enabled;
        }
    }

    #[test]
    fn test_set_then_clear() {
        let mut c = canvas();
        c.set_pixel(10, 20, DrawMode::Set);
        assert!(c.pixel(10, 20));
        assert!(bus(&c).pixel_set(&G, 10, 20));

        c.set_pixel(10, 20, DrawMode::Clear);
        assert!(!c.pixel(10, 20));
        assert!(!bus(&c).pixel_set(&G, 10, 20));
    }

    #[test]
    fn test_neighbours_in_same_byte_survive() {
        let mut c = canvas();
        c.set_pixel(0, 0, DrawMode::Set);
        c.set_pixel(5, 0, DrawMode::Set);

        assert_eq!(bus(&c).peek(0x1000), 0x84);
        assert_eq!(bus(&c).peek(0x1001), 0x00);

        c.set_pixel(0, 0, DrawMode::Erase);
        assert_eq!(bus(&c).peek(0x1000), 0x04);
    }

    #[test]
    fn test_pixel_write_sequence() {
        let mut c = canvas();
        c.set_pixel(6, 1, DrawMode::Set);

        let frames = bus(&c).frames();
        let commands: std::vec::Vec<Command> = frames.iter().map(|f| f.command).collect();
        assert_eq!(
            commands,
            [
                Command::CursorWrite,
                Command::MemoryRead,
                Command::CursorWrite,
                Command::MemoryWrite,
            ]
        );
        assert_eq!(frames[0].params.as_slice(), &[0x21, 0x10]);
        assert_eq!(frames[2].params.as_slice(), &[0x21, 0x10]);
        assert_eq!(frames[3].params.as_slice(), &[0x80]);
        assert_eq!(bus(&c).violations(), 0);
    }

    #[test]
    fn test_every_pixel_op_is_masked() {
        let session = Sed1330::new(MockController::new(), MockDelay::new(), G).unwrap();
        let mut c = Canvas::new(
            session,
            CountingMask {
                enabled: true,
                ..Default::default()
            },
        );

        c.draw_line(0, 0, 9, 0, DrawMode::Set);
        c.pixel(3, 0);

        let (_, mask) = c.into_parts();
        assert_eq!(mask.disables, 11);
        assert_eq!(mask.restores, 11);
        assert!(mask.enabled);
    }

    #[test]
    fn test_filled_rectangle_on_panel() {
        let mut c = canvas();
        c.draw_rectangle(4, 2, 15, 9, DrawMode::Fill);

        for y in 0..14 {
            for x in 0..24 {
                let inside = (4..=15).contains(&x) && (2..=9).contains(&y);
                assert_eq!(bus(&c).pixel_set(&G, x, y), inside, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_outline_rectangle_leaves_interior() {
        let mut c = canvas();
        c.draw_rectangle(4, 2, 15, 9, DrawMode::Set);

        assert!(bus(&c).pixel_set(&G, 4, 5));
        assert!(bus(&c).pixel_set(&G, 10, 9));
        assert!(!bus(&c).pixel_set(&G, 10, 5));
    }

    #[test]
    fn test_circle_on_panel() {
        let mut c = canvas();
        c.draw_circle(80, 40, 20, DrawMode::Set);

        assert!(bus(&c).pixel_set(&G, 100, 40));
        assert!(bus(&c).pixel_set(&G, 60, 40));
        assert!(bus(&c).pixel_set(&G, 80, 20));
        assert!(bus(&c).pixel_set(&G, 80, 60));
        assert!(!bus(&c).pixel_set(&G, 80, 40));
    }

    #[test]
    fn test_drawing_stays_in_graphics_layer() {
        let mut c = canvas();
        c.session_mut().initialize().unwrap();
        c.session_mut().transport_mut().bus_mut().clear_written();

        c.draw_rectangle(0, 0, 159, 79, DrawMode::Set);
        c.draw_radial_line(80, 40, 45, 5, 30, DrawMode::Set);

        let graphics = G.graphics_base as u32..G.graphics_base as u32 + G.graphics_extent();
        assert_eq!(bus(&c).writes_outside(&[graphics]), 0);
        assert_eq!(bus(&c).peek(0), b' ');
    }

    #[test]
    fn test_touch_between_pixels() {
        let mut c = canvas();
        c.session_mut()
            .transport_mut()
            .bus_mut()
            .set_touch(planar_protocol::TouchEvent { row: 1, column: 2 });

        c.set_pixel(1, 1, DrawMode::Set);
        let event = c.session_mut().touch_event();
        c.set_pixel(2, 1, DrawMode::Set);

        assert_eq!(event, Some(planar_protocol::TouchEvent { row: 1, column: 2 }));
        assert!(c.pixel(1, 1));
        assert!(c.pixel(2, 1));
        assert_eq!(bus(&c).violations(), 0);
    }

    proptest! {
        #[test]
        fn prop_read_after_write(x in 0i32..160, y in 0i32..80) {
            let mut c = canvas();
            c.set_pixel(x, y, DrawMode::Set);
            prop_assert!(c.pixel(x, y));
            c.set_pixel(x, y, DrawMode::Clear);
            prop_assert!(!c.pixel(x, y));
        }
    }
}
