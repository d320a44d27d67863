//! Touch interrupt masking
//!
//! The touch interrupt handler samples the panel over the same data bus the
//! drawing code uses. A multi-step transaction (read a display byte, then
//! write it back) must not be split by a touch sample, so callers hold a
//! [`MaskGuard`] for the duration of such a transaction.

/// Masking control for the touch interrupt
pub trait TouchMask {
    /// Mask the touch interrupt
    ///
    /// Returns whether it was enabled before the call.
    fn disable(&mut self) -> bool;

    /// Restore the enable state returned by a previous [`TouchMask::disable`]
    fn restore(&mut self, was_enabled: bool);
}

/// Mask for setups where the touch path cannot preempt drawing
///
/// Use this when the panel is polled, or when touch handling runs as a task
/// on a cooperative executor that shares the driver through a mutex.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMask;

impl TouchMask for NoMask {
    fn disable(&mut self) -> bool {
        false
    }

    fn restore(&mut self, _was_enabled: bool) {}
}

impl<M: TouchMask + ?Sized> TouchMask for &mut M {
    fn disable(&mut self) -> bool {
        (**self).disable()
    }

    fn restore(&mut self, was_enabled: bool) {
        (**self).restore(was_enabled)
    }
}

/// Scoped touch-interrupt mask
///
/// Masks on construction and restores the previous state when dropped, on
/// every exit path.
pub struct MaskGuard<'a, M: TouchMask + ?Sized> {
    mask: &'a mut M,
    was_enabled: bool,
}

impl<'a, M: TouchMask + ?Sized> MaskGuard<'a, M> {
    /// Mask the touch interrupt until the guard is dropped
    pub fn new(mask: &'a mut M) -> Self {
        let was_enabled = mask.disable();
        Self { mask, was_enabled }
    }

    /// Whether the interrupt was enabled when the guard was taken
    pub fn was_enabled(&self) -> bool {
        self.was_enabled
    }
}

impl<M: TouchMask + ?Sized> Drop for MaskGuard<'_, M> {
    fn drop(&mut self) {
        self.mask.restore(self.was_enabled);
    }
}
