//! Touch matrix input
//!
//! ```text
//! touch line ──▶ TouchWatcher ──▶ TouchSource::sample_touch ──▶ TouchMachine
//!                                                                   │
//!                      application ◀── Channel ◀── TouchDispatcher ◀┘
//! ```

mod dispatch;
mod sampler;
mod watcher;

pub use dispatch::TouchDispatcher;
pub use sampler::sample_matrix;
pub use watcher::TouchWatcher;

use embedded_hal::delay::DelayNs;
use planar_hal::{ParallelBus, TouchMask};
use planar_protocol::TouchSample;

use crate::sed1330::{Canvas, Sed1330, Transport};

/// Something that can take one touch matrix sample
pub trait TouchSource {
    /// Take a sample; bus state is left as found
    fn sample_touch(&mut self) -> TouchSample;
}

impl<T: TouchSource + ?Sized> TouchSource for &mut T {
    fn sample_touch(&mut self) -> TouchSample {
        (**self).sample_touch()
    }
}

impl<B: ParallelBus, D: DelayNs> TouchSource for Transport<B, D> {
    fn sample_touch(&mut self) -> TouchSample {
        self.read_touch()
    }
}

impl<B: ParallelBus, D: DelayNs> TouchSource for Sed1330<B, D> {
    fn sample_touch(&mut self) -> TouchSample {
        self.transport_mut().read_touch()
    }
}

impl<B: ParallelBus, D: DelayNs, M: TouchMask> TouchSource for Canvas<B, D, M> {
    fn sample_touch(&mut self) -> TouchSample {
        self.session_mut().transport_mut().read_touch()
    }
}
