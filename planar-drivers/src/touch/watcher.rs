//! Touch interrupt line watcher
//!
//! The panel pulls its touch line low while pressed. The watcher waits for
//! that level, then takes exactly one self-contained sample. Because the
//! trigger is level-based, a held press yields a fresh sample on every call.
//!
//! The driver is shared with the drawing code through an
//! [`embassy_sync::mutex::Mutex`]. The watcher only locks it once the line
//! has fired, so drawing carries on while no one is touching the panel and
//! a press holds the bus for a single sample.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::digital::Wait;
use planar_core::state::TouchMachine;
use planar_protocol::TouchEvent;

use super::{TouchDispatcher, TouchSource};

/// Waits on the touch line and decodes one sample per trigger
pub struct TouchWatcher<I> {
    irq: I,
    machine: TouchMachine,
}

impl<I: Wait> TouchWatcher<I> {
    /// Watch the given touch line
    pub fn new(irq: I) -> Self {
        Self {
            irq,
            machine: TouchMachine::new(),
        }
    }

    /// Wait for the touch line to go low
    ///
    /// Does not touch the bus. Follow with [`TouchWatcher::sample`].
    pub async fn wait(&mut self) -> Result<(), I::Error> {
        self.irq.wait_for_low().await?;
        // Already Sampling if the previous wait was never sampled
        self.machine.trigger();
        Ok(())
    }

    /// Take and decode one sample
    ///
    /// Returns `None` for a release or a rejected noisy sample.
    pub fn sample<S: TouchSource + ?Sized>(&mut self, source: &mut S) -> Option<TouchEvent> {
        self.machine.trigger();
        let sample = source.sample_touch();
        self.machine.complete(sample)
    }

    /// Wait for the touch line, then lock the driver and sample once
    pub async fn next<M, S>(&mut self, shared: &Mutex<M, S>) -> Result<Option<TouchEvent>, I::Error>
    where
        M: RawMutex,
        S: TouchSource + ?Sized,
    {
        self.wait().await?;
        let mut source = shared.lock().await;
        Ok(self.sample(&mut *source))
    }

    /// Sample forever, publishing every decoded press
    ///
    /// Only returns if the touch line reports an error.
    pub async fn run<MS, S, M, const N: usize>(
        &mut self,
        shared: &Mutex<MS, S>,
        dispatcher: &mut TouchDispatcher<'_, M, N>,
    ) -> Result<Infallible, I::Error>
    where
        MS: RawMutex,
        S: TouchSource + ?Sized,
        M: RawMutex,
    {
        loop {
            if let Some(event) = self.next(shared).await? {
                #[cfg(feature = "defmt")]
                defmt::debug!("touch row {} col {}", event.row, event.column);
                dispatcher.publish(event);
            }
        }
    }

    /// Decode state and counters
    pub fn machine(&self) -> &TouchMachine {
        &self.machine
    }

    /// Give back the touch line
    pub fn release(self) -> I {
        self.irq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockController, MockDelay};
    use crate::sed1330::{Canvas, Sed1330};
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use planar_core::config::PanelGeometry;
    use planar_core::draw::DrawMode;
    use planar_core::state::TouchState;
    use planar_core::traits::Primitives;
    use planar_hal::{NoMask, ParallelBus};
    use planar_protocol::TouchSample;

    #[derive(Debug)]
    struct LineGone;

    impl embedded_hal::digital::Error for LineGone {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Touch line that fires a fixed number of times, then fails
    ///
    /// Each wait yields once before firing, so other tasks get a turn.
    struct MockLine {
        remaining: u32,
        waits: u32,
    }

    impl MockLine {
        fn firing(times: u32) -> Self {
            Self {
                remaining: times,
                waits: 0,
            }
        }

        async fn fire(&mut self) -> Result<(), LineGone> {
            embassy_futures::yield_now().await;
            self.waits += 1;
            if self.remaining == 0 {
                return Err(LineGone);
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    impl ErrorType for MockLine {
        type Error = LineGone;
    }

    impl Wait for MockLine {
        async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
            self.fire().await
        }

        async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
            self.fire().await
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
            self.fire().await
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
            self.fire().await
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
            self.fire().await
        }
    }

    /// Replays a fixed list of samples
    struct Script<'a> {
        samples: &'a [TouchSample],
        taken: usize,
    }

    impl TouchSource for Script<'_> {
        fn sample_touch(&mut self) -> TouchSample {
            let sample = self
                .samples
                .get(self.taken)
                .copied()
                .unwrap_or(TouchSample::released());
            self.taken += 1;
            sample
        }
    }

    fn script(samples: &[TouchSample]) -> Mutex<NoopRawMutex, Script<'_>> {
        Mutex::new(Script { samples, taken: 0 })
    }

    type SharedCanvas = Mutex<NoopRawMutex, Canvas<MockController, MockDelay, NoMask>>;

    fn shared_canvas(press: TouchEvent) -> SharedCanvas {
        let session =
            Sed1330::new(MockController::new(), MockDelay::new(), PanelGeometry::EL160_80).unwrap();
        let mut canvas = Canvas::new(session, NoMask);
        canvas.session_mut().transport_mut().bus_mut().idle();
        canvas
            .session_mut()
            .transport_mut()
            .bus_mut()
            .set_touch(press);
        Mutex::new(canvas)
    }

    #[test]
    fn test_one_sample_per_trigger() {
        let samples = [TouchSample::new(0x02, 0x04)];
        let shared = script(&samples);
        let mut watcher = TouchWatcher::new(MockLine::firing(1));

        let event = block_on(watcher.next(&shared)).unwrap();
        assert_eq!(event, Some(TouchEvent { row: 3, column: 2 }));
        assert_eq!(shared.into_inner().taken, 1);
        assert_eq!(watcher.machine().state(), TouchState::Idle);
    }

    #[test]
    fn test_line_error_propagates() {
        let shared = script(&[]);
        let mut watcher = TouchWatcher::new(MockLine::firing(0));

        assert!(block_on(watcher.next(&shared)).is_err());
        assert_eq!(shared.into_inner().taken, 0);
    }

    #[test]
    fn test_unsampled_wait_leaves_next_sample_clean() {
        let samples = [TouchSample::new(0x04, 0x02)];
        let mut source = Script {
            samples: &samples,
            taken: 0,
        };
        let mut watcher = TouchWatcher::new(MockLine::firing(2));

        block_on(watcher.wait()).unwrap();
        assert_eq!(watcher.machine().state(), TouchState::Sampling);
        block_on(watcher.wait()).unwrap();
        assert_eq!(watcher.machine().state(), TouchState::Sampling);

        assert_eq!(
            watcher.sample(&mut source),
            Some(TouchEvent { row: 2, column: 3 })
        );
        assert_eq!(watcher.machine().state(), TouchState::Idle);
        assert_eq!(source.taken, 1);
    }

    #[test]
    fn test_run_publishes_clean_presses() {
        let samples = [
            TouchSample::new(0x01, 0x01),
            TouchSample::released(),
            TouchSample::new(0x03, 0x01),
            TouchSample::new(0x20, 0x04),
        ];
        let shared = script(&samples);
        let channel: Channel<NoopRawMutex, TouchEvent, 4> = Channel::new();
        let mut dispatcher = TouchDispatcher::new(channel.sender());
        let mut watcher = TouchWatcher::new(MockLine::firing(4));

        assert!(block_on(watcher.run(&shared, &mut dispatcher)).is_err());

        assert_eq!(
            channel.try_receive().ok(),
            Some(TouchEvent { row: 1, column: 1 })
        );
        assert_eq!(
            channel.try_receive().ok(),
            Some(TouchEvent { row: 3, column: 6 })
        );
        assert!(channel.try_receive().is_err());
        assert_eq!(watcher.machine().faults(), 1);
        assert_eq!(shared.into_inner().taken, 4);
        assert_eq!(watcher.release().waits, 5);
    }

    #[test]
    fn test_drawing_between_triggers() {
        let press = TouchEvent { row: 2, column: 5 };
        let shared = shared_canvas(press);
        let mut watcher = TouchWatcher::new(MockLine::firing(2));

        assert_eq!(block_on(watcher.next(&shared)).unwrap(), Some(press));

        block_on(async {
            let mut canvas = shared.lock().await;
            canvas.draw_line(0, 0, 15, 0, DrawMode::Set);
        });

        assert_eq!(block_on(watcher.next(&shared)).unwrap(), Some(press));

        let mut canvas = shared.into_inner();
        assert!((0..=15).all(|x| canvas.pixel(x, 0)));
        assert!(!canvas.pixel(16, 0));
        assert_eq!(canvas.session().transport().bus().violations(), 0);
    }

    #[test]
    fn test_drawing_proceeds_while_watcher_waits() {
        let press = TouchEvent { row: 1, column: 4 };
        let shared = shared_canvas(press);
        let mut watcher = TouchWatcher::new(MockLine::firing(2));

        // The watcher is polled first and parks on the line; the drawing
        // task must still get the lock
        let (events, ()) = block_on(join(
            async {
                let first = watcher.next(&shared).await;
                let second = watcher.next(&shared).await;
                (first.ok().flatten(), second.ok().flatten())
            },
            async {
                let mut canvas = shared.lock().await;
                canvas.draw_rectangle(10, 10, 20, 20, DrawMode::Set);
            },
        ));

        assert_eq!(events, (Some(press), Some(press)));

        let mut canvas = shared.into_inner();
        assert!(canvas.pixel(10, 10));
        assert!(canvas.pixel(20, 20));
        assert!(!canvas.pixel(15, 15));
        assert_eq!(canvas.session().transport().bus().violations(), 0);
    }
}
