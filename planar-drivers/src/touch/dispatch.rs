//! Touch event delivery
//!
//! Decoded presses cross from the touch path to the application through an
//! embassy-sync channel. Publishing never blocks: when the consumer falls
//! behind, the newest event is dropped.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use planar_protocol::TouchEvent;

/// Non-blocking producer side of the touch event channel
pub struct TouchDispatcher<'a, M: RawMutex, const N: usize> {
    sender: Sender<'a, M, TouchEvent, N>,
    dropped: u32,
}

impl<'a, M: RawMutex, const N: usize> TouchDispatcher<'a, M, N> {
    /// Wrap a channel sender
    pub fn new(sender: Sender<'a, M, TouchEvent, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Queue an event
    ///
    /// Returns false if the channel was full and the event was dropped.
    pub fn publish(&mut self, event: TouchEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("touch channel full, dropped {}", event);
                false
            }
        }
    }

    /// Events dropped because the channel was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    #[test]
    fn test_publish_and_receive() {
        let channel: Channel<NoopRawMutex, TouchEvent, 2> = Channel::new();
        let mut dispatcher = TouchDispatcher::new(channel.sender());

        let event = TouchEvent { row: 1, column: 6 };
        assert!(dispatcher.publish(event));
        assert_eq!(channel.try_receive().ok(), Some(event));
    }

    #[test]
    fn test_full_channel_drops() {
        let channel: Channel<NoopRawMutex, TouchEvent, 2> = Channel::new();
        let mut dispatcher = TouchDispatcher::new(channel.sender());

        assert!(dispatcher.publish(TouchEvent { row: 1, column: 1 }));
        assert!(dispatcher.publish(TouchEvent { row: 1, column: 2 }));
        assert!(!dispatcher.publish(TouchEvent { row: 1, column: 3 }));
        assert_eq!(dispatcher.dropped(), 1);

        // Oldest events survive
        assert_eq!(
            channel.try_receive().ok(),
            Some(TouchEvent { row: 1, column: 1 })
        );
        assert_eq!(
            channel.try_receive().ok(),
            Some(TouchEvent { row: 1, column: 2 })
        );
        assert!(channel.try_receive().is_err());
    }
}
