//! Touch sampling state machine
//!
//! ```text
//!            trigger()
//!   Idle ──────────────▶ Sampling
//!    ▲                      │
//!    └──────────────────────┘
//!          complete(sample)
//! ```
//!
//! A trigger that arrives while a sample is already in flight is ignored.

use planar_protocol::{DecodeFault, TouchEvent, TouchSample};

/// Sampler states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchState {
    /// No sample pending
    #[default]
    Idle,
    /// Touch line signalled; a bus sample is being taken
    Sampling,
}

/// Tracks one touch sample at a time and its outcome
#[derive(Debug, Clone, Default)]
pub struct TouchMachine {
    state: TouchState,
    last_event: Option<TouchEvent>,
    faults: u32,
}

impl TouchMachine {
    /// Create a new machine in [`TouchState::Idle`]
    pub const fn new() -> Self {
        Self {
            state: TouchState::Idle,
            last_event: None,
            faults: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Touch line signalled
    ///
    /// Returns true if the caller should take a sample now.
    pub fn trigger(&mut self) -> bool {
        match self.state {
            TouchState::Idle => {
                self.state = TouchState::Sampling;
                true
            }
            TouchState::Sampling => false,
        }
    }

    /// Finish the pending sample and decode it
    ///
    /// Decode faults count towards [`TouchMachine::faults`] and yield
    /// `None`, the same as a release.
    pub fn complete(&mut self, sample: TouchSample) -> Option<TouchEvent> {
        self.state = TouchState::Idle;

        match sample.decode() {
            Ok(event) => {
                self.last_event = Some(event);
                Some(event)
            }
            Err(DecodeFault::Released) => None,
            Err(_fault) => {
                self.faults = self.faults.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("touch decode fault: {} ({})", _fault, sample);
                None
            }
        }
    }

    /// Most recent successfully decoded press
    pub fn last_event(&self) -> Option<TouchEvent> {
        self.last_event
    }

    /// Samples rejected as noise since creation
    pub fn faults(&self) -> u32 {
        self.faults
    }
}
