//! Touch matrix bus sampling
//!
//! With A1 high the data bus carries the touch sense lines instead of the
//! controller: A0 low selects the six columns, A0 high the three rows. Both
//! axes are read under one /RD pulse; switching A0 mid-pulse avoids a second
//! strobe.

use embedded_hal::delay::DelayNs;
use planar_hal::{BusDirection, ControlLine, ParallelBus};
use planar_protocol::TouchSample;

/// Read both touch axes in one self-contained transaction
///
/// The A0/A1 levels and the data direction found on entry are restored on
/// return, so this may run between two single-cycle operations of the
/// drawing path. It must not run inside a multi-cycle one.
pub fn sample_matrix<B, D>(bus: &mut B, delay: &mut D, strobe_delay_us: u32) -> TouchSample
where
    B: ParallelBus + ?Sized,
    D: DelayNs + ?Sized,
{
    let saved_a0 = bus.line(ControlLine::A0);
    let saved_a1 = bus.line(ControlLine::A1);
    let saved_direction = bus.direction();

    bus.set_high(ControlLine::A1);
    bus.set_low(ControlLine::A0);
    bus.set_direction(BusDirection::Input);

    delay.delay_us(strobe_delay_us);
    bus.set_low(ControlLine::Read);
    delay.delay_us(strobe_delay_us);
    let columns = bus.read_data();

    bus.set_high(ControlLine::A0);
    delay.delay_us(strobe_delay_us);
    let rows = bus.read_data();
    delay.delay_us(strobe_delay_us);

    bus.set_high(ControlLine::Read);

    bus.set_line(ControlLine::A1, saved_a1);
    bus.set_line(ControlLine::A0, saved_a0);
    bus.set_direction(saved_direction);

    TouchSample::new(columns, rows)
}
