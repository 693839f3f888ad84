//! Platform seams the engine runs against.
//!
//! The engine never talks to GPIO, I2C or timers directly. It is generic
//! over these traits, implemented by the firmware crate on real hardware
//! and by mocks in tests. All of them are synchronous and effectively
//! immediate, that is the platform's contract.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;
use punkto_driver::{Frame, ShiftRegister};

use crate::sensor::SHUNT_OHMS;

/// The actuator bank behind the shift register chain.
///
/// Single-writer: exactly one logical flow calls into this at a time,
/// guaranteed by the single-threaded model. A `latch` is atomic with
/// respect to any other call, no intermediate state is observable.
pub trait Actuators {
    /// Serialize the frame and latch it onto the outputs.
    fn latch(&mut self, frame: &Frame);

    /// De-energize the whole bank, fast.
    fn clear(&mut self);
}

impl<Ser, Srck, Rclk, Oe, Srclr> Actuators for ShiftRegister<Ser, Srck, Rclk, Oe, Srclr>
where
    Ser: OutputPin<Error = Infallible>,
    Srck: OutputPin<Error = Infallible>,
    Rclk: OutputPin<Error = Infallible>,
    Oe: OutputPin<Error = Infallible>,
    Srclr: OutputPin<Error = Infallible>,
{
    fn latch(&mut self, frame: &Frame) {
        self.latch_frame(frame).unwrap_or_else(|never| match never {})
    }

    fn clear(&mut self) {
        ShiftRegister::clear(self).unwrap_or_else(|never| match never {})
    }
}

/// Shunt-based current sensor on the actuator supply rail.
pub trait CurrentSensor {
    /// Voltage across the shunt resistor, in millivolts.
    fn shunt_voltage_mv(&mut self) -> f32;

    /// One current sample in milliamps, derived through the fixed shunt.
    fn sample_ma(&mut self) -> f32 {
        self.shunt_voltage_mv() / SHUNT_OHMS
    }
}

/// Monotonic wall clock with millisecond granularity.
///
/// The counter wraps; all elapsed-time arithmetic goes through
/// `wrapping_sub` of the caller.
pub trait Monotonic {
    fn now_ms(&self) -> u32;

    /// Block for the given duration. Cooperative, nothing preempts it.
    fn sleep_ms(&mut self, ms: u32);
}

/// One of the two momentary switches of the manual control path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Raise,
    Lower,
}

/// The two buttons and their indicator LEDs.
pub trait Panel {
    /// Whether the button is held down right now. Active-low wiring is the
    /// implementor's business, `true` always means pressed.
    fn pressed(&self, button: Button) -> bool;

    fn set_indicator(&mut self, button: Button, on: bool);
}
