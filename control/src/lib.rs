//! Behavior engine of the dot display.
//!
//! This crate composes the shift register driver into the operations the
//! firmware exposes: one-shot and cyclic dot actuation, the current-draw
//! self-test sweep, and the debounced two-button manual control path.
//!
//! Everything runs on a single thread, cooperatively: actuation holds are
//! blocking loops that interleave current sensor sampling with clamped
//! sleeps. The platform is injected through the traits of [`hal`], so the
//! whole engine runs against mocks on the host:
//!
//! ```text
//!  [ Dispatcher ]          [ Buttons ]
//!        |                      |
//!        V                      V
//!  [ Executor ]          [ ManualControl ]
//!        |                      |
//!        +----------+-----------+
//!                   V
//!      [ Actuators | CurrentSensor | Monotonic ]
//!                   |
//!            [ ShiftRegister ]
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod command;
pub mod hal;
pub mod manual;
pub mod sampling;
pub mod selftest;
pub mod sensor;

mod log;

#[cfg(test)]
mod testlib;
