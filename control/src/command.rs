//! The command surface exposed to the dispatcher.
//!
//! The dispatcher (a REPL, a serial protocol, whatever sits above) speaks a
//! closed grammar: one tagged variant per operation, nothing free-form.
//! Validation happens before any hardware side effect; results come back as
//! data and their textual rendering is the dispatcher's business.

use punkto_driver::{frame_for_dot, AddressError, Direction, Frame};

use crate::hal::{Actuators, CurrentSensor, Monotonic};
use crate::log;
use crate::sampling::{hold_and_sample, period_for_hold, CurrentStats};
use crate::selftest;
use crate::sensor::SensorError;

/// One operation requested by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Force the known all-off state.
    Initialize,
    /// Drive one dot for a while, then release it.
    SetDot {
        dot: usize,
        direction: Direction,
        duration_ms: u32,
    },
    /// Drive one dot repeatedly with pauses in between.
    CycleDot {
        dot: usize,
        duration_ms: u32,
        count: u32,
        pause_ms: u32,
    },
    /// Drive the whole display uniformly, then release and pause.
    SetAll {
        direction: Direction,
        duration_ms: u32,
        pause_ms: u32,
    },
    /// Sweep the current-draw self-test over all dots.
    RunSelfTest { duration_per_dot_ms: u32 },
}

/// Successful result of a command.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Done,
    /// Current drawn over the actuation hold(s).
    Measured(CurrentStats),
    SelfTest(selftest::Report),
}

/// Typed failure of a command. Nothing here retries on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidDot(usize),
    InvalidCell(usize),
    Sensor(SensorError),
}

impl From<AddressError> for Error {
    fn from(error: AddressError) -> Self {
        match error {
            AddressError::InvalidDot(dot) => Self::InvalidDot(dot),
            AddressError::InvalidCell(cell) => Self::InvalidCell(cell),
        }
    }
}

impl From<SensorError> for Error {
    fn from(error: SensorError) -> Self {
        Self::Sensor(error)
    }
}

/// Executes commands against the injected platform.
///
/// Owns the actuators, the current sensor and the clock for the process
/// lifetime; no global handles anywhere. Strictly one command at a time,
/// each one blocking until its actuation completes.
pub struct Executor<A, S, M> {
    actuators: A,
    sensor: S,
    mono: M,
}

impl<A, S, M> Executor<A, S, M>
where
    A: Actuators,
    S: CurrentSensor,
    M: Monotonic,
{
    pub fn new(actuators: A, sensor: S, mono: M) -> Self {
        Self {
            actuators,
            sensor,
            mono,
        }
    }

    /// Give the platform back, for flows that bypass the command surface.
    pub fn into_parts(self) -> (A, S, M) {
        (self.actuators, self.sensor, self.mono)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, Error> {
        match command {
            Command::Initialize => {
                self.actuators.clear();
                Ok(Outcome::Done)
            }
            Command::SetDot {
                dot,
                direction,
                duration_ms,
            } => {
                let frame = frame_for_dot(dot, direction)?;
                Ok(Outcome::Measured(self.hold(&frame, duration_ms)))
            }
            Command::CycleDot {
                dot,
                duration_ms,
                count,
                pause_ms,
            } => {
                // Validate once, before the first pulse fires.
                let raise = frame_for_dot(dot, Direction::Forward)?;
                let lower = frame_for_dot(dot, Direction::Reverse)?;
                let mut stats = CurrentStats::default();
                for cycle in 0..count {
                    log::info!("cycle {}/{}", cycle + 1, count);
                    // A bistable dot cycles by alternating directions.
                    let frame = if cycle % 2 == 0 { &raise } else { &lower };
                    stats.merge(&self.hold(frame, duration_ms));
                    if cycle + 1 < count {
                        self.mono.sleep_ms(pause_ms);
                    }
                }
                Ok(Outcome::Measured(stats))
            }
            Command::SetAll {
                direction,
                duration_ms,
                pause_ms,
            } => {
                let frame = punkto_driver::frame_for_all(direction);
                let stats = self.hold(&frame, duration_ms);
                self.mono.sleep_ms(pause_ms);
                Ok(Outcome::Measured(stats))
            }
            Command::RunSelfTest {
                duration_per_dot_ms,
            } => {
                let config = selftest::Config::with_hold_ms(duration_per_dot_ms);
                let report = selftest::run(
                    &mut self.actuators,
                    &mut self.sensor,
                    &mut self.mono,
                    &config,
                );
                Ok(Outcome::SelfTest(report))
            }
        }
    }

    fn hold(&mut self, frame: &Frame, duration_ms: u32) -> CurrentStats {
        self.actuators.latch(frame);
        let stats = hold_and_sample(
            &mut self.mono,
            &mut self.sensor,
            duration_ms,
            period_for_hold(duration_ms),
        );
        self.actuators.clear();
        stats
    }
}
