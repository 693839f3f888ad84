//! Debounced two-button manual control of the whole display.
//!
//! One button pushes every dot up, the other pulls every dot down. A press
//! fires a single short actuation pulse and then holds the trigger disarmed
//! through a cooldown, so a bouncing switch cannot re-fire.

use punkto_driver::{frame_for_all, Direction};

use crate::hal::{Actuators, Button, CurrentSensor, Monotonic, Panel};
use crate::log;
use crate::sampling::{hold_and_sample, period_for_hold, CurrentStats};

/// Timing of the manual actuation path.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// How long the pulse energizes the display.
    pub pulse_ms: u32,
    /// How long new triggers stay rejected after the pulse.
    pub cooldown_ms: u32,
}

impl Default for Config {
    /// The coarse variant. See [`Config::short_pulse`] for the snappy one.
    fn default() -> Self {
        Self {
            pulse_ms: 250,
            cooldown_ms: 650,
        }
    }
}

impl Config {
    /// Timing-sensitive variant: a near-instant kick of the actuators.
    #[must_use]
    pub fn short_pulse() -> Self {
        Self {
            pulse_ms: 1,
            cooldown_ms: 400,
        }
    }
}

/// Majority-vote settle filter with edge detection over one button.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct DebouncedButton<const N: usize> {
    buffer: [bool; N],
    pointer: usize,
    active: bool,
    clicked: bool,
}

impl<const N: usize> Default for DebouncedButton<N> {
    fn default() -> Self {
        Self {
            buffer: [false; N],
            pointer: 0,
            active: false,
            clicked: false,
        }
    }
}

impl<const N: usize> DebouncedButton<N> {
    fn update(&mut self, down: bool) {
        self.buffer[self.pointer] = down;
        self.pointer = (self.pointer + 1) % N;

        let was_active = self.active;
        let down_votes = self.buffer.iter().filter(|vote| **vote).count();
        self.active = down_votes > N / 2;
        self.clicked = !was_active && self.active;
    }
}

/// What one poll of the manual path did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Idle,
    Pulsed(Direction),
}

/// The manual control loop's state across polls.
#[derive(Debug, Default)]
pub struct ManualControl {
    raise: DebouncedButton<4>,
    lower: DebouncedButton<4>,
}

impl ManualControl {
    /// Sample both buttons and fire a pulse on a settled press edge.
    ///
    /// A pulse energizes all cells uniformly in the pressed button's
    /// direction, holds for the pulse duration while sampling the current
    /// sensor, clears back to high-Z and then blocks through the cooldown
    /// with the indicator lit. Both buttons down at once is not a trigger,
    /// neither branch fires.
    pub fn poll(
        &mut self,
        panel: &mut impl Panel,
        actuators: &mut impl Actuators,
        sensor: &mut impl CurrentSensor,
        mono: &mut impl Monotonic,
        config: &Config,
    ) -> Event {
        self.raise.update(panel.pressed(Button::Raise));
        self.lower.update(panel.pressed(Button::Lower));

        if self.raise.active && self.lower.active {
            return Event::Idle;
        }

        let (button, direction) = if self.raise.clicked {
            (Button::Raise, Direction::Forward)
        } else if self.lower.clicked {
            (Button::Lower, Direction::Reverse)
        } else {
            return Event::Idle;
        };

        log::info!("manual pulse for {} ms", config.pulse_ms);
        panel.set_indicator(button, true);

        let stats = pulse(actuators, sensor, mono, direction, config);
        log::info!("manual pulse peak_ma={}", stats.peak_ma());

        mono.sleep_ms(config.cooldown_ms);
        panel.set_indicator(button, false);

        Event::Pulsed(direction)
    }
}

fn pulse(
    actuators: &mut impl Actuators,
    sensor: &mut impl CurrentSensor,
    mono: &mut impl Monotonic,
    direction: Direction,
    config: &Config,
) -> CurrentStats {
    let frame = frame_for_all(direction);
    actuators.latch(&frame);
    let stats = hold_and_sample(mono, sensor, config.pulse_ms, period_for_hold(config.pulse_ms));
    actuators.clear();
    stats
}
