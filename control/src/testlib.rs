//! Mocks of the platform seams, shared by the engine's tests.

use std::vec::Vec;

use punkto_driver::{Frame, DOTS};

use crate::hal::{Actuators, Button, CurrentSensor, Monotonic, Panel};

/// Records every latch and clear, and keeps the currently applied frame.
#[derive(Default)]
pub struct MockActuators {
    pub latched: Vec<Frame>,
    pub clears: usize,
    pub current: Option<Frame>,
}

impl Actuators for MockActuators {
    fn latch(&mut self, frame: &Frame) {
        self.latched.push(*frame);
        self.current = Some(*frame);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.current = None;
    }
}

/// Always reads the same current.
pub struct MockSensor {
    ma: f32,
}

impl MockSensor {
    pub fn steady_ma(ma: f32) -> Self {
        Self { ma }
    }
}

impl CurrentSensor for MockSensor {
    fn shunt_voltage_mv(&mut self) -> f32 {
        self.ma * crate::sensor::SHUNT_OHMS
    }
}

/// Returns a fixed reading per actuation hold.
///
/// The self-test probes dots in order, two holds each, so the weak dot's
/// readings sit at hold positions `2 * dot` and `2 * dot + 1`. The caller
/// states how many samples one hold takes under the virtual clock.
pub struct PerHoldSensor {
    holds: Vec<f32>,
    samples_per_hold: usize,
    taken: usize,
}

impl PerHoldSensor {
    pub fn weak_dot(dot: usize, healthy_ma: f32, weak_ma: f32, samples_per_hold: usize) -> Self {
        let mut holds = vec![healthy_ma; 2 * DOTS];
        holds[2 * dot] = weak_ma;
        holds[2 * dot + 1] = weak_ma;
        Self {
            holds,
            samples_per_hold,
            taken: 0,
        }
    }

    /// Weak in the forward hold only, healthy in reverse.
    pub fn weak_direction(
        dot: usize,
        healthy_ma: f32,
        weak_ma: f32,
        samples_per_hold: usize,
    ) -> Self {
        let mut sensor = Self::weak_dot(dot, healthy_ma, weak_ma, samples_per_hold);
        sensor.holds[2 * dot + 1] = healthy_ma;
        sensor
    }
}

impl CurrentSensor for PerHoldSensor {
    fn shunt_voltage_mv(&mut self) -> f32 {
        let position = (self.taken / self.samples_per_hold).min(self.holds.len() - 1);
        self.taken += 1;
        self.holds[position] * crate::sensor::SHUNT_OHMS
    }
}

/// Virtual clock: time only passes while sleeping.
#[derive(Default)]
pub struct MockMono {
    now_ms: u32,
    pub slept_ms: u32,
}

impl MockMono {
    pub fn starting_at(now_ms: u32) -> Self {
        Self {
            now_ms,
            slept_ms: 0,
        }
    }
}

impl Monotonic for MockMono {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
        self.slept_ms += ms;
    }
}

/// Scripted button levels and recorded indicator writes.
#[derive(Default)]
pub struct MockPanel {
    pub raise_pressed: bool,
    pub lower_pressed: bool,
    pub indicator_log: Vec<(Button, bool)>,
}

impl Panel for MockPanel {
    fn pressed(&self, button: Button) -> bool {
        match button {
            Button::Raise => self.raise_pressed,
            Button::Lower => self.lower_pressed,
        }
    }

    fn set_indicator(&mut self, button: Button, on: bool) {
        self.indicator_log.push((button, on));
    }
}
