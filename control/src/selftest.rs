//! Current-draw self-test sweep over the whole actuator bank.

use heapless::Vec;

use punkto_driver::{frame_for_dot, Direction, DOTS};

use crate::hal::{Actuators, CurrentSensor, Monotonic};
use crate::log;
use crate::sampling::{hold_and_sample, period_for_hold, CurrentStats};

/// Current floor a healthy actuator must reach in both directions.
pub const DEFAULT_FLOOR_MA: f32 = 20.0;

/// Parameters of one self-test run.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// How long each dot is energized per direction.
    pub hold_ms: u32,
    /// Current sampling cadence within one hold.
    pub log_period_ms: u32,
    /// Pass threshold on the peak sampled current.
    pub floor_ma: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_ms: 1000,
            log_period_ms: 66,
            floor_ma: DEFAULT_FLOOR_MA,
        }
    }
}

impl Config {
    /// Run configuration for a given per-direction hold, with the sampling
    /// cadence spread over the hold.
    #[must_use]
    pub fn with_hold_ms(hold_ms: u32) -> Self {
        Self {
            hold_ms,
            log_period_ms: period_for_hold(hold_ms),
            ..Self::default()
        }
    }
}

/// Outcome of probing one dot in both directions.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DotReport {
    pub dot: usize,
    pub forward: CurrentStats,
    pub reverse: CurrentStats,
    pub pass: bool,
}

/// Complete result of one sweep, one entry per dot, in probing order.
///
/// Built fresh by every run and handed to the dispatcher; nothing here is
/// persisted. A failing dot is data, not an error.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    pub dots: Vec<DotReport, DOTS>,
}

impl Report {
    pub fn passed(&self) -> impl Iterator<Item = &DotReport> {
        self.dots.iter().filter(|report| report.pass)
    }

    pub fn failed(&self) -> impl Iterator<Item = &DotReport> {
        self.dots.iter().filter(|report| !report.pass)
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.dots.iter().all(|report| report.pass)
    }
}

/// Probe every dot of the display in both directions and classify it.
///
/// Per dot: energize forward, hold while sampling, de-energize, repeat in
/// reverse, then compare both peaks against the floor. The sweep never stops
/// early, a complete report over all dots is the whole point.
pub fn run(
    actuators: &mut impl Actuators,
    sensor: &mut impl CurrentSensor,
    mono: &mut impl Monotonic,
    config: &Config,
) -> Report {
    let mut report = Report::default();

    for dot in 0..DOTS {
        let forward = probe(actuators, sensor, mono, config, dot, Direction::Forward);
        let reverse = probe(actuators, sensor, mono, config, dot, Direction::Reverse);

        let pass = forward.peak_ma() >= config.floor_ma && reverse.peak_ma() >= config.floor_ma;
        log::info!(
            "dot={} forward_peak_ma={} reverse_peak_ma={} pass={}",
            dot,
            forward.peak_ma(),
            reverse.peak_ma(),
            pass
        );

        // The report is sized for every dot of the display.
        let _ = report.dots.push(DotReport {
            dot,
            forward,
            reverse,
            pass,
        });
    }

    report
}

fn probe(
    actuators: &mut impl Actuators,
    sensor: &mut impl CurrentSensor,
    mono: &mut impl Monotonic,
    config: &Config,
    dot: usize,
    direction: Direction,
) -> CurrentStats {
    // The dot number is bounded by the sweep itself.
    let frame = frame_for_dot(dot, direction).unwrap_or_default();
    actuators.latch(&frame);
    let stats = hold_and_sample(mono, sensor, config.hold_ms, config.log_period_ms);
    actuators.clear();
    stats
}
