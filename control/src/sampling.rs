//! Blocking actuation holds interleaved with current sampling.

use crate::hal::{CurrentSensor, Monotonic};
use crate::log;

/// Aggregate of current samples taken over one hold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentStats {
    pub min_ma: f32,
    pub max_ma: f32,
    sum_ma: f32,
    pub samples: u32,
}

impl CurrentStats {
    pub fn observe(&mut self, ma: f32) {
        if self.samples == 0 {
            self.min_ma = ma;
            self.max_ma = ma;
        } else {
            self.min_ma = self.min_ma.min(ma);
            self.max_ma = self.max_ma.max(ma);
        }
        self.sum_ma += ma;
        self.samples += 1;
    }

    /// Highest current seen over the hold. Zero before any sample.
    #[must_use]
    pub fn peak_ma(&self) -> f32 {
        self.max_ma
    }

    /// Fold another hold's samples into this record.
    pub fn merge(&mut self, other: &Self) {
        if other.samples == 0 {
            return;
        }
        if self.samples == 0 {
            *self = *other;
            return;
        }
        self.min_ma = self.min_ma.min(other.min_ma);
        self.max_ma = self.max_ma.max(other.max_ma);
        self.sum_ma += other.sum_ma;
        self.samples += other.samples;
    }

    #[must_use]
    pub fn mean_ma(&self) -> f32 {
        if self.samples == 0 {
            0.0
        } else {
            self.sum_ma / self.samples as f32
        }
    }
}

/// Hold the current actuator state for `hold_ms` while sampling the sensor.
///
/// The sampling itself is a tight polling loop, holds are routinely shorter
/// than any reasonable scheduler tick. After each sample the remainder of
/// the current logging period is slept away, measured from the hold's start
/// rather than from the sample, so the sample's own cost never pushes the
/// cadence. The sleep is clamped to the remaining hold budget and the
/// millisecond counter is free to wrap during the hold.
///
/// At least one sample is taken even for a zero hold.
pub fn hold_and_sample(
    mono: &mut impl Monotonic,
    sensor: &mut impl CurrentSensor,
    hold_ms: u32,
    log_period_ms: u32,
) -> CurrentStats {
    let mut stats = CurrentStats::default();
    let start_ms = mono.now_ms();

    loop {
        let ma = sensor.sample_ma();
        stats.observe(ma);

        let elapsed_ms = mono.now_ms().wrapping_sub(start_ms);
        log::info!("current_ma={} elapsed_ms={}", ma, elapsed_ms);

        if elapsed_ms >= hold_ms {
            break;
        }

        // Sleep to the next period boundary since the hold started, not a
        // full period from here, so the sample's own cost does not push the
        // cadence.
        let period_ms = log_period_ms.max(1);
        let to_boundary_ms = period_ms - elapsed_ms % period_ms;
        let remaining_ms = hold_ms - elapsed_ms;
        mono.sleep_ms(to_boundary_ms.min(remaining_ms));
    }

    stats
}

/// Logging period that spreads a fixed number of samples over a hold.
#[must_use]
pub fn period_for_hold(hold_ms: u32) -> u32 {
    (hold_ms / 15).max(1)
}
