//! Millisecond wall clock over a free-running 32-bit timer.

use super::hal;
use hal::prelude::*;
use hal::rcc::{rec, CoreClocks};
use hal::timer::Timer;

use punkto_control::hal::Monotonic;

/// TIM2 ticking at 1 kHz, read as a wrapping millisecond counter.
pub struct TickCounter {
    timer: Timer<hal::pac::TIM2>,
}

impl TickCounter {
    pub fn new(tim: hal::pac::TIM2, prec: rec::Tim2, clocks: &CoreClocks) -> Self {
        let timer = tim.tick_timer(1.kHz(), prec, clocks);
        Self { timer }
    }
}

impl Monotonic for TickCounter {
    fn now_ms(&self) -> u32 {
        self.timer.counter()
    }

    /// Busy wait, the control flow is cooperative and nothing else needs
    /// the core while an actuation hold sleeps.
    fn sleep_ms(&mut self, ms: u32) {
        let start_ms = self.now_ms();
        while self.now_ms().wrapping_sub(start_ms) < ms {
            cortex_m::asm::nop();
        }
    }
}
