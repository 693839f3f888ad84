#![no_main]
#![no_std]

use punkto_firmware as _; // global logger + panicking-behavior

use cortex_m_rt::entry;

use punkto_control::command::{Command, Executor, Outcome};
use punkto_control::manual::{self, ManualControl};
use punkto_firmware::system::System;

#[entry]
fn main() -> ! {
    defmt::info!("INIT");

    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = punkto_firmware::system::hal::pac::Peripherals::take().unwrap();

    let system = match System::init(cp, dp) {
        Ok(system) => system,
        Err(error) => defmt::panic!("sensor bus: {}", error),
    };
    let System {
        shifter,
        sensor,
        mono,
        mut panel,
    } = system;

    let mut executor = Executor::new(shifter, sensor, mono);
    match executor.execute(Command::Initialize) {
        Ok(_) => defmt::info!("INIT COMPLETE"),
        Err(error) => defmt::panic!("initialize: {}", error),
    }

    // Boot diagnostic sweep. Failing dots are reported, not fatal.
    match executor.execute(Command::RunSelfTest {
        duration_per_dot_ms: 250,
    }) {
        Ok(Outcome::SelfTest(report)) => {
            defmt::info!(
                "self test: {} passed, {} failed",
                report.passed().count(),
                report.failed().count()
            );
            for failed in report.failed() {
                defmt::warn!(
                    "dot {} below floor: forward {} mA, reverse {} mA",
                    failed.dot,
                    failed.forward.peak_ma(),
                    failed.reverse.peak_ma()
                );
            }
        }
        _ => defmt::panic!("self test did not produce a report"),
    }

    let (mut shifter, mut sensor, mut mono) = executor.into_parts();
    let config = manual::Config::default();
    let mut manual = ManualControl::default();

    loop {
        manual.poll(&mut panel, &mut shifter, &mut sensor, &mut mono, &config);
    }
}
