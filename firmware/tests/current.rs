#![no_std]
#![no_main]

use punkto_firmware as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use punkto_control::hal::{Actuators, CurrentSensor, Monotonic};
    use punkto_control::selftest::DEFAULT_FLOOR_MA;
    use punkto_driver::{frame_for_dot, Direction};
    use punkto_firmware::system::System;

    #[init]
    fn init() -> System {
        let cp = cortex_m::Peripherals::take().unwrap();
        let dp = punkto_firmware::system::hal::pac::Peripherals::take().unwrap();

        System::init(cp, dp).unwrap()
    }

    #[test]
    fn the_actuator_rail_reports_a_plausible_bus_voltage(system: &mut System) {
        let mv = system.sensor.bus_voltage_mv();
        defmt::info!("bus voltage {} mV", mv);
        // Anything below logic level means the rail is down or the sensor
        // is miswired.
        assert!(mv > 3_000.0);
    }

    #[test]
    fn idle_bank_draws_no_current(system: &mut System) {
        Actuators::clear(&mut system.shifter);
        system.mono.sleep_ms(10);
        let ma = system.sensor.sample_ma();
        defmt::info!("idle current {} mA", ma);
        assert!(ma < DEFAULT_FLOOR_MA);
    }

    #[test]
    fn an_energized_dot_reaches_the_current_floor(system: &mut System) {
        let frame = frame_for_dot(0, Direction::Forward).unwrap();
        system.shifter.latch(&frame);

        let mut peak_ma: f32 = 0.0;
        let start_ms = system.mono.now_ms();
        while system.mono.now_ms().wrapping_sub(start_ms) < 250 {
            peak_ma = peak_ma.max(system.sensor.sample_ma());
        }
        Actuators::clear(&mut system.shifter);

        defmt::info!("dot 0 peak {} mA", peak_ma);
        assert!(peak_ma >= DEFAULT_FLOOR_MA);
    }
}
