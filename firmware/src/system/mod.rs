//! Hardware bindings of the platform seams.

pub mod monotonic;
pub mod panel;
pub mod sensor;

pub use stm32h7xx_hal as hal;

use hal::pac::{CorePeripherals, Peripherals as DevicePeripherals};
use hal::prelude::*;

use punkto_control::sensor::{check_topology, SensorError};
use punkto_driver::ShiftRegister;

use monotonic::TickCounter;
use panel::{IndicatorPins, Panel, SwitchPins};
use sensor::Ina219;

type SerialPin = hal::gpio::gpiod::PD2<hal::gpio::Output>;
type ShiftClockPin = hal::gpio::gpiod::PD3<hal::gpio::Output>;
type NotClearPin = hal::gpio::gpiod::PD4<hal::gpio::Output>;
type LatchClockPin = hal::gpio::gpiod::PD5<hal::gpio::Output>;
type NotOutputEnablePin = hal::gpio::gpiod::PD6<hal::gpio::Output>;

pub type Shifter =
    ShiftRegister<SerialPin, ShiftClockPin, LatchClockPin, NotOutputEnablePin, NotClearPin>;
pub type Sensor = Ina219<hal::i2c::I2c<hal::pac::I2C1>>;

pub struct System {
    pub shifter: Shifter,
    pub sensor: Sensor,
    pub mono: TickCounter,
    pub panel: Panel,
}

impl System {
    /// Initialize the system abstraction.
    ///
    /// Brings the shift register chain to the known all-off state before
    /// anything else may drive it, then scans the sensor bus. An unexpected
    /// bus topology is fatal, the current thresholds of the self-test would
    /// be meaningless against an unknown sensor.
    pub fn init(_cp: CorePeripherals, dp: DevicePeripherals) -> Result<Self, SensorError> {
        let pwr = dp.PWR.constrain();
        let pwrcfg = pwr.freeze();
        let rcc = dp.RCC.constrain();
        let ccdr = rcc.sys_ck(400.MHz()).freeze(pwrcfg, &dp.SYSCFG);

        let gpiob = dp.GPIOB.split(ccdr.peripheral.GPIOB);
        let gpiod = dp.GPIOD.split(ccdr.peripheral.GPIOD);
        let gpioe = dp.GPIOE.split(ccdr.peripheral.GPIOE);

        // The chain must latch all-off before the sensor or anything else
        // gets a chance to delay that; floating registers can energize an
        // arbitrary actuator.
        let shifter = match Shifter::init(
            gpiod.pd2.into_push_pull_output(),
            gpiod.pd3.into_push_pull_output(),
            gpiod.pd5.into_push_pull_output(),
            gpiod.pd6.into_push_pull_output(),
            gpiod.pd4.into_push_pull_output(),
        ) {
            Ok(shifter) => shifter,
            Err(never) => match never {},
        };

        let mono = TickCounter::new(dp.TIM2, ccdr.peripheral.TIM2, &ccdr.clocks);

        let scl = gpiob.pb8.into_alternate().set_open_drain();
        let sda = gpiob.pb9.into_alternate().set_open_drain();
        let i2c = dp
            .I2C1
            .i2c((scl, sda), 100.kHz(), ccdr.peripheral.I2C1, &ccdr.clocks);

        let mut sensor = Ina219::new(i2c);
        let addresses = sensor.scan();
        defmt::info!("sensor bus scan found {} devices", addresses.len());
        check_topology(&addresses)?;
        sensor.calibrate_32v_2a();
        defmt::info!("actuator rail at {} mV", sensor.bus_voltage_mv());

        let panel = Panel::new(
            SwitchPins {
                raise: gpioe.pe2.into_pull_up_input(),
                lower: gpioe.pe3.into_pull_up_input(),
            },
            IndicatorPins {
                raise: gpioe.pe4.into_push_pull_output(),
                lower: gpioe.pe5.into_push_pull_output(),
            },
        );

        Ok(Self {
            shifter,
            sensor,
            mono,
            panel,
        })
    }
}
