//! INA219 shunt monitor on the actuator supply rail.

use embedded_hal::blocking::i2c::{Write, WriteRead};
use heapless::Vec;

use punkto_control::hal::CurrentSensor;
use punkto_control::sensor::SENSOR_ADDRESS;

const REGISTER_CONFIGURATION: u8 = 0x00;
const REGISTER_SHUNT_VOLTAGE: u8 = 0x01;
const REGISTER_BUS_VOLTAGE: u8 = 0x02;
const REGISTER_CALIBRATION: u8 = 0x05;

// 32 V bus range, /8 PGA, 12-bit continuous shunt and bus conversions.
const CONFIGURATION_32V_2A: u16 = 0x399F;
// Calibration matching the 32 V / 2 A full-scale range.
const CALIBRATION_32V_2A: u16 = 4096;

// Shunt voltage register LSB is 10 uV.
const SHUNT_LSB_MV: f32 = 0.01;
// Bus voltage sits in bits 15..3, 4 mV per LSB.
const BUS_LSB_MV: f32 = 4.0;

/// Minimal register-level access, just enough for the sampling glue.
pub struct Ina219<I2C> {
    i2c: I2C,
}

impl<I2C, E> Ina219<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Probe the whole 7-bit address space for acknowledging devices.
    pub fn scan(&mut self) -> Vec<u8, 16> {
        let mut addresses = Vec::new();
        for address in 0x08..=0x77 {
            if self.i2c.write(address, &[]).is_ok() {
                // The bus check only cares whether more than one device
                // answered; an overfull list would fail it anyway.
                let _ = addresses.push(address);
            }
        }
        addresses
    }

    /// Full-scale range and calibration of the reference configuration.
    pub fn calibrate_32v_2a(&mut self) {
        self.write_register(REGISTER_CALIBRATION, CALIBRATION_32V_2A);
        self.write_register(REGISTER_CONFIGURATION, CONFIGURATION_32V_2A);
    }

    pub fn bus_voltage_mv(&mut self) -> f32 {
        let raw = self.read_register(REGISTER_BUS_VOLTAGE);
        f32::from(raw >> 3) * BUS_LSB_MV
    }

    fn write_register(&mut self, register: u8, value: u16) {
        let [high, low] = value.to_be_bytes();
        // The device was verified present at startup; a nacked write here
        // leaves the previous register value in place.
        let _ = self.i2c.write(SENSOR_ADDRESS, &[register, high, low]);
    }

    fn read_register(&mut self, register: u8) -> u16 {
        let mut buffer = [0; 2];
        let _ = self
            .i2c
            .write_read(SENSOR_ADDRESS, &[register], &mut buffer);
        u16::from_be_bytes(buffer)
    }
}

impl<I2C, E> CurrentSensor for Ina219<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn shunt_voltage_mv(&mut self) -> f32 {
        let raw = self.read_register(REGISTER_SHUNT_VOLTAGE) as i16;
        f32::from(raw) * SHUNT_LSB_MV
    }
}
