//! Conversion and bus topology checks of the current sensor.

/// Resistance of the shunt the sensor measures across, in ohms.
pub const SHUNT_OHMS: f32 = 0.3;

/// Expected bus address of the sensor.
pub const SENSOR_ADDRESS: u8 = 0x40;

/// The sensor bus does not look like the one the thresholds were tuned for.
///
/// This aborts initialization. A misconfigured or shadowed sensor would not
/// fail loudly on its own, it would silently invalidate every self-test
/// current threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered at the expected address.
    NotFound,
    /// The expected device is there, but it is not alone on the bus.
    UnexpectedDevices { count: usize },
}

/// Shunt voltage in millivolts to current in milliamps.
#[must_use]
pub fn milliamps(shunt_mv: f32) -> f32 {
    shunt_mv / SHUNT_OHMS
}

/// Check that a bus scan found exactly the one expected sensor.
pub fn check_topology(addresses: &[u8]) -> Result<(), SensorError> {
    if !addresses.contains(&SENSOR_ADDRESS) {
        return Err(SensorError::NotFound);
    }
    if addresses.len() != 1 {
        return Err(SensorError::UnexpectedDevices {
            count: addresses.len(),
        });
    }
    Ok(())
}
