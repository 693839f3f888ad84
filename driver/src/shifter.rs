//! Serialization of frames out over the shift register chain.

use embedded_hal::digital::v2::OutputPin;

use crate::frame::{Frame, BITS};

/// Driver of the serial-in/parallel-out shift register chain.
///
/// Owns the five control lines of the chain: serial data, shift clock,
/// latch clock, active-low output enable and active-low register clear.
/// Data moves into the registers one bit per shift clock pulse and only
/// reaches the physical outputs on the latch pulse, so all 48 outputs
/// always change together.
///
/// Construction runs the boot sequence and leaves the chain latched all-off,
/// which means no frame can be latched onto floating registers. Floating
/// outputs before the first latch could momentarily energize an arbitrary
/// actuator.
pub struct ShiftRegister<Ser, Srck, Rclk, Oe, Srclr> {
    serial: Ser,
    shift_clock: Srck,
    latch_clock: Rclk,
    not_output_enable: Oe,
    not_clear: Srclr,
}

impl<Ser, Srck, Rclk, Oe, Srclr, E> ShiftRegister<Ser, Srck, Rclk, Oe, Srclr>
where
    Ser: OutputPin<Error = E>,
    Srck: OutputPin<Error = E>,
    Rclk: OutputPin<Error = E>,
    Oe: OutputPin<Error = E>,
    Srclr: OutputPin<Error = E>,
{
    /// Take over the chain's lines and bring it to a known all-off state.
    ///
    /// Pulses the hardware clear, enables outputs, zeroes both clocks and
    /// then shifts one all-zero frame through, so both halves of a two-board
    /// chain latch low before anyone gets to drive an actuator.
    pub fn init(
        serial: Ser,
        shift_clock: Srck,
        latch_clock: Rclk,
        not_output_enable: Oe,
        not_clear: Srclr,
    ) -> Result<Self, E> {
        let mut shifter = Self {
            serial,
            shift_clock,
            latch_clock,
            not_output_enable,
            not_clear,
        };

        shifter.not_clear.set_low()?;
        shifter.not_clear.set_high()?;

        shifter.not_output_enable.set_low()?;
        shifter.shift_clock.set_low()?;
        shifter.latch_clock.set_low()?;

        shifter.clear()?;

        Ok(shifter)
    }

    /// Serialize a frame out, index 0 first, and latch it.
    ///
    /// The outputs hold their previous state through the whole shift and
    /// change synchronously at the latch edge.
    pub fn latch_frame(&mut self, frame: &Frame) -> Result<(), E> {
        for &bit in frame.bits() {
            if bit {
                self.serial.set_high()?;
            } else {
                self.serial.set_low()?;
            }
            self.pulse_shift_clock()?;
        }
        self.pulse_latch()
    }

    /// Latch an all-zero frame without per-bit data writes.
    ///
    /// Fast path for de-energizing the whole display: the data line goes low
    /// once and the shift clock runs for the full chain length.
    pub fn clear(&mut self) -> Result<(), E> {
        self.serial.set_low()?;
        for _ in 0..BITS {
            self.pulse_shift_clock()?;
        }
        self.pulse_latch()
    }

    fn pulse_shift_clock(&mut self) -> Result<(), E> {
        self.shift_clock.set_high()?;
        self.shift_clock.set_low()
    }

    fn pulse_latch(&mut self) -> Result<(), E> {
        self.latch_clock.set_high()?;
        self.latch_clock.set_low()
    }
}
