//! Fixed-size output frame of the shift register chain.

use core::convert::TryFrom;

use crate::direction::Direction;

/// Number of display cells on the board.
pub const CELLS: usize = 4;

/// Number of dots in one cell, 2 columns by 3 rows.
pub const DOTS_PER_CELL: usize = 6;

/// Number of dot actuators across the whole display.
pub const DOTS: usize = CELLS * DOTS_PER_CELL;

/// Number of output bits in the chain, two H-bridge inputs per dot.
pub const BITS: usize = 2 * DOTS;

/// The given bit sequence does not cover the chain exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LengthError {
    pub len: usize,
}

/// Snapshot of all 48 output bits of the chain.
///
/// Index 0 is the first bit shifted out. Bits `(2k, 2k + 1)` are the
/// `(in_a, in_b)` pair of dot `k`. A frame is always complete, partial
/// frames cannot be constructed and thus never get latched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bits: [bool; BITS],
}

impl Default for Frame {
    /// All actuators high-Z. Never brakes or energizes by default.
    fn default() -> Self {
        Self {
            bits: [false; BITS],
        }
    }
}

impl Frame {
    /// Set the H-bridge pair of a global dot. Offsets past the chain are
    /// rejected by the addressing layer before a frame is touched.
    pub(crate) fn write_pair(&mut self, offset: usize, direction: Direction) {
        let (in_a, in_b) = direction.pins();
        self.bits[offset] = in_a;
        self.bits[offset + 1] = in_b;
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    #[must_use]
    pub fn bits(&self) -> &[bool; BITS] {
        &self.bits
    }

    /// Read back the drive state of a global dot.
    #[must_use]
    pub fn dot_direction(&self, dot: usize) -> Direction {
        let offset = dot * 2;
        Direction::from_pins(self.bits[offset], self.bits[offset + 1])
    }
}

impl TryFrom<&[bool]> for Frame {
    type Error = LengthError;

    fn try_from(slice: &[bool]) -> Result<Self, Self::Error> {
        if slice.len() != BITS {
            return Err(LengthError { len: slice.len() });
        }
        let mut bits = [false; BITS];
        bits.copy_from_slice(slice);
        Ok(Self { bits })
    }
}
