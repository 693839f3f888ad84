//! Drive states of a single H-bridge actuator.

/// Drive state of one dot actuator.
///
/// Each actuator sits in an H-bridge controlled by two adjacent bits of the
/// shift register frame, `(in_a, in_b)`. `Forward` raises the dot, `Reverse`
/// lowers it. `HighZ` leaves the coil floating and is the safe idle state,
/// `Brake` shorts the coil to resist motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    HighZ,
    Brake,
    Forward,
    Reverse,
}

impl Direction {
    /// H-bridge control pair `(in_a, in_b)` of this state.
    #[must_use]
    pub fn pins(self) -> (bool, bool) {
        match self {
            Self::HighZ => (false, false),
            Self::Brake => (true, true),
            Self::Forward => (true, false),
            Self::Reverse => (false, true),
        }
    }

    /// Inverse of [`Direction::pins`].
    #[must_use]
    pub fn from_pins(in_a: bool, in_b: bool) -> Self {
        match (in_a, in_b) {
            (false, false) => Self::HighZ,
            (true, true) => Self::Brake,
            (true, false) => Self::Forward,
            (false, true) => Self::Reverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::HighZ,
        Direction::Brake,
        Direction::Forward,
        Direction::Reverse,
    ];

    #[test]
    fn when_mapped_to_pins_and_back_every_state_survives() {
        for direction in ALL {
            let (in_a, in_b) = direction.pins();
            assert_eq!(Direction::from_pins(in_a, in_b), direction);
        }
    }

    #[test]
    fn when_mapped_from_pins_every_pair_is_covered_exactly_once() {
        for pair in [(false, false), (false, true), (true, false), (true, true)] {
            let direction = Direction::from_pins(pair.0, pair.1);
            assert_eq!(direction.pins(), pair);
        }
    }

    #[test]
    fn when_defaulted_it_is_high_z() {
        assert_eq!(Direction::default(), Direction::HighZ);
    }
}
