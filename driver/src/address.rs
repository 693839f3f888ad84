//! Mapping of logical cells and dots to bit offsets in the output frame.
//!
//! A cell groups six dots, occupying twelve consecutive bits. Cells never
//! overlap in offset space: cell `c` owns bits `[c * 12, c * 12 + 12)`.
//! A dot is addressable either as `(cell, dot)` or through its global
//! number `cell * 6 + dot`, and the two schemes agree everywhere.

use crate::direction::Direction;
use crate::frame::{Frame, CELLS, DOTS, DOTS_PER_CELL};

/// A cell or dot index points outside the configured display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    InvalidCell(usize),
    InvalidDot(usize),
}

/// Requested drive of one cell, either uniform or per dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellPattern {
    Uniform(Direction),
    PerDot([Direction; DOTS_PER_CELL]),
}

/// Bit offset of a global dot number.
#[must_use]
pub fn dot_offset(dot: usize) -> usize {
    dot * 2
}

/// Bit offset of a dot within a cell.
#[must_use]
pub fn cell_dot_offset(cell: usize, dot: usize) -> usize {
    cell * DOTS_PER_CELL * 2 + dot * 2
}

/// Build a frame from explicitly addressed cells.
///
/// Cells left out of the list stay high-Z. Silently braking or energizing
/// an actuator that was never addressed is not an option here.
pub fn frame_from_cells(cells: &[(usize, CellPattern)]) -> Result<Frame, AddressError> {
    let mut frame = Frame::default();

    for &(cell, pattern) in cells {
        if cell >= CELLS {
            return Err(AddressError::InvalidCell(cell));
        }
        let directions = match pattern {
            CellPattern::Uniform(direction) => [direction; DOTS_PER_CELL],
            CellPattern::PerDot(directions) => directions,
        };
        for (dot, direction) in directions.iter().enumerate() {
            frame.write_pair(cell_dot_offset(cell, dot), *direction);
        }
    }

    Ok(frame)
}

/// Frame driving a single global dot, everything else high-Z.
pub fn frame_for_dot(dot: usize, direction: Direction) -> Result<Frame, AddressError> {
    if dot >= DOTS {
        return Err(AddressError::InvalidDot(dot));
    }
    let mut frame = Frame::default();
    frame.write_pair(dot_offset(dot), direction);
    Ok(frame)
}

/// Frame driving every cell of the display uniformly.
#[must_use]
pub fn frame_for_all(direction: Direction) -> Frame {
    let mut frame = Frame::default();
    for dot in 0..DOTS {
        frame.write_pair(dot_offset(dot), direction);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn when_addressed_by_cell_and_globally_the_offsets_agree() {
        for cell in 0..CELLS {
            for dot in 0..DOTS_PER_CELL {
                assert_eq!(
                    cell_dot_offset(cell, dot),
                    dot_offset(cell * DOTS_PER_CELL + dot)
                );
            }
        }
    }

    proptest! {
        #[test]
        fn when_addressed_by_any_valid_pair_the_offsets_agree(
            cell in 0..CELLS,
            dot in 0..DOTS_PER_CELL,
        ) {
            prop_assert_eq!(
                cell_dot_offset(cell, dot),
                dot_offset(cell * DOTS_PER_CELL + dot)
            );
        }
    }

    #[test]
    fn when_no_cell_is_addressed_the_frame_is_all_high_z() {
        let frame = frame_from_cells(&[]).unwrap();
        for dot in 0..DOTS {
            assert_eq!(frame.dot_direction(dot), Direction::HighZ);
        }
    }

    #[test]
    fn when_one_cell_is_uniform_only_its_dots_are_driven() {
        let frame = frame_from_cells(&[(2, CellPattern::Uniform(Direction::Forward))]).unwrap();
        for dot in 0..DOTS {
            let expected = if (12..18).contains(&dot) {
                Direction::Forward
            } else {
                Direction::HighZ
            };
            assert_eq!(frame.dot_direction(dot), expected);
        }
    }

    #[test]
    fn when_a_cell_is_given_per_dot_directions_each_dot_follows_its_own() {
        let directions = [
            Direction::Forward,
            Direction::Reverse,
            Direction::HighZ,
            Direction::Brake,
            Direction::Forward,
            Direction::Reverse,
        ];
        let frame = frame_from_cells(&[(1, CellPattern::PerDot(directions))]).unwrap();
        for (dot, direction) in directions.iter().enumerate() {
            assert_eq!(frame.dot_direction(DOTS_PER_CELL + dot), *direction);
        }
        assert_eq!(frame.dot_direction(0), Direction::HighZ);
        assert_eq!(frame.dot_direction(12), Direction::HighZ);
    }

    #[test]
    fn when_cell_index_is_out_of_range_it_is_rejected_before_building() {
        let result = frame_from_cells(&[(CELLS, CellPattern::Uniform(Direction::Brake))]);
        assert_eq!(result, Err(AddressError::InvalidCell(CELLS)));
    }

    #[test]
    fn when_dot_number_is_out_of_range_it_is_rejected() {
        assert_eq!(
            frame_for_dot(DOTS, Direction::Forward),
            Err(AddressError::InvalidDot(DOTS))
        );
    }

    #[test]
    fn when_driving_a_single_dot_exactly_one_pair_is_set() {
        let frame = frame_for_dot(11, Direction::Forward).unwrap();
        let set: usize = frame.bits().iter().filter(|bit| **bit).count();
        assert_eq!(set, 1);
        assert!(frame.get(22));
    }

    #[test]
    fn when_driving_all_every_dot_follows_the_direction() {
        let frame = frame_for_all(Direction::Reverse);
        for dot in 0..DOTS {
            assert_eq!(frame.dot_direction(dot), Direction::Reverse);
        }
    }
}
