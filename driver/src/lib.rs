//! Driver of the dot display's shift register chain.
//!
//! The display is a bank of bistable electromagnetic dot actuators wired to
//! a cascade of serial-in/parallel-out shift registers. This crate owns the
//! bit-level view of that chain: the 48-bit output frame, the mapping from
//! logical cells and dots to bit offsets, and the serialization of a frame
//! out over the GPIO lines.

#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod direction;
pub mod frame;
pub mod shifter;

pub use address::{frame_for_all, frame_for_dot, frame_from_cells, AddressError, CellPattern};
pub use direction::Direction;
pub use frame::{Frame, LengthError, BITS, CELLS, DOTS, DOTS_PER_CELL};
pub use shifter::ShiftRegister;
