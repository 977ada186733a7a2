// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Arbitrary-width bit-vector integers that model the `Bits<N>` type of an
// instruction-definition language. Every instruction of a generated simulator
// computes on these values.

mod bitfield;
mod bv;
mod error;
mod xregister;

/// This type restricts the maximum width that a bit-vector type is allowed to have.
pub type WidthInt = u32;

/// Declared width of values that are never masked. Widening operations whose result width
/// cannot be bounded (e.g. a left shift by a run-time amount) produce values of this width.
pub const INFINITE_PRECISION: WidthInt = WidthInt::MAX;

pub use bitfield::*;
pub use bv::*;
pub use error::*;
pub use xregister::*;
