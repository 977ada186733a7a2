// Copyright 2024 Cornell University
// released under BSD 3-Clause License

/// Errors raised by bit-vector operations. They are never caught inside this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    /// The operation needs every bit to be defined, but the unknown mask is non-zero.
    #[error("value has unknown bits (unknown mask: {unknown_mask:#x})")]
    UndefinedValue { unknown_mask: crate::Bits },
    /// The operation depends on a run-time width that has not been determined yet.
    #[error("the width of the value has not been determined")]
    UndefinedWidth,
    #[error("division by zero")]
    DivisionByZero,
    #[error(transparent)]
    Parse(#[from] ParseIntError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseIntError {
    pub kind: IntErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntErrorKind {
    /// There were no digits after the prefix.
    #[error("cannot parse integer from empty string")]
    Empty,
    /// An invalid digit was encountered.
    #[error("invalid digit found in string")]
    InvalidDigit,
    /// The integer does not fit into the size of the bitvector.
    #[error("number does not fit into the target width")]
    ExceedsWidth,
    /// An `x` digit was found where unknown bits are not allowed.
    #[error("unknown digit found where unknown bits are not allowed")]
    UnexpectedUnknown,
}

impl ParseIntError {
    pub(crate) const fn new(kind: IntErrorKind) -> Self {
        Self { kind }
    }
}

impl From<std::num::ParseIntError> for ParseIntError {
    fn from(e: std::num::ParseIntError) -> Self {
        let kind = match e.kind() {
            std::num::IntErrorKind::NegOverflow | std::num::IntErrorKind::PosOverflow => {
                IntErrorKind::ExceedsWidth
            }
            std::num::IntErrorKind::Empty => IntErrorKind::Empty,
            _ => IntErrorKind::InvalidDigit,
        };
        ParseIntError { kind }
    }
}
