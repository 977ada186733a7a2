// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Numeric literals with minimal width inference.
//
// Decimal literals take the exact number of bits of their value as long as it fits into 64 bits
// and an over-approximation of about 3.3 bits per digit above that. In hex literals every digit
// contributes four bits, except for the leading digit which only contributes the bits it needs.
// An `x` or `X` hex digit stands for four unknown bits. `_` separates digits.

use crate::{Bits, IntErrorKind, ParseIntError, PossiblyUnknownBits, WidthInt};
use num_bigint::BigUint;

/// Widest literal that can be evaluated at compile time.
const MAX_LITERAL_WIDTH: WidthInt = u128::BITS;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LiteralKind {
    Unsigned,
    /// The inferred width grows by one sign bit.
    Signed,
    /// Unsigned, with `x` hex digits marking unknown bits.
    PossiblyUnknown,
}

/// A literal evaluated by a `const fn`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Literal {
    width: WidthInt,
    value: u128,
    unknown_mask: u128,
    signed: bool,
}

const fn err(kind: IntErrorKind) -> ParseIntError {
    ParseIntError::new(kind)
}

#[inline]
const fn hex_digit_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Bits needed by the leading hex digit.
#[inline]
pub(crate) const fn leading_digit_width(value: u8) -> WidthInt {
    u8::BITS - value.leading_zeros()
}

/// Over-approximates the width of a decimal number with `digits` digits.
#[inline]
const fn decimal_width_estimate(digits: WidthInt) -> WidthInt {
    (digits * 10 + 2) / 3
}

#[inline]
fn is_hex_prefix(value: &str) -> bool {
    value.starts_with("0x") || value.starts_with("0X")
}

impl Literal {
    pub const fn try_parse(value: &str, kind: LiteralKind) -> Result<Self, ParseIntError> {
        let bytes = value.as_bytes();
        let is_hex = bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X');
        let parsed = if is_hex {
            Self::parse_hex(bytes, matches!(kind, LiteralKind::PossiblyUnknown))
        } else {
            Self::parse_dec(bytes)
        };
        let mut lit = match parsed {
            Ok(lit) => lit,
            Err(e) => return Err(e),
        };
        if matches!(kind, LiteralKind::Signed) {
            lit.width += 1;
            lit.signed = true;
        }
        if lit.width > MAX_LITERAL_WIDTH {
            return Err(err(IntErrorKind::ExceedsWidth));
        }
        Ok(lit)
    }

    /// Like [`Literal::try_parse`], but panics on malformed input. In a `const` context the panic
    /// becomes a compile error.
    pub const fn parse(value: &str, kind: LiteralKind) -> Self {
        match Self::try_parse(value, kind) {
            Ok(lit) => lit,
            Err(e) => match e.kind {
                IntErrorKind::Empty => panic!("literal has no digits"),
                IntErrorKind::InvalidDigit => panic!("invalid digit in literal"),
                IntErrorKind::ExceedsWidth => {
                    panic!("literal is wider than 128 bits, use Bits::parse_literal instead")
                }
                IntErrorKind::UnexpectedUnknown => {
                    panic!("unknown digits are only allowed in possibly unknown literals")
                }
            },
        }
    }

    const fn parse_dec(bytes: &[u8]) -> Result<Self, ParseIntError> {
        let mut value: u128 = 0;
        let mut digits: WidthInt = 0;
        let mut ii = 0;
        while ii < bytes.len() {
            let c = bytes[ii];
            ii += 1;
            if c == b'_' {
                continue;
            }
            if !c.is_ascii_digit() {
                return Err(err(IntErrorKind::InvalidDigit));
            }
            value = match value.checked_mul(10) {
                Some(v) => match v.checked_add((c - b'0') as u128) {
                    Some(v) => v,
                    None => return Err(err(IntErrorKind::ExceedsWidth)),
                },
                None => return Err(err(IntErrorKind::ExceedsWidth)),
            };
            digits += 1;
        }
        if digits == 0 {
            return Err(err(IntErrorKind::Empty));
        }
        let width = if value <= u64::MAX as u128 {
            let w = u128::BITS - value.leading_zeros();
            if w == 0 {
                1
            } else {
                w
            }
        } else {
            decimal_width_estimate(digits)
        };
        Ok(Self {
            width,
            value,
            unknown_mask: 0,
            signed: false,
        })
    }

    const fn parse_hex(bytes: &[u8], allow_unknown: bool) -> Result<Self, ParseIntError> {
        let mut value: u128 = 0;
        let mut unknown_mask: u128 = 0;
        let mut width: WidthInt = 0;
        let mut leading = true;
        // skip the `0x` prefix
        let mut ii = 2;
        while ii < bytes.len() {
            let c = bytes[ii];
            ii += 1;
            if c == b'_' {
                continue;
            }
            let (digit, unknown) = if c == b'x' || c == b'X' {
                if !allow_unknown {
                    return Err(err(IntErrorKind::UnexpectedUnknown));
                }
                (0, true)
            } else {
                match hex_digit_value(c) {
                    Some(d) => (d, false),
                    None => return Err(err(IntErrorKind::InvalidDigit)),
                }
            };
            width += if leading && !unknown {
                leading_digit_width(digit)
            } else {
                4
            };
            leading = false;
            if width > MAX_LITERAL_WIDTH {
                return Err(err(IntErrorKind::ExceedsWidth));
            }
            value = (value << 4) | digit as u128;
            unknown_mask = (unknown_mask << 4) | if unknown { 0xf } else { 0 };
        }
        if leading {
            return Err(err(IntErrorKind::Empty));
        }
        Ok(Self {
            width: if width == 0 { 1 } else { width },
            value,
            unknown_mask,
            signed: false,
        })
    }

    pub const fn width(&self) -> WidthInt {
        self.width
    }

    pub const fn value(&self) -> u128 {
        self.value
    }

    pub const fn unknown_mask(&self) -> u128 {
        self.unknown_mask
    }

    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Panics if the literal contains unknown digits.
    pub fn to_bits(&self) -> Bits {
        assert_eq!(self.unknown_mask, 0, "literal has unknown bits");
        Bits::from_u128(self.value, self.width).with_signedness(self.signed)
    }

    pub fn to_possibly_unknown_bits(&self) -> PossiblyUnknownBits {
        PossiblyUnknownBits::new(
            Bits::from_u128(self.value, self.width).with_signedness(self.signed),
            Bits::from_u128(self.unknown_mask, self.width),
        )
    }
}

/// Digits of a literal without separators. Returns whether the literal is hex.
fn strip_literal(value: &str) -> Result<(bool, String), ParseIntError> {
    let (hex, digits) = if is_hex_prefix(value) {
        (true, &value[2..])
    } else {
        (false, value)
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        Err(err(IntErrorKind::Empty))
    } else {
        Ok((hex, digits))
    }
}

/// Literal of any width, evaluated at run time. Returns the value and the unknown mask.
pub(crate) fn parse_big(
    value: &str,
    kind: LiteralKind,
) -> Result<(BigUint, BigUint, WidthInt), ParseIntError> {
    let (hex, digits) = strip_literal(value)?;
    let (value, unknown_mask, width) = if hex {
        let allow_unknown = kind == LiteralKind::PossiblyUnknown;
        let mut value = BigUint::default();
        let mut unknown_mask = BigUint::default();
        let mut width: WidthInt = 0;
        for (ii, c) in digits.bytes().enumerate() {
            let (digit, unknown) = if c == b'x' || c == b'X' {
                if !allow_unknown {
                    return Err(err(IntErrorKind::UnexpectedUnknown));
                }
                (0, true)
            } else {
                let d = hex_digit_value(c).ok_or(err(IntErrorKind::InvalidDigit))?;
                (d, false)
            };
            width += if ii == 0 && !unknown {
                leading_digit_width(digit)
            } else {
                4
            };
            value = (value << 4u32) | BigUint::from(digit);
            unknown_mask = (unknown_mask << 4u32) | BigUint::from(if unknown { 0xfu8 } else { 0 });
        }
        (value, unknown_mask, width)
    } else {
        if !digits.bytes().all(|c| c.is_ascii_digit()) {
            return Err(err(IntErrorKind::InvalidDigit));
        }
        let value = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or(err(IntErrorKind::InvalidDigit))?;
        let width = value.bits() as WidthInt;
        (value, BigUint::default(), width)
    };
    let width = width.max(1) + (kind == LiteralKind::Signed) as WidthInt;
    Ok((value, unknown_mask, width))
}

impl Bits {
    /// Parses a decimal or `0x` hex literal of any width and infers its width. Signed literals
    /// get an extra sign bit.
    pub fn parse_literal(value: &str, signed: bool) -> Result<Bits, ParseIntError> {
        let kind = if signed {
            LiteralKind::Signed
        } else {
            LiteralKind::Unsigned
        };
        let (value, _, width) = parse_big(value, kind)?;
        Ok(Bits::from_big_masked(value, width, signed))
    }
}

impl PossiblyUnknownBits {
    /// Parses a decimal or `0x` hex literal of any width in which `x` hex digits are unknown.
    pub fn parse_literal(value: &str) -> Result<PossiblyUnknownBits, ParseIntError> {
        let (value, unknown_mask, width) = parse_big(value, LiteralKind::PossiblyUnknown)?;
        Ok(PossiblyUnknownBits::new(
            Bits::from_big_masked(value, width, false),
            Bits::from_big_masked(unknown_mask, width, false),
        ))
    }
}

/// Unsigned `Bits` from a literal evaluated at compile time.
///
/// ```
/// let a = idl_bits::bits!("0x1f");
/// assert_eq!(a.width(), 5);
/// assert_eq!(a.as_u64(), 31);
/// ```
#[macro_export]
macro_rules! bits {
    ($lit:literal) => {{
        const LITERAL: $crate::Literal =
            $crate::Literal::parse($lit, $crate::LiteralKind::Unsigned);
        LITERAL.to_bits()
    }};
}

/// Signed `Bits` from a literal evaluated at compile time. The width includes a sign bit.
#[macro_export]
macro_rules! sbits {
    ($lit:literal) => {{
        const LITERAL: $crate::Literal = $crate::Literal::parse($lit, $crate::LiteralKind::Signed);
        LITERAL.to_bits()
    }};
}

/// `PossiblyUnknownBits` from a literal evaluated at compile time. `x` hex digits are unknown.
#[macro_export]
macro_rules! xbits {
    ($lit:literal) => {{
        const LITERAL: $crate::Literal =
            $crate::Literal::parse($lit, $crate::LiteralKind::PossiblyUnknown);
        LITERAL.to_possibly_unknown_bits()
    }};
}
