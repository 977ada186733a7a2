// Copyright 2024 Cornell University
// released under BSD 3-Clause License

use crate::bv::arithmetic::{self, big};
use crate::bv::literal::leading_digit_width;
use crate::bv::storage::{big_low_u128, Storage};
use crate::{Bits, IntErrorKind, ParseIntError, WidthInt, INFINITE_PRECISION};
use num_bigint::{BigInt, BigUint};
use std::str::FromStr;

/// Number of bits encoded by a single digit in a power of two radix.
#[inline]
fn bits_per_digit(radix: u32) -> WidthInt {
    debug_assert!(radix.is_power_of_two());
    radix.trailing_zeros()
}

pub(crate) fn digits_str(value: &Storage, radix: u32) -> String {
    match value {
        Storage::Big(v) => v.to_str_radix(radix),
        other => match radix {
            2 => format!("{:b}", other.raw()),
            8 => format!("{:o}", other.raw()),
            10 => other.raw().to_string(),
            16 => format!("{:x}", other.raw()),
            _ => unreachable!("unsupported radix {radix}"),
        },
    }
}

impl Bits {
    /// Digits of the unsigned pattern in a power of two radix, zero padded to the width.
    fn to_fixed_digit_str(&self, radix: u32) -> String {
        let digits = digits_str(&self.value, radix);
        if self.is_infinite() {
            digits
        } else {
            let n = self.width.div_ceil(bits_per_digit(radix)) as usize;
            format!("{digits:0>n$}")
        }
    }

    /// One character per bit, most significant bit first.
    pub fn to_bit_str(&self) -> String {
        self.to_fixed_digit_str(2)
    }

    /// Lowercase hex digits of the unsigned pattern without a prefix.
    pub fn to_hex_str(&self) -> String {
        self.to_fixed_digit_str(16)
    }

    pub fn to_oct_str(&self) -> String {
        self.to_fixed_digit_str(8)
    }

    /// Decimal representation of the unsigned pattern.
    pub fn to_dec_str(&self) -> String {
        digits_str(&self.value, 10)
    }

    /// Decimal representation that honors the signedness of the value.
    pub fn to_dec_str_signed(&self) -> String {
        if !self.is_negative() {
            self.to_dec_str()
        } else if self.width <= u128::BITS {
            self.as_i128().to_string()
        } else {
            self.to_big_int().to_string()
        }
    }
}

/// Width needed to hold every digit of `value`: one bit per binary digit and four per hex digit.
/// A leading minus adds a sign bit.
pub(crate) fn determine_width_from_str_radix(value: &str, radix: u32) -> WidthInt {
    debug_assert!(
        radix == 2 || radix == 16,
        "only works for 2 or 16 bit basis"
    );
    let starts_with_minus = value.starts_with('-');
    let num_digits = match value.as_bytes() {
        [] | [b'+' | b'-'] => 0,
        [b'+' | b'-', digits @ ..] => digits.len() as WidthInt,
        digits => digits.len() as WidthInt,
    };
    let width = num_digits * bits_per_digit(radix) + starts_with_minus as WidthInt;
    width.max(1)
}

fn validate_digits(digits: &str, radix: u32) -> Result<(), ParseIntError> {
    if digits.is_empty() {
        return Err(ParseIntError::new(IntErrorKind::Empty));
    }
    if digits.chars().all(|c| c.is_digit(radix)) {
        Ok(())
    } else {
        Err(ParseIntError::new(IntErrorKind::InvalidDigit))
    }
}

/// Converts digits into a value of `width` bits. Positive numbers may use every bit of the
/// pattern. Negative numbers produce the two's complement of their magnitude.
fn parse_digits(
    negative: bool,
    digits: &str,
    radix: u32,
    width: WidthInt,
    signed: bool,
) -> Result<Bits, ParseIntError> {
    validate_digits(digits, radix)?;
    let exceeds = ParseIntError::new(IntErrorKind::ExceedsWidth);

    // use Rust standard parsing infrastructure when the result fits into a u128
    if width <= u128::BITS {
        let magnitude = u128::from_str_radix(digits, radix)?;
        if width < u128::BITS && magnitude >> width != 0 {
            return Err(exceeds);
        }
        let pattern = if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        };
        return Ok(Bits::from_u128_masked(pattern, width, signed));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or(ParseIntError::new(IntErrorKind::InvalidDigit))?;
    if negative {
        // infinite precision values are never negative
        if width == INFINITE_PRECISION || magnitude.bits() > width as u64 {
            return Err(exceeds);
        }
        let pattern = big::from_signed(-BigInt::from(magnitude), width);
        Ok(Bits::from_big_masked(pattern, width, signed))
    } else {
        if width != INFINITE_PRECISION && magnitude.bits() > width as u64 {
            return Err(exceeds);
        }
        Ok(Bits::from_big_masked(magnitude, width, signed))
    }
}

fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else {
        (false, value.strip_prefix('+').unwrap_or(value))
    }
}

/// Converts a number string into a bit vector value. Similar to `from_str_radix` in the Rust
/// standard library.
pub(crate) fn from_str_radix(
    value: &str,
    radix: u32,
    width: WidthInt,
    signed: bool,
) -> Result<Bits, ParseIntError> {
    let (negative, digits) = split_sign(value);
    parse_digits(negative, digits, radix, width, signed)
}

/// Detects the radix from a `0x`, `0b`, `0o` or `0` (octal) prefix. Without a prefix the
/// number is decimal.
pub(crate) fn split_radix_prefix(value: &str) -> (u32, &str) {
    let bytes = value.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', ..] => (16, &value[2..]),
        [b'0', b'b' | b'B', ..] => (2, &value[2..]),
        [b'0', b'o' | b'O', ..] => (8, &value[2..]),
        [b'0', _, ..] => (8, &value[1..]),
        _ => (10, value),
    }
}

pub(crate) fn parse_prefixed(
    value: &str,
    width: WidthInt,
    signed: bool,
) -> Result<Bits, ParseIntError> {
    let (negative, rest) = split_sign(value);
    let (radix, digits) = split_radix_prefix(rest);
    parse_digits(negative, digits, radix, width, signed)
}

/// Binary and octal digits follow the hex literal rule: the leading digit contributes the bits
/// it needs, every other digit contributes a full digit.
fn parse_power_of_two_digits(digits: &str, radix: u32) -> Result<Bits, ParseIntError> {
    validate_digits(digits, radix)?;
    let per_digit = bits_per_digit(radix);
    let leading = digits.as_bytes()[0] - b'0';
    let width = (digits.len() as WidthInt - 1) * per_digit + leading_digit_width(leading);
    parse_digits(false, digits, radix, width.max(1), false)
}

impl FromStr for Bits {
    type Err = ParseIntError;

    /// Accepts the prefixes `Bits::parse` accepts and infers the width the way literals do.
    /// A leading `-` yields the narrowest signed value that holds the number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = split_sign(s);
        let magnitude = match split_radix_prefix(rest) {
            (radix @ (2 | 8), digits) => parse_power_of_two_digits(digits, radix)?,
            _ => Bits::parse_literal(rest, false)?,
        };
        if !negative {
            return Ok(magnitude);
        }
        if magnitude.is_zero() {
            return Ok(Bits::zero(1).to_signed());
        }
        let magnitude = magnitude.to_big_uint();
        // -2^(w-1) is the smallest value of a signed w-bit number
        let width = (&magnitude - 1u8).bits() as WidthInt + 1;
        if width <= u128::BITS {
            let value = arithmetic::mask(width) & big_low_u128(&magnitude).wrapping_neg();
            Ok(Bits::from_u128_masked(value, width, true))
        } else {
            Ok(Bits::from_big_int(&-BigInt::from(magnitude), width))
        }
    }
}
