// Copyright 2024 Cornell University
// released under BSD 3-Clause License

use crate::bv::arithmetic::{self, big};
use crate::bv::ops::widen;
use crate::bv::storage::{Storage, StorageKind};
use crate::{ParseIntError, WidthInt, INFINITE_PRECISION};
use num_bigint::{BigInt, BigUint};

/// A fully defined integer of `width` bits.
///
/// The value is stored as an unsigned bit pattern in the narrowest machine integer that can hold
/// `width` bits. Bits above `width` are always zero. Signedness decides how the pattern is
/// interpreted by conversions, comparisons, division and right shifts.
///
/// Note: `Eq` and `Hash` are structural (width, signedness and pattern must agree).
/// Use [`Bits::is_equal`] to compare values of different widths.
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Bits {
    pub(crate) width: WidthInt,
    pub(crate) signed: bool,
    pub(crate) value: Storage,
}

impl Bits {
    /// Builds a value from a pattern that is already masked to `width`.
    pub(crate) fn from_storage(value: Storage, width: WidthInt, signed: bool) -> Self {
        debug_assert_eq!(value.kind(), StorageKind::from(width));
        Self {
            width,
            signed: signed && width != INFINITE_PRECISION,
            value,
        }
    }

    /// Builds a value from the low `width` bits of `value`.
    pub(crate) fn from_u128_masked(value: u128, width: WidthInt, signed: bool) -> Self {
        if StorageKind::from(width).is_native() {
            let masked = value & arithmetic::mask(width);
            Self::from_storage(Storage::from_u128(masked, width), width, signed)
        } else {
            Self::from_big_masked(BigUint::from(value), width, signed)
        }
    }

    /// Builds a value from the low `width` bits of `value`.
    pub(crate) fn from_big_masked(value: BigUint, width: WidthInt, signed: bool) -> Self {
        let value = if width == INFINITE_PRECISION {
            value
        } else {
            value & big::mask(width)
        };
        Self::from_storage(Storage::from_big(value, width), width, signed)
    }

    pub fn zero(width: WidthInt) -> Self {
        Self::from_storage(Storage::zero(width), width, false)
    }

    pub fn ones(width: WidthInt) -> Self {
        assert_ne!(width, INFINITE_PRECISION, "infinite precision has no all-ones value");
        if StorageKind::from(width).is_native() {
            Self::from_u128_masked(u128::MAX, width, false)
        } else {
            Self::from_big_masked(big::mask(width), width, false)
        }
    }

    /// Unsigned value. Bits above `width` are discarded.
    pub fn from_u64(value: u64, width: WidthInt) -> Self {
        Self::from_u128_masked(value as u128, width, false)
    }

    /// Unsigned value. Bits above `width` are discarded.
    pub fn from_u128(value: u128, width: WidthInt) -> Self {
        Self::from_u128_masked(value, width, false)
    }

    /// Signed value in two's complement. Bits above `width` are discarded.
    pub fn from_i64(value: i64, width: WidthInt) -> Self {
        Self::from_i128(value as i128, width)
    }

    /// Signed value in two's complement. Bits above `width` are discarded.
    pub fn from_i128(value: i128, width: WidthInt) -> Self {
        if StorageKind::from(width).is_native() {
            Self::from_u128_masked(value as u128, width, true)
        } else {
            Self::from_big_int(&BigInt::from(value), width)
        }
    }

    pub fn from_bool(value: bool) -> Self {
        Self::from_u64(value as u64, 1)
    }

    pub fn tru() -> Self {
        Self::from_bool(true)
    }

    pub fn fals() -> Self {
        Self::from_bool(false)
    }

    /// Unsigned value. Bits above `width` are discarded.
    pub fn from_big_uint(value: &BigUint, width: WidthInt) -> Self {
        Self::from_big_masked(value.clone(), width, false)
    }

    /// Signed value in two's complement. Bits above `width` are discarded.
    pub fn from_big_int(value: &BigInt, width: WidthInt) -> Self {
        assert_ne!(width, INFINITE_PRECISION, "infinite precision values are unsigned");
        Self::from_big_masked(big::from_signed(value.clone(), width), width, true)
    }

    /// An infinite precision value. It is never masked.
    pub fn infinite(value: BigUint) -> Self {
        Self::from_storage(Storage::Big(value), INFINITE_PRECISION, false)
    }

    /// Parse a string of 1s and 0s. The width of the resulting value is the number of digits.
    pub fn from_bit_str(value: &str) -> Result<Self, ParseIntError> {
        let width = crate::bv::io::strings::determine_width_from_str_radix(value, 2);
        Self::from_str_radix(value, 2, width)
    }

    /// Parse a string of hex digits. The width of the resulting value is the number of digits times 4.
    pub fn from_hex_str(value: &str) -> Result<Self, ParseIntError> {
        let width = crate::bv::io::strings::determine_width_from_str_radix(value, 16);
        Self::from_str_radix(value, 16, width)
    }

    /// Parses digits without a prefix into an unsigned value of `width` bits.
    /// A leading `-` yields the two's complement of the magnitude.
    pub fn from_str_radix(value: &str, radix: u32, width: WidthInt) -> Result<Self, ParseIntError> {
        crate::bv::io::strings::from_str_radix(value, radix, width, false)
    }

    /// Parses a string with an optional sign and an optional `0x`, `0o`, `0b` or `0` (octal)
    /// prefix into a value of `width` bits.
    pub fn parse(value: &str, width: WidthInt, signed: bool) -> Result<Self, ParseIntError> {
        crate::bv::io::strings::parse_prefixed(value, width, signed)
    }

    pub fn width(&self) -> WidthInt {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn is_infinite(&self) -> bool {
        self.width == INFINITE_PRECISION
    }

    /// Storage kind selected for this width.
    pub fn storage_kind(&self) -> StorageKind {
        self.value.kind()
    }

    /// Same bit pattern, interpreted as signed.
    pub fn to_signed(&self) -> Self {
        self.with_signedness(true)
    }

    /// Same bit pattern, interpreted as unsigned.
    pub fn to_unsigned(&self) -> Self {
        self.with_signedness(false)
    }

    pub fn with_signedness(&self, signed: bool) -> Self {
        Self::from_storage(self.value.clone(), self.width, signed)
    }

    /// Truncates (keeps the low bits) or extends to `width`. Extension copies the sign bit of
    /// signed values and fills unsigned values with zeros.
    pub fn resize(&self, width: WidthInt) -> Self {
        if width == self.width {
            return self.clone();
        }
        if width == INFINITE_PRECISION {
            return Self::infinite(self.value.to_big());
        }
        let extend_sign = self.signed && width > self.width && self.msb();
        if StorageKind::from(width).is_native() {
            let mut value = self.value.raw() & arithmetic::mask(width);
            if extend_sign {
                value |= arithmetic::mask(width) & !arithmetic::mask(self.width);
            }
            Self::from_storage(Storage::from_u128(value, width), width, self.signed)
        } else if extend_sign {
            let value = self.value.to_big() | (big::mask(width) ^ big::mask(self.width));
            Self::from_storage(Storage::Big(value), width, self.signed)
        } else {
            Self::from_big_masked(self.value.to_big(), width, self.signed)
        }
    }

    /// Same bit pattern and signedness as `self`, but with the width of `other`.
    pub(crate) fn resize_like(&self, other: &Bits) -> Self {
        self.resize(other.width).with_signedness(other.signed)
    }

    pub fn zero_extend(&self, by: WidthInt) -> Self {
        self.to_unsigned()
            .resize(widen(self.width, by))
            .with_signedness(self.signed)
    }

    pub fn sign_extend(&self, by: WidthInt) -> Self {
        self.to_signed()
            .resize(widen(self.width, by))
            .with_signedness(self.signed)
    }

    /// Keeps the low `width` bits.
    pub fn truncate(&self, width: WidthInt) -> Self {
        debug_assert!(width <= self.width);
        self.resize(width)
    }

    /// Replaces the value with `value` converted to this width and signedness.
    pub fn assign(&mut self, value: &Bits) {
        *self = value.resize_like(self);
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.bits() == 1
    }

    pub fn is_all_ones(&self) -> bool {
        !self.is_infinite() && self.value.bits() == self.width as u64 && self.not().is_zero()
    }

    /// Returns value as a bool iff the value is a 1-bit value.
    pub fn to_bool(&self) -> Option<bool> {
        if self.width == 1 {
            Some(self.value.raw() == 1)
        } else {
            None
        }
    }

    pub fn is_true(&self) -> bool {
        self.to_bool() == Some(true)
    }

    pub fn is_false(&self) -> bool {
        self.to_bool() == Some(false)
    }

    /// Bit `width - 1` of the pattern, regardless of signedness.
    pub fn msb(&self) -> bool {
        !self.is_infinite() && self.value.is_bit_set(self.width - 1)
    }

    /// True iff the value is signed and its sign bit is set.
    pub fn is_negative(&self) -> bool {
        self.signed && self.msb()
    }

    pub fn is_bit_set(&self, pos: WidthInt) -> bool {
        debug_assert!(pos < self.width);
        self.value.is_bit_set(pos)
    }

    pub fn set_bit(&mut self, pos: WidthInt, value: bool) {
        assert!(pos < self.width, "bit {pos} is out of range for {} bits", self.width);
        match &mut self.value {
            Storage::Big(v) => v.set_bit(pos as u64, value),
            other => {
                let bit = 1u128 << pos;
                let raw = if value {
                    other.raw() | bit
                } else {
                    other.raw() & !bit
                };
                *other = Storage::from_u128(raw, self.width);
            }
        }
    }

    pub fn clear_bit(&mut self, pos: WidthInt) {
        self.set_bit(pos, false);
    }

    /// Returns the unsigned value if it fits into 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.value.bits() <= u64::BITS as u64 {
            Some(self.value.raw() as u64)
        } else {
            None
        }
    }

    /// Returns the value as a 64-bit signed integer if the value can be represented.
    pub fn to_i64(&self) -> Option<i64> {
        if self.signed {
            let value = self.to_big_int();
            i64::try_from(value).ok()
        } else {
            self.to_u64().and_then(|v| i64::try_from(v).ok())
        }
    }

    /// The low 64 bits of the pattern. Unlike `as_i64`, narrow signed values are not sign
    /// extended.
    pub fn as_u64(&self) -> u64 {
        self.value.raw() as u64
    }

    /// The low 128 bits of the pattern.
    pub fn as_u128(&self) -> u128 {
        self.value.raw()
    }

    /// Like a C cast to `int64_t`: signed values are sign extended from bit `width - 1` first.
    pub fn as_i64(&self) -> i64 {
        self.as_i128() as i64
    }

    /// Values wider than 128 bits keep their low 128 bits, which sign extension does not change.
    pub fn as_i128(&self) -> i128 {
        if self.signed && self.width <= u128::BITS {
            arithmetic::to_signed(self.value.raw(), self.width)
        } else {
            self.value.raw() as i128
        }
    }

    pub fn to_big_uint(&self) -> BigUint {
        self.value.to_big()
    }

    /// Signed interpretation for signed values, unsigned otherwise.
    pub fn to_big_int(&self) -> BigInt {
        if self.signed {
            big::to_signed(&self.value.to_big(), self.width)
        } else {
            BigInt::from(self.value.to_big())
        }
    }

    /// Smallest value of the given shape.
    pub fn min_value(width: WidthInt, signed: bool) -> Self {
        let mut out = Self::zero(width).with_signedness(signed);
        if signed {
            out.set_bit(width - 1, true);
        }
        out
    }

    /// Largest value of the given shape.
    pub fn max_value(width: WidthInt, signed: bool) -> Self {
        let mut out = Self::ones(width).with_signedness(signed);
        if signed {
            out.clear_bit(width - 1);
        }
        out
    }

    /// Number of non-sign bits, like `std::numeric_limits::digits`.
    pub fn digits(width: WidthInt, signed: bool) -> WidthInt {
        width - signed as WidthInt
    }
}

impl From<bool> for Bits {
    fn from(value: bool) -> Self {
        Bits::from_bool(value)
    }
}

impl std::fmt::Debug for Bits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.signed { "s" } else { "" };
        if self.is_infinite() {
            write!(f, "Bits<inf>({})", self.to_dec_str())
        } else {
            write!(f, "Bits<{}{sign}>({})", self.width, self.to_dec_str())
        }
    }
}
