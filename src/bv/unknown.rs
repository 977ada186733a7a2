// Copyright 2024 Cornell University
// released under BSD 3-Clause License

use crate::bv::ops::shift_amount;
use crate::{Bits, BitsError, WidthInt};
use std::cmp::Ordering;

/// A bit-vector value in which some bits may be unknown.
///
/// Bit `i` of the unknown mask marks bit `i` of the value as unknown. Unknown bits of the value
/// may hold either polarity. Bitwise operations and shifts propagate the mask. Everything that
/// interprets the value as a number requires a zero mask and fails with
/// [`BitsError::UndefinedValue`] otherwise.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct PossiblyUnknownBits {
    value: Bits,
    /// unsigned and of the same width as `value`
    unknown_mask: Bits,
}

impl From<Bits> for PossiblyUnknownBits {
    fn from(value: Bits) -> Self {
        let unknown_mask = Bits::zero(value.width());
        Self {
            value,
            unknown_mask,
        }
    }
}

impl From<&Bits> for PossiblyUnknownBits {
    fn from(value: &Bits) -> Self {
        Self::from(value.clone())
    }
}

impl PossiblyUnknownBits {
    /// The mask is truncated or zero extended to the width of `value`.
    pub fn new(value: Bits, unknown_mask: Bits) -> Self {
        let unknown_mask = unknown_mask.to_unsigned().resize(value.width());
        Self {
            value,
            unknown_mask,
        }
    }

    /// A value of `width` bits in which every bit is unknown.
    pub fn unknown(width: WidthInt) -> Self {
        Self::new(Bits::zero(width), Bits::ones(width))
    }

    /// The stored pattern, including unknown lanes.
    pub fn value(&self) -> &Bits {
        &self.value
    }

    pub fn unknown_mask(&self) -> &Bits {
        &self.unknown_mask
    }

    pub fn width(&self) -> WidthInt {
        self.value.width()
    }

    pub fn is_signed(&self) -> bool {
        self.value.is_signed()
    }

    pub fn is_defined(&self) -> bool {
        self.unknown_mask.is_zero()
    }

    pub fn is_bit_unknown(&self, pos: WidthInt) -> bool {
        self.unknown_mask.is_bit_set(pos)
    }

    pub fn with_signedness(&self, signed: bool) -> Self {
        Self {
            value: self.value.with_signedness(signed),
            unknown_mask: self.unknown_mask.clone(),
        }
    }

    /// Returns the value if every bit is defined.
    pub fn to_bits(&self) -> Result<Bits, BitsError> {
        self.defined().cloned()
    }

    fn defined(&self) -> Result<&Bits, BitsError> {
        if self.is_defined() {
            Ok(&self.value)
        } else {
            log::debug!(
                "{} bit value has unknown bits {:#x}",
                self.width(),
                self.unknown_mask
            );
            Err(BitsError::UndefinedValue {
                unknown_mask: self.unknown_mask.clone(),
            })
        }
    }

    pub fn to_u64(&self) -> Result<u64, BitsError> {
        Ok(self.defined()?.as_u64())
    }

    pub fn to_i64(&self) -> Result<i64, BitsError> {
        Ok(self.defined()?.as_i64())
    }

    /// Extends the mask like the value, so that extending an unknown sign bit yields unknown
    /// bits.
    fn mask_resized(&self, width: WidthInt) -> Bits {
        self.unknown_mask
            .with_signedness(self.value.is_signed())
            .resize(width)
            .to_unsigned()
    }

    pub fn resize(&self, width: WidthInt) -> Self {
        Self {
            value: self.value.resize(width),
            unknown_mask: self.mask_resized(width),
        }
    }

    /// Replaces value and mask, truncating or extending them to the current width.
    pub fn assign(&mut self, other: &PossiblyUnknownBits) {
        let signed = self.value.is_signed();
        *self = other.resize(self.width()).with_signedness(signed);
    }

    /// Sets a bit to a defined value.
    pub fn set_bit(&mut self, pos: WidthInt, value: bool) {
        self.value.set_bit(pos, value);
        self.unknown_mask.clear_bit(pos);
    }

    /// Marks a bit as unknown.
    pub fn set_bit_unknown(&mut self, pos: WidthInt) {
        self.unknown_mask.set_bit(pos, true);
    }

    fn map(&self, f: impl Fn(&Bits) -> Bits) -> Self {
        Self {
            value: f(&self.value),
            unknown_mask: f(&self.unknown_mask.with_signedness(self.value.is_signed()))
                .to_unsigned(),
        }
    }

    pub fn shl(&self, amount: WidthInt) -> Self {
        self.map(|v| v.shl(amount))
    }

    pub fn shr(&self, amount: WidthInt) -> Self {
        self.map(|v| v.shr(amount))
    }

    /// Arithmetic right shift. An unknown sign bit makes every filled bit unknown.
    pub fn sra(&self, amount: WidthInt) -> Self {
        self.map(|v| v.sra(amount))
    }

    /// The shift amount must be fully defined.
    pub fn shift_left(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.shl(shift_amount(amount.defined()?)))
    }

    /// The shift amount must be fully defined.
    pub fn shift_right(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.shr(shift_amount(amount.defined()?)))
    }

    /// The shift amount must be fully defined.
    pub fn arithmetic_shift_right(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.sra(shift_amount(amount.defined()?)))
    }

    /// Widening left shift by a constant. No bit of the value or the mask is lost.
    pub fn widening_sll<const SHAMT: WidthInt>(&self) -> Self {
        Self {
            value: self.value.widening_sll::<SHAMT>(),
            unknown_mask: self.unknown_mask.widening_sll::<SHAMT>(),
        }
    }

    /// Lanes unknown in both operands stay unknown.
    pub fn and(&self, rhs: &PossiblyUnknownBits) -> Self {
        let (width, _) = self.value.common_shape(&rhs.value);
        Self::new(
            self.value.and(&rhs.value),
            self.mask_resized(width).and(&rhs.mask_resized(width)),
        )
    }

    pub fn or(&self, rhs: &PossiblyUnknownBits) -> Self {
        let (width, _) = self.value.common_shape(&rhs.value);
        Self::new(
            self.value.or(&rhs.value),
            self.mask_resized(width).or(&rhs.mask_resized(width)),
        )
    }

    pub fn xor(&self, rhs: &PossiblyUnknownBits) -> Self {
        let (width, _) = self.value.common_shape(&rhs.value);
        Self::new(
            self.value.xor(&rhs.value),
            self.mask_resized(width).or(&rhs.mask_resized(width)),
        )
    }

    /// A defined zero lane in `rhs` resolves the lane to a known zero.
    pub fn and_bits(&self, rhs: &Bits) -> Self {
        let (width, _) = self.value.common_shape(rhs);
        let rhs = rhs.resize(width);
        Self::new(self.value.and(&rhs), self.mask_resized(width).and(&rhs))
    }

    /// A defined one lane in `rhs` resolves the lane to a known one.
    pub fn or_bits(&self, rhs: &Bits) -> Self {
        let (width, _) = self.value.common_shape(rhs);
        let rhs = rhs.resize(width);
        Self::new(self.value.or(&rhs), self.mask_resized(width).and(&rhs.not()))
    }

    pub fn xor_bits(&self, rhs: &Bits) -> Self {
        let (width, _) = self.value.common_shape(rhs);
        Self::new(self.value.xor(rhs), self.mask_resized(width))
    }

    pub fn not(&self) -> Self {
        Self {
            value: self.value.not(),
            unknown_mask: self.unknown_mask.clone(),
        }
    }

    /// Bits `msb` down to `lsb`, including their unknown lanes.
    pub fn slice(&self, msb: WidthInt, lsb: WidthInt) -> Self {
        Self {
            value: self.value.slice(msb, lsb),
            unknown_mask: self.unknown_mask.slice(msb, lsb),
        }
    }

    /// `self` becomes the most significant part.
    pub fn concat(&self, rhs: &PossiblyUnknownBits) -> Self {
        Self {
            value: self.value.concat(&rhs.value),
            unknown_mask: self.unknown_mask.concat(&rhs.unknown_mask),
        }
    }

    fn arith(
        &self,
        rhs: &PossiblyUnknownBits,
        op: impl FnOnce(&Bits, &Bits) -> Bits,
    ) -> Result<Self, BitsError> {
        Ok(op(self.defined()?, rhs.defined()?).into())
    }

    pub fn add(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::add)
    }

    pub fn sub(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::sub)
    }

    pub fn mul(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::mul)
    }

    pub fn div(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.defined()?.div(rhs.defined()?)?.into())
    }

    pub fn rem(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.defined()?.rem(rhs.defined()?)?.into())
    }

    pub fn widening_add(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::widening_add)
    }

    pub fn widening_sub(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::widening_sub)
    }

    pub fn widening_mul(&self, rhs: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.arith(rhs, Bits::widening_mul)
    }

    pub fn negate(&self) -> Result<Self, BitsError> {
        Ok(self.defined()?.negate().into())
    }

    pub fn cmp_value(&self, rhs: &PossiblyUnknownBits) -> Result<Ordering, BitsError> {
        Ok(self.defined()?.cmp_value(rhs.defined()?))
    }

    pub fn is_equal(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Equal)
    }

    pub fn is_not_equal(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Equal)
    }

    pub fn is_less(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Less)
    }

    pub fn is_less_or_equal(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Greater)
    }

    pub fn is_greater(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Greater)
    }

    pub fn is_greater_or_equal(&self, rhs: &PossiblyUnknownBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Less)
    }
}

macro_rules! impl_bit_op {
    ($trait:ident, $method:ident, $inherent:ident, $bits_method:ident) => {
        impl std::ops::$trait<&PossiblyUnknownBits> for &PossiblyUnknownBits {
            type Output = PossiblyUnknownBits;

            fn $method(self, rhs: &PossiblyUnknownBits) -> Self::Output {
                PossiblyUnknownBits::$inherent(self, rhs)
            }
        }

        impl std::ops::$trait<&Bits> for &PossiblyUnknownBits {
            type Output = PossiblyUnknownBits;

            fn $method(self, rhs: &Bits) -> Self::Output {
                self.$bits_method(rhs)
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, and, and_bits);
impl_bit_op!(BitOr, bitor, or, or_bits);
impl_bit_op!(BitXor, bitxor, xor, xor_bits);

impl std::ops::Not for &PossiblyUnknownBits {
    type Output = PossiblyUnknownBits;

    fn not(self) -> Self::Output {
        PossiblyUnknownBits::not(self)
    }
}

impl std::ops::Shl<WidthInt> for &PossiblyUnknownBits {
    type Output = PossiblyUnknownBits;

    fn shl(self, rhs: WidthInt) -> Self::Output {
        PossiblyUnknownBits::shl(self, rhs)
    }
}

impl std::ops::Shr<WidthInt> for &PossiblyUnknownBits {
    type Output = PossiblyUnknownBits;

    fn shr(self, rhs: WidthInt) -> Self::Output {
        PossiblyUnknownBits::shr(self, rhs)
    }
}
