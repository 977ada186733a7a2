// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Values whose width is only known at run time.
//
// A runtime value is bounded by a maximum width. While its width is undetermined the value is
// stored masked to that maximum. Logical shifts and bitwise operations still work in that state,
// everything that depends on the width fails with `BitsError::UndefinedWidth`.

use crate::bv::ops::shift_amount;
use crate::{Bits, BitsError, PossiblyUnknownBits, WidthInt};
use std::cmp::Ordering;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RuntimeBits {
    max_width: WidthInt,
    width: Option<WidthInt>,
    /// `width` bits wide if the width is known, `max_width` bits otherwise
    value: Bits,
}

impl From<Bits> for RuntimeBits {
    fn from(value: Bits) -> Self {
        Self {
            max_width: value.width(),
            width: Some(value.width()),
            value,
        }
    }
}

impl From<&Bits> for RuntimeBits {
    fn from(value: &Bits) -> Self {
        Self::from(value.clone())
    }
}

impl RuntimeBits {
    /// A value of known `width`. `value` is truncated or extended to that width.
    pub fn new(value: &Bits, width: WidthInt, max_width: WidthInt) -> Self {
        assert!(
            width <= max_width,
            "width {width} exceeds the maximum width {max_width}"
        );
        Self {
            max_width,
            width: Some(width),
            value: value.resize(width),
        }
    }

    /// A value whose width has not been determined yet.
    pub fn with_undetermined_width(value: &Bits, max_width: WidthInt) -> Self {
        Self {
            max_width,
            width: None,
            value: value.resize(max_width),
        }
    }

    pub fn max_width(&self) -> WidthInt {
        self.max_width
    }

    pub fn width(&self) -> Result<WidthInt, BitsError> {
        self.width.ok_or(BitsError::UndefinedWidth)
    }

    pub fn is_width_known(&self) -> bool {
        self.width.is_some()
    }

    pub fn is_signed(&self) -> bool {
        self.value.is_signed()
    }

    /// Determines the width. The value is truncated or extended to it.
    pub fn set_width(&mut self, width: WidthInt) {
        assert!(
            width <= self.max_width,
            "width {width} exceeds the maximum width {}",
            self.max_width
        );
        self.width = Some(width);
        self.value = self.value.resize(width);
    }

    /// The stored pattern. It is `max_width` bits wide while the width is undetermined.
    pub fn value(&self) -> &Bits {
        &self.value
    }

    pub fn to_bits(&self) -> Result<Bits, BitsError> {
        self.known().cloned()
    }

    fn known(&self) -> Result<&Bits, BitsError> {
        if self.width.is_some() {
            Ok(&self.value)
        } else {
            Err(BitsError::UndefinedWidth)
        }
    }

    pub fn to_u64(&self) -> Result<u64, BitsError> {
        Ok(self.known()?.as_u64())
    }

    pub fn to_i64(&self) -> Result<i64, BitsError> {
        Ok(self.known()?.as_i64())
    }

    pub fn with_signedness(&self, signed: bool) -> Self {
        Self {
            max_width: self.max_width,
            width: self.width,
            value: self.value.with_signedness(signed),
        }
    }

    fn known_op(
        &self,
        rhs: &RuntimeBits,
        op: impl FnOnce(&Bits, &Bits) -> Result<Bits, BitsError>,
    ) -> Result<Self, BitsError> {
        let value = op(self.known()?, rhs.known()?)?;
        let max_width = self.max_width.max(rhs.max_width).max(value.width());
        Ok(Self {
            max_width,
            width: Some(value.width()),
            value,
        })
    }

    pub fn add(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.add(b)))
    }

    pub fn sub(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.sub(b)))
    }

    pub fn mul(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.mul(b)))
    }

    pub fn div(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, Bits::div)
    }

    pub fn rem(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, Bits::rem)
    }

    pub fn widening_add(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.widening_add(b)))
    }

    pub fn widening_sub(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.widening_sub(b)))
    }

    pub fn widening_mul(&self, rhs: &RuntimeBits) -> Result<Self, BitsError> {
        self.known_op(rhs, |a, b| Ok(a.widening_mul(b)))
    }

    fn map_known(&self, f: impl FnOnce(&Bits) -> Bits) -> Result<Self, BitsError> {
        let value = f(self.known()?);
        Ok(Self {
            max_width: self.max_width.max(value.width()),
            width: Some(value.width()),
            value,
        })
    }

    pub fn not(&self) -> Result<Self, BitsError> {
        self.map_known(Bits::not)
    }

    pub fn negate(&self) -> Result<Self, BitsError> {
        self.map_known(Bits::negate)
    }

    pub fn sra(&self, amount: WidthInt) -> Result<Self, BitsError> {
        self.map_known(|v| v.sra(amount))
    }

    pub fn resize(&self, width: WidthInt) -> Result<Self, BitsError> {
        self.map_known(|v| v.resize(width))
    }

    pub fn sign_extend(&self, by: WidthInt) -> Result<Self, BitsError> {
        self.map_known(|v| v.sign_extend(by))
    }

    pub fn zero_extend(&self, by: WidthInt) -> Result<Self, BitsError> {
        self.map_known(|v| v.zero_extend(by))
    }

    /// Shifts within the current representation. An undetermined width stays undetermined.
    fn map_pattern(&self, f: impl FnOnce(&Bits) -> Bits) -> Self {
        Self {
            max_width: self.max_width,
            width: self.width,
            value: f(&self.value),
        }
    }

    pub fn shl(&self, amount: WidthInt) -> Self {
        self.map_pattern(|v| v.shl(amount))
    }

    pub fn shr(&self, amount: WidthInt) -> Self {
        self.map_pattern(|v| v.shr(amount))
    }

    pub fn shift_left(&self, amount: &Bits) -> Self {
        self.shl(shift_amount(amount))
    }

    pub fn shift_right(&self, amount: &Bits) -> Self {
        self.shr(shift_amount(amount))
    }

    pub fn arithmetic_shift_right(&self, amount: &Bits) -> Result<Self, BitsError> {
        self.sra(shift_amount(amount))
    }

    /// Bitwise operations on values of undetermined width work on the `max_width`
    /// representation and produce a value of undetermined width.
    fn bitwise(&self, rhs: &RuntimeBits, op: impl FnOnce(&Bits, &Bits) -> Bits) -> Self {
        let value = op(&self.value, &rhs.value);
        let max_width = self.max_width.max(rhs.max_width).max(value.width());
        let (width, value) = match (self.width, rhs.width) {
            (Some(_), Some(_)) => (Some(value.width()), value),
            _ => (None, value.resize(max_width)),
        };
        Self {
            max_width,
            width,
            value,
        }
    }

    pub fn and(&self, rhs: &RuntimeBits) -> Self {
        self.bitwise(rhs, Bits::and)
    }

    pub fn or(&self, rhs: &RuntimeBits) -> Self {
        self.bitwise(rhs, Bits::or)
    }

    pub fn xor(&self, rhs: &RuntimeBits) -> Self {
        self.bitwise(rhs, Bits::xor)
    }

    /// Signed comparisons need both widths. Unsigned comparisons fall back to the stored
    /// patterns.
    pub fn cmp_value(&self, rhs: &RuntimeBits) -> Result<Ordering, BitsError> {
        if self.is_signed() && rhs.is_signed() {
            Ok(self.known()?.cmp_value(rhs.known()?))
        } else {
            Ok(self.value.to_unsigned().cmp_value(&rhs.value.to_unsigned()))
        }
    }

    pub fn is_equal(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Equal)
    }

    pub fn is_not_equal(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Equal)
    }

    pub fn is_less(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Less)
    }

    pub fn is_less_or_equal(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Greater)
    }

    pub fn is_greater(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Greater)
    }

    pub fn is_greater_or_equal(&self, rhs: &RuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Less)
    }
}

/// A runtime-width value in which some bits may be unknown.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct PossiblyUnknownRuntimeBits {
    value: RuntimeBits,
    /// unsigned and as wide as `value.value()`
    unknown_mask: Bits,
}

impl From<RuntimeBits> for PossiblyUnknownRuntimeBits {
    fn from(value: RuntimeBits) -> Self {
        let unknown_mask = Bits::zero(value.value.width());
        Self {
            value,
            unknown_mask,
        }
    }
}

impl From<PossiblyUnknownBits> for PossiblyUnknownRuntimeBits {
    fn from(value: PossiblyUnknownBits) -> Self {
        Self {
            value: RuntimeBits::from(value.value().clone()),
            unknown_mask: value.unknown_mask().clone(),
        }
    }
}

impl From<Bits> for PossiblyUnknownRuntimeBits {
    fn from(value: Bits) -> Self {
        RuntimeBits::from(value).into()
    }
}

impl PossiblyUnknownRuntimeBits {
    /// The mask is truncated or zero extended to the representation of `value`.
    pub fn new(value: RuntimeBits, unknown_mask: &Bits) -> Self {
        let unknown_mask = unknown_mask.to_unsigned().resize(value.value.width());
        Self {
            value,
            unknown_mask,
        }
    }

    pub fn runtime_value(&self) -> &RuntimeBits {
        &self.value
    }

    pub fn unknown_mask(&self) -> &Bits {
        &self.unknown_mask
    }

    pub fn width(&self) -> Result<WidthInt, BitsError> {
        self.value.width()
    }

    pub fn max_width(&self) -> WidthInt {
        self.value.max_width()
    }

    pub fn is_defined(&self) -> bool {
        self.unknown_mask.is_zero()
    }

    pub fn is_signed(&self) -> bool {
        self.value.is_signed()
    }

    pub fn with_signedness(&self, signed: bool) -> Self {
        Self {
            value: self.value.with_signedness(signed),
            unknown_mask: self.unknown_mask.clone(),
        }
    }

    pub fn set_width(&mut self, width: WidthInt) {
        self.value.set_width(width);
        self.unknown_mask = self.unknown_mask.resize(width);
    }

    pub fn to_runtime_bits(&self) -> Result<RuntimeBits, BitsError> {
        if self.is_defined() {
            Ok(self.value.clone())
        } else {
            log::debug!(
                "runtime value has unknown bits {:#x}",
                self.unknown_mask
            );
            Err(BitsError::UndefinedValue {
                unknown_mask: self.unknown_mask.clone(),
            })
        }
    }

    pub fn to_possibly_unknown_bits(&self) -> Result<PossiblyUnknownBits, BitsError> {
        Ok(PossiblyUnknownBits::new(
            self.value.to_bits()?,
            self.unknown_mask.clone(),
        ))
    }

    pub fn to_bits(&self) -> Result<Bits, BitsError> {
        self.to_runtime_bits()?.to_bits()
    }

    fn defined_op(
        &self,
        rhs: &PossiblyUnknownRuntimeBits,
        op: impl FnOnce(&RuntimeBits, &RuntimeBits) -> Result<RuntimeBits, BitsError>,
    ) -> Result<Self, BitsError> {
        Ok(op(&self.to_runtime_bits()?, &rhs.to_runtime_bits()?)?.into())
    }

    pub fn add(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::add)
    }

    pub fn sub(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::sub)
    }

    pub fn mul(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::mul)
    }

    pub fn div(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::div)
    }

    pub fn rem(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::rem)
    }

    pub fn widening_add(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::widening_add)
    }

    pub fn widening_sub(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::widening_sub)
    }

    pub fn widening_mul(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Self, BitsError> {
        self.defined_op(rhs, RuntimeBits::widening_mul)
    }

    pub fn negate(&self) -> Result<Self, BitsError> {
        Ok(self.to_runtime_bits()?.negate()?.into())
    }

    /// Unknown lanes stay unknown.
    pub fn not(&self) -> Result<Self, BitsError> {
        Ok(Self {
            value: self.value.not()?,
            unknown_mask: self.unknown_mask.clone(),
        })
    }

    pub fn cmp_value(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<Ordering, BitsError> {
        self.to_runtime_bits()?.cmp_value(&rhs.to_runtime_bits()?)
    }

    pub fn is_equal(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Equal)
    }

    pub fn is_not_equal(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Equal)
    }

    pub fn is_less(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Less)
    }

    pub fn is_less_or_equal(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Greater)
    }

    pub fn is_greater(&self, rhs: &PossiblyUnknownRuntimeBits) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? == Ordering::Greater)
    }

    pub fn is_greater_or_equal(
        &self,
        rhs: &PossiblyUnknownRuntimeBits,
    ) -> Result<bool, BitsError> {
        Ok(self.cmp_value(rhs)? != Ordering::Less)
    }

    pub fn shl(&self, amount: WidthInt) -> Self {
        Self::new(self.value.shl(amount), &self.unknown_mask.shl(amount))
    }

    pub fn shr(&self, amount: WidthInt) -> Self {
        Self::new(self.value.shr(amount), &self.unknown_mask.shr(amount))
    }

    /// Arithmetic right shift. An unknown sign bit makes every filled bit unknown.
    pub fn sra(&self, amount: WidthInt) -> Result<Self, BitsError> {
        let value = self.value.sra(amount)?;
        let unknown_mask = self
            .unknown_mask
            .with_signedness(self.value.is_signed())
            .sra(amount)
            .to_unsigned();
        Ok(Self::new(value, &unknown_mask))
    }

    /// The shift amount must be fully defined.
    pub fn shift_left(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.shl(shift_amount(&amount.to_bits()?)))
    }

    /// The shift amount must be fully defined.
    pub fn shift_right(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        Ok(self.shr(shift_amount(&amount.to_bits()?)))
    }

    /// The shift amount must be fully defined.
    pub fn arithmetic_shift_right(&self, amount: &PossiblyUnknownBits) -> Result<Self, BitsError> {
        self.sra(shift_amount(&amount.to_bits()?))
    }

    fn mask_like(&self, value: &RuntimeBits) -> Bits {
        self.unknown_mask.resize(value.value.width())
    }

    pub fn and(&self, rhs: &PossiblyUnknownRuntimeBits) -> Self {
        let value = self.value.and(&rhs.value);
        let mask = self.mask_like(&value).and(&rhs.mask_like(&value));
        Self::new(value, &mask)
    }

    pub fn or(&self, rhs: &PossiblyUnknownRuntimeBits) -> Self {
        let value = self.value.or(&rhs.value);
        let mask = self.mask_like(&value).or(&rhs.mask_like(&value));
        Self::new(value, &mask)
    }

    pub fn xor(&self, rhs: &PossiblyUnknownRuntimeBits) -> Self {
        let value = self.value.xor(&rhs.value);
        let mask = self.mask_like(&value).or(&rhs.mask_like(&value));
        Self::new(value, &mask)
    }
}
