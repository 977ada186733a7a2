// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Slicing and concatenation.

use crate::bv::ops::{shift_amount, widen};
use crate::{Bits, BitsError, RuntimeBits, WidthInt};

impl Bits {
    /// Bits `msb` down to `lsb` as an unsigned value of `msb - lsb + 1` bits.
    pub fn slice(&self, msb: WidthInt, lsb: WidthInt) -> Bits {
        assert!(
            msb < self.width && lsb <= msb,
            "invalid slice [{msb}:{lsb}] of a {} bit value",
            self.width
        );
        self.shr(lsb).resize(msb - lsb + 1).to_unsigned()
    }

    /// `self` becomes the most significant part. The result is unsigned.
    pub fn concat(&self, rhs: &Bits) -> Bits {
        let width = widen(self.width, rhs.width);
        let msb = self.to_unsigned().resize(width).shl(rhs.width);
        msb.or(&rhs.to_unsigned())
    }
}

/// `(value >> lsb) & ((1 << (msb - lsb + 1)) - 1)`
pub fn extract(value: &Bits, msb: WidthInt, lsb: WidthInt) -> Bits {
    value.slice(msb, lsb)
}

/// Extract with a range that is only known at run time. The range must lie inside the width of
/// `value`. The result may be as wide as `value`.
pub fn extract_dyn(value: &Bits, msb: &Bits, lsb: &Bits) -> RuntimeBits {
    let (msb, lsb) = (shift_amount(msb), shift_amount(lsb));
    let slice = value.slice(msb, lsb);
    let width = slice.width();
    RuntimeBits::new(&slice, width, value.width())
}

/// Replaces bits `msb` down to `lsb` of `target` with the low bits of `replacement`.
pub fn insert(target: &Bits, msb: WidthInt, lsb: WidthInt, replacement: &Bits) -> Bits {
    assert!(
        msb < target.width() && lsb <= msb,
        "invalid range [{msb}:{lsb}] of a {} bit value",
        target.width()
    );
    let mask = Bits::ones(msb - lsb + 1).resize(target.width()).shl(lsb);
    let field = replacement
        .to_unsigned()
        .resize(target.width())
        .shl(lsb)
        .and(&mask);
    target.and(&mask.not()).or(&field).with_signedness(target.is_signed())
}

/// Concatenates the values. The first value becomes the most significant part.
pub fn concat(values: &[&Bits]) -> Bits {
    let Some((first, rest)) = values.split_first() else {
        panic!("concat requires at least one value");
    };
    rest.iter()
        .fold(first.to_unsigned(), |acc, value| acc.concat(value))
}

/// Concatenates runtime values. Every width must be known.
pub fn concat_runtime(values: &[&RuntimeBits]) -> Result<RuntimeBits, BitsError> {
    let Some((first, rest)) = values.split_first() else {
        panic!("concat requires at least one value");
    };
    let mut max_width = first.max_width();
    let mut acc = first.to_bits()?.to_unsigned();
    for value in rest {
        acc = acc.concat(&value.to_bits()?);
        max_width = widen(max_width, value.max_width());
    }
    let width = acc.width();
    Ok(RuntimeBits::new(&acc, width, max_width))
}

/// `count` copies of `value`, most significant copy first.
pub fn replicate(value: &Bits, count: WidthInt) -> Bits {
    assert!(count >= 1, "replicate requires at least one copy");
    let value = value.to_unsigned();
    (1..count).fold(value.clone(), |acc, _| acc.concat(&value))
}

/// Interprets the low `first_extended_bit` bits of `value` as a signed number and extends it to
/// `result_width` bits. The result keeps the signedness of `value`.
pub fn sign_extend_from(value: &Bits, first_extended_bit: WidthInt, result_width: WidthInt) -> Bits {
    assert!(
        first_extended_bit >= 1 && first_extended_bit <= value.width(),
        "cannot sign extend from bit {first_extended_bit} of a {} bit value",
        value.width()
    );
    value
        .slice(first_extended_bit - 1, 0)
        .to_signed()
        .resize(result_width)
        .with_signedness(value.is_signed())
}
