// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// basic arithmetic implementations
//
// Native kernels compute on `u128` and mask the result to the declared width. The `big` kernels
// compute on `num_bigint` integers for widths above 128 bits and for the infinite precision width.

use crate::WidthInt;
use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Returns a value with the lowest `bits` bits set.
#[inline]
pub fn mask(bits: WidthInt) -> u128 {
    if bits >= u128::BITS {
        u128::MAX
    } else {
        ((1 as u128) << bits) - 1
    }
}

#[inline]
pub(crate) fn is_neg(value: u128, width: WidthInt) -> bool {
    debug_assert!(width > 0 && width <= u128::BITS);
    (value >> (width - 1)) & 1 == 1
}

/// Two's complement interpretation of the lowest `width` bits.
#[inline]
pub(crate) fn to_signed(value: u128, width: WidthInt) -> i128 {
    debug_assert!(width > 0 && width <= u128::BITS);
    let shift = u128::BITS - width;
    ((value << shift) as i128) >> shift
}

/// Division and remainder expect a non-zero divisor.
#[inline]
pub(crate) fn arith(op: ArithOp, a: u128, b: u128, width: WidthInt, signed: bool) -> u128 {
    debug_assert!(!matches!(op, ArithOp::Div | ArithOp::Rem) || b != 0);
    let out = match op {
        ArithOp::Add => a.wrapping_add(b),
        ArithOp::Sub => a.wrapping_sub(b),
        // the lower bits of a product do not depend on the signedness
        ArithOp::Mul => a.wrapping_mul(b),
        // INT_MIN / -1 wraps around to INT_MIN
        ArithOp::Div if signed => to_signed(a, width).wrapping_div(to_signed(b, width)) as u128,
        ArithOp::Div => a / b,
        ArithOp::Rem if signed => to_signed(a, width).wrapping_rem(to_signed(b, width)) as u128,
        ArithOp::Rem => a % b,
    };
    out & mask(width)
}

#[inline]
pub(crate) fn shift_left(a: u128, amount: WidthInt, width: WidthInt) -> u128 {
    if amount >= width {
        0
    } else {
        (a << amount) & mask(width)
    }
}

#[inline]
pub(crate) fn shift_right(a: u128, amount: WidthInt, width: WidthInt) -> u128 {
    if amount >= width {
        0
    } else {
        a >> amount
    }
}

/// Fills with bit `width - 1`. Shifting by `width` or more yields all ones only for negative
/// signed values.
#[inline]
pub(crate) fn arithmetic_shift_right(
    a: u128,
    amount: WidthInt,
    width: WidthInt,
    signed: bool,
) -> u128 {
    if amount >= width {
        if signed && is_neg(a, width) {
            mask(width)
        } else {
            0
        }
    } else {
        ((to_signed(a, width) >> amount) as u128) & mask(width)
    }
}

#[inline]
pub(crate) fn cmp(a: u128, b: u128, width: WidthInt, signed: bool) -> Ordering {
    if signed {
        to_signed(a, width).cmp(&to_signed(b, width))
    } else {
        a.cmp(&b)
    }
}

pub(crate) mod big {
    use super::ArithOp;
    use crate::{WidthInt, INFINITE_PRECISION};
    use num_bigint::{BigInt, BigUint, Sign};
    use std::cmp::Ordering;

    #[inline]
    pub(crate) fn mask(bits: WidthInt) -> BigUint {
        (BigUint::from(1u8) << bits) - 1u8
    }

    #[inline]
    pub(crate) fn is_neg(value: &BigUint, width: WidthInt) -> bool {
        debug_assert_ne!(width, INFINITE_PRECISION);
        value.bit(width as u64 - 1)
    }

    pub(crate) fn to_signed(value: &BigUint, width: WidthInt) -> BigInt {
        let out = BigInt::from(value.clone());
        if is_neg(value, width) {
            out - (BigInt::from(1u8) << width)
        } else {
            out
        }
    }

    /// Reduces modulo `2^width` into the unsigned two's complement pattern.
    pub(crate) fn from_signed(value: BigInt, width: WidthInt) -> BigUint {
        let modulus = BigInt::from(1u8) << width;
        let rem = value % &modulus;
        let rem = if rem.sign() == Sign::Minus {
            rem + modulus
        } else {
            rem
        };
        rem.magnitude().clone()
    }

    /// Division and remainder expect a non-zero divisor.
    pub(crate) fn arith(
        op: ArithOp,
        a: &BigUint,
        b: &BigUint,
        width: WidthInt,
        signed: bool,
    ) -> BigUint {
        if width == INFINITE_PRECISION {
            // no mask is ever applied
            return match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => {
                    assert!(a >= b, "infinite precision values cannot become negative");
                    a - b
                }
                ArithOp::Mul => a * b,
                ArithOp::Div => a / b,
                ArithOp::Rem => a % b,
            };
        }
        let (a, b) = if signed {
            (to_signed(a, width), to_signed(b, width))
        } else {
            (BigInt::from(a.clone()), BigInt::from(b.clone()))
        };
        // BigInt division truncates towards zero and the remainder takes the sign of `a`
        let out = match op {
            ArithOp::Add => &a + &b,
            ArithOp::Sub => &a - &b,
            ArithOp::Mul => &a * &b,
            ArithOp::Div => &a / &b,
            ArithOp::Rem => &a % &b,
        };
        from_signed(out, width)
    }

    pub(crate) fn shift_left(a: &BigUint, amount: WidthInt, width: WidthInt) -> BigUint {
        if width == INFINITE_PRECISION {
            a << amount
        } else if amount >= width {
            BigUint::default()
        } else {
            (a << amount) & mask(width)
        }
    }

    pub(crate) fn shift_right(a: &BigUint, amount: WidthInt, width: WidthInt) -> BigUint {
        if width != INFINITE_PRECISION && amount >= width {
            BigUint::default()
        } else {
            a >> amount
        }
    }

    pub(crate) fn arithmetic_shift_right(
        a: &BigUint,
        amount: WidthInt,
        width: WidthInt,
        signed: bool,
    ) -> BigUint {
        if width == INFINITE_PRECISION {
            return a >> amount;
        }
        if amount >= width {
            if signed && is_neg(a, width) {
                mask(width)
            } else {
                BigUint::default()
            }
        } else if is_neg(a, width) {
            (a >> amount) | (mask(width) ^ mask(width - amount))
        } else {
            a >> amount
        }
    }

    pub(crate) fn cmp(a: &BigUint, b: &BigUint, width: WidthInt, signed: bool) -> Ordering {
        if signed && width != INFINITE_PRECISION {
            to_signed(a, width).cmp(&to_signed(b, width))
        } else {
            a.cmp(b)
        }
    }
}
