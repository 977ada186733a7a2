// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Arithmetic, shift, bitwise and comparison operations on bit-vectors.
//
// Binary operations accept operands of any width and signedness. The result has the width of the
// wider operand and is signed only if both operands are signed. Each operand is first extended
// to the result width according to its own signedness.

use crate::bv::arithmetic::{self, big, ArithOp};
use crate::bv::storage::{Storage, StorageKind};
use crate::{Bits, BitsError, WidthInt, INFINITE_PRECISION};
use num_bigint::BigUint;
use std::cmp::Ordering;

/// Width that is `by` bits wider than `width`, saturating at infinite precision.
#[inline]
pub(crate) fn widen(width: WidthInt, by: WidthInt) -> WidthInt {
    width.saturating_add(by)
}

/// Interprets the value as an unsigned shift amount.
#[inline]
pub(crate) fn shift_amount(amount: &Bits) -> WidthInt {
    if amount.value.bits() > WidthInt::BITS as u64 {
        WidthInt::MAX
    } else {
        amount.value.raw() as WidthInt
    }
}

/// Declares an arithmetic function which follows the mixed-width rule.
macro_rules! declare_arith_bin_fn {
    ($name:ident, $op:expr) => {
        pub fn $name(&self, rhs: &Bits) -> Bits {
            let (width, signed) = self.common_shape(rhs);
            self.arith(rhs, $op, width, signed)
        }
    };
}

/// Declares a bitwise function which follows the mixed-width rule.
macro_rules! declare_bit_arith_bin_fn {
    ($name:ident, $op:tt) => {
        pub fn $name(&self, rhs: &Bits) -> Bits {
            self.bitwise(rhs, |a, b| a $op b, |a, b| a $op b)
        }
    };
}

impl Bits {
    /// Width and signedness of a binary operation on `self` and `rhs`.
    pub(crate) fn common_shape(&self, rhs: &Bits) -> (WidthInt, bool) {
        (self.width.max(rhs.width), self.signed && rhs.signed)
    }

    fn arith(&self, rhs: &Bits, op: ArithOp, width: WidthInt, signed: bool) -> Bits {
        let signed = signed && width != INFINITE_PRECISION;
        let a = self.resize(width);
        let b = rhs.resize(width);
        let value = if StorageKind::from(width).is_native() {
            let out = arithmetic::arith(op, a.value.raw(), b.value.raw(), width, signed);
            Storage::from_u128(out, width)
        } else {
            let out = big::arith(op, &a.value.to_big(), &b.value.to_big(), width, signed);
            Storage::from_big(out, width)
        };
        Bits::from_storage(value, width, signed)
    }

    fn bitwise(
        &self,
        rhs: &Bits,
        op: fn(u128, u128) -> u128,
        big_op: fn(&BigUint, &BigUint) -> BigUint,
    ) -> Bits {
        let (width, signed) = self.common_shape(rhs);
        let a = self.resize(width);
        let b = rhs.resize(width);
        let value = if StorageKind::from(width).is_native() {
            Storage::from_u128(op(a.value.raw(), b.value.raw()), width)
        } else {
            Storage::from_big(big_op(&a.value.to_big(), &b.value.to_big()), width)
        };
        Bits::from_storage(value, width, signed)
    }

    declare_arith_bin_fn!(add, ArithOp::Add);
    declare_arith_bin_fn!(sub, ArithOp::Sub);
    declare_arith_bin_fn!(mul, ArithOp::Mul);

    pub fn div(&self, rhs: &Bits) -> Result<Bits, BitsError> {
        if rhs.is_zero() {
            return Err(BitsError::DivisionByZero);
        }
        let (width, signed) = self.common_shape(rhs);
        Ok(self.arith(rhs, ArithOp::Div, width, signed))
    }

    /// Remainder of the division that truncates towards zero.
    pub fn rem(&self, rhs: &Bits) -> Result<Bits, BitsError> {
        if rhs.is_zero() {
            return Err(BitsError::DivisionByZero);
        }
        let (width, signed) = self.common_shape(rhs);
        Ok(self.arith(rhs, ArithOp::Rem, width, signed))
    }

    /// Addition one bit wider than the wider operand. It cannot overflow.
    pub fn widening_add(&self, rhs: &Bits) -> Bits {
        let (width, signed) = self.common_shape(rhs);
        self.arith(rhs, ArithOp::Add, widen(width, 1), signed)
    }

    /// Subtraction one bit wider than the wider operand. The result is always unsigned, i.e.
    /// `(lhs - rhs) mod 2^(max(M, N) + 1)`.
    pub fn widening_sub(&self, rhs: &Bits) -> Bits {
        let (width, _) = self.common_shape(rhs);
        self.arith(rhs, ArithOp::Sub, widen(width, 1), false)
    }

    /// Multiplication whose width is the sum of the operand widths.
    pub fn widening_mul(&self, rhs: &Bits) -> Bits {
        let signed = self.signed && rhs.signed;
        self.arith(rhs, ArithOp::Mul, widen(self.width, rhs.width), signed)
    }

    /// Left shift by a constant. The result is `SHAMT` bits wider, so no bit is lost.
    pub fn widening_sll<const SHAMT: WidthInt>(&self) -> Bits {
        self.resize(widen(self.width, SHAMT)).shl(SHAMT)
    }

    /// Left shift by a run-time amount. The result has infinite precision.
    pub fn widening_sll_dyn(&self, amount: &Bits) -> Bits {
        self.resize(INFINITE_PRECISION).shl(shift_amount(amount))
    }

    /// Logical left shift. Bits shifted out of the top are discarded.
    pub fn shl(&self, amount: WidthInt) -> Bits {
        let width = self.width;
        let value = match &self.value {
            Storage::Big(v) => Storage::from_big(big::shift_left(v, amount, width), width),
            other => Storage::from_u128(arithmetic::shift_left(other.raw(), amount, width), width),
        };
        Bits::from_storage(value, width, self.signed)
    }

    /// Logical right shift.
    pub fn shr(&self, amount: WidthInt) -> Bits {
        let width = self.width;
        let value = match &self.value {
            Storage::Big(v) => Storage::from_big(big::shift_right(v, amount, width), width),
            other => Storage::from_u128(arithmetic::shift_right(other.raw(), amount, width), width),
        };
        Bits::from_storage(value, width, self.signed)
    }

    /// Arithmetic right shift. Fills with bit `width - 1`. Shifting by the width or more yields
    /// all ones for negative signed values and zero otherwise.
    pub fn sra(&self, amount: WidthInt) -> Bits {
        let (width, signed) = (self.width, self.signed);
        let value = match &self.value {
            Storage::Big(v) => Storage::from_big(
                big::arithmetic_shift_right(v, amount, width, signed),
                width,
            ),
            other => Storage::from_u128(
                arithmetic::arithmetic_shift_right(other.raw(), amount, width, signed),
                width,
            ),
        };
        Bits::from_storage(value, width, signed)
    }

    pub fn shift_left(&self, rhs: &Bits) -> Bits {
        self.shl(shift_amount(rhs))
    }

    pub fn shift_right(&self, rhs: &Bits) -> Bits {
        self.shr(shift_amount(rhs))
    }

    pub fn arithmetic_shift_right(&self, rhs: &Bits) -> Bits {
        self.sra(shift_amount(rhs))
    }

    declare_bit_arith_bin_fn!(and, &);
    declare_bit_arith_bin_fn!(or, |);
    declare_bit_arith_bin_fn!(xor, ^);

    pub fn not(&self) -> Bits {
        assert!(!self.is_infinite(), "cannot invert an infinite precision value");
        let width = self.width;
        let value = match &self.value {
            Storage::Big(v) => Storage::Big(v ^ big::mask(width)),
            other => Storage::from_u128(!other.raw() & arithmetic::mask(width), width),
        };
        Bits::from_storage(value, width, self.signed)
    }

    /// Two's complement negation in the same width.
    pub fn negate(&self) -> Bits {
        assert!(!self.is_infinite(), "cannot negate an infinite precision value");
        Bits::zero(self.width)
            .with_signedness(self.signed)
            .sub(self)
            .with_signedness(self.signed)
    }

    /// Compares the values after extending both to the wider width. The comparison is signed iff
    /// both operands are signed.
    pub fn cmp_value(&self, rhs: &Bits) -> Ordering {
        let (width, signed) = self.common_shape(rhs);
        let a = self.resize(width);
        let b = rhs.resize(width);
        if StorageKind::from(width).is_native() {
            arithmetic::cmp(a.value.raw(), b.value.raw(), width, signed)
        } else {
            big::cmp(&a.value.to_big(), &b.value.to_big(), width, signed)
        }
    }

    pub fn is_equal(&self, rhs: &Bits) -> bool {
        self.cmp_value(rhs) == Ordering::Equal
    }

    pub fn is_not_equal(&self, rhs: &Bits) -> bool {
        !self.is_equal(rhs)
    }

    pub fn is_greater(&self, rhs: &Bits) -> bool {
        self.cmp_value(rhs) == Ordering::Greater
    }

    pub fn is_greater_or_equal(&self, rhs: &Bits) -> bool {
        self.cmp_value(rhs) != Ordering::Less
    }

    pub fn is_less(&self, rhs: &Bits) -> bool {
        // a < b <=> b > a
        rhs.is_greater(self)
    }

    pub fn is_less_or_equal(&self, rhs: &Bits) -> bool {
        // a <= b <=> b >= a
        rhs.is_greater_or_equal(self)
    }

    /// `++x`: returns the incremented value.
    pub fn pre_increment(&mut self) -> Bits {
        let out = self.add(&Bits::from_u64(1, self.width));
        self.assign(&out);
        self.clone()
    }

    /// `x++`: returns the value before the increment.
    pub fn post_increment(&mut self) -> Bits {
        let old = self.clone();
        self.pre_increment();
        old
    }

    /// `--x`: returns the decremented value.
    pub fn pre_decrement(&mut self) -> Bits {
        let out = self.sub(&Bits::from_u64(1, self.width));
        self.assign(&out);
        self.clone()
    }

    /// `x--`: returns the value before the decrement.
    pub fn post_decrement(&mut self) -> Bits {
        let old = self.clone();
        self.pre_decrement();
        old
    }

    /// `x /= rhs`, truncated to the width of `x`.
    pub fn div_assign(&mut self, rhs: &Bits) -> Result<(), BitsError> {
        let out = Bits::div(self, rhs)?;
        self.assign(&out);
        Ok(())
    }

    /// `x %= rhs`, truncated to the width of `x`.
    pub fn rem_assign(&mut self, rhs: &Bits) -> Result<(), BitsError> {
        let out = Bits::rem(self, rhs)?;
        self.assign(&out);
        Ok(())
    }
}

/// Implements a binary operator and its compound assignment. The compound form truncates the
/// result to the width of the left-hand side.
macro_rules! impl_bin_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        paste::paste! {
            impl std::ops::$trait<&Bits> for &Bits {
                type Output = Bits;

                fn $method(self, rhs: &Bits) -> Self::Output {
                    Bits::$inherent(self, rhs)
                }
            }

            impl std::ops::$trait for Bits {
                type Output = Bits;

                fn $method(self, rhs: Bits) -> Self::Output {
                    Bits::$inherent(&self, &rhs)
                }
            }

            impl std::ops::[<$trait Assign>]<&Bits> for Bits {
                fn [<$method _assign>](&mut self, rhs: &Bits) {
                    let out = Bits::$inherent(self, rhs);
                    self.assign(&out);
                }
            }
        }
    };
}

impl_bin_op!(Add, add, add);
impl_bin_op!(Sub, sub, sub);
impl_bin_op!(Mul, mul, mul);
impl_bin_op!(BitAnd, bitand, and);
impl_bin_op!(BitOr, bitor, or);
impl_bin_op!(BitXor, bitxor, xor);

impl std::ops::Not for &Bits {
    type Output = Bits;

    fn not(self) -> Self::Output {
        Bits::not(self)
    }
}

impl std::ops::Not for Bits {
    type Output = Bits;

    fn not(self) -> Self::Output {
        Bits::not(&self)
    }
}

impl std::ops::Neg for &Bits {
    type Output = Bits;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Shl<WidthInt> for &Bits {
    type Output = Bits;

    fn shl(self, rhs: WidthInt) -> Self::Output {
        Bits::shl(self, rhs)
    }
}

impl std::ops::Shr<WidthInt> for &Bits {
    type Output = Bits;

    fn shr(self, rhs: WidthInt) -> Self::Output {
        Bits::shr(self, rhs)
    }
}

impl std::ops::Shl<&Bits> for &Bits {
    type Output = Bits;

    fn shl(self, rhs: &Bits) -> Self::Output {
        self.shift_left(rhs)
    }
}

impl std::ops::Shr<&Bits> for &Bits {
    type Output = Bits;

    fn shr(self, rhs: &Bits) -> Self::Output {
        self.shift_right(rhs)
    }
}

impl std::ops::ShlAssign<WidthInt> for Bits {
    fn shl_assign(&mut self, rhs: WidthInt) {
        *self = Bits::shl(self, rhs);
    }
}

impl std::ops::ShrAssign<WidthInt> for Bits {
    fn shr_assign(&mut self, rhs: WidthInt) {
        *self = Bits::shr(self, rhs);
    }
}
