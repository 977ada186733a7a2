// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// General purpose integer registers. Writes to a hard-wired zero register (x0 on RISC-V) are
// discarded, so generated instruction code never needs to check the destination index.

use crate::{Bits, BitsError, WidthInt};
use std::ops::{Deref, Index};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum RegisterPolicy {
    #[default]
    Normal,
    /// Every write is discarded and the value stays zero.
    HardwiredZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XRegister {
    value: Bits,
    policy: RegisterPolicy,
}

impl XRegister {
    pub fn new(xlen: WidthInt) -> Self {
        Self {
            value: Bits::zero(xlen),
            policy: RegisterPolicy::Normal,
        }
    }

    pub fn from_bits(value: Bits) -> Self {
        Self {
            value,
            policy: RegisterPolicy::Normal,
        }
    }

    /// Turns the register into a hard-wired zero register. There is no way back.
    pub fn make_zero_reg(&mut self) {
        self.value = Bits::zero(self.value.width()).with_signedness(self.value.is_signed());
        self.policy = RegisterPolicy::HardwiredZero;
    }

    pub fn is_zero_reg(&self) -> bool {
        self.policy == RegisterPolicy::HardwiredZero
    }

    pub fn policy(&self) -> RegisterPolicy {
        self.policy
    }

    pub fn xlen(&self) -> WidthInt {
        self.value.width()
    }

    pub fn value(&self) -> &Bits {
        &self.value
    }

    /// Applies a write unless the register is hard-wired to zero.
    fn write_with(&mut self, f: impl FnOnce(&Bits) -> Bits) {
        match self.policy {
            RegisterPolicy::Normal => {
                let value = f(&self.value);
                self.value.assign(&value);
            }
            RegisterPolicy::HardwiredZero => {
                log::trace!("discarding write to hard-wired zero register");
            }
        }
    }

    /// Like `write_with`, for operations that may fail. Errors are reported even if the register
    /// is hard-wired to zero.
    fn try_write_with(
        &mut self,
        f: impl FnOnce(&Bits) -> Result<Bits, BitsError>,
    ) -> Result<(), BitsError> {
        let value = f(&self.value)?;
        self.write_with(|_| value);
        Ok(())
    }

    /// Stores `value` truncated or extended to the register width.
    pub fn assign(&mut self, value: &Bits) {
        self.write_with(|_| value.clone());
    }

    pub fn set_bit(&mut self, pos: WidthInt, value: bool) {
        self.write_with(|v| {
            let mut out = v.clone();
            out.set_bit(pos, value);
            out
        });
    }

    pub fn add_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.add(rhs));
    }

    pub fn sub_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.sub(rhs));
    }

    pub fn mul_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.mul(rhs));
    }

    pub fn div_assign(&mut self, rhs: &Bits) -> Result<(), BitsError> {
        self.try_write_with(|v| v.div(rhs))
    }

    pub fn rem_assign(&mut self, rhs: &Bits) -> Result<(), BitsError> {
        self.try_write_with(|v| v.rem(rhs))
    }

    pub fn and_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.and(rhs));
    }

    pub fn or_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.or(rhs));
    }

    pub fn xor_assign(&mut self, rhs: &Bits) {
        self.write_with(|v| v.xor(rhs));
    }

    pub fn shl_assign(&mut self, amount: &Bits) {
        self.write_with(|v| v.shift_left(amount));
    }

    pub fn shr_assign(&mut self, amount: &Bits) {
        self.write_with(|v| v.shift_right(amount));
    }

    pub fn sra_assign(&mut self, amount: &Bits) {
        self.write_with(|v| v.arithmetic_shift_right(amount));
    }

    /// `++x`
    pub fn pre_increment(&mut self) -> Bits {
        self.write_with(|v| v.add(&Bits::from_u64(1, v.width())));
        self.value.clone()
    }

    /// `x++`
    pub fn post_increment(&mut self) -> Bits {
        let old = self.value.clone();
        self.pre_increment();
        old
    }

    /// `--x`
    pub fn pre_decrement(&mut self) -> Bits {
        self.write_with(|v| v.sub(&Bits::from_u64(1, v.width())));
        self.value.clone()
    }

    /// `x--`
    pub fn post_decrement(&mut self) -> Bits {
        let old = self.value.clone();
        self.pre_decrement();
        old
    }
}

impl Deref for XRegister {
    type Target = Bits;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Number of integer registers of RV32I and RV64I.
pub const NUM_XREGS: usize = 32;

/// The integer register file. `x0` is hard-wired to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRegisterFile {
    regs: Vec<XRegister>,
}

impl XRegisterFile {
    pub fn new(xlen: WidthInt) -> Self {
        let mut regs = vec![XRegister::new(xlen); NUM_XREGS];
        regs[0].make_zero_reg();
        Self { regs }
    }

    pub fn xlen(&self) -> WidthInt {
        self.regs[0].xlen()
    }

    pub fn read(&self, index: usize) -> &Bits {
        self.regs[index].value()
    }

    /// Writes to `x0` are discarded.
    pub fn write(&mut self, index: usize, value: &Bits) {
        self.regs[index].assign(value);
    }

    pub fn get_mut(&mut self, index: usize) -> &mut XRegister {
        &mut self.regs[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &XRegister> {
        self.regs.iter()
    }
}

impl Index<usize> for XRegisterFile {
    type Output = XRegister;

    fn index(&self, index: usize) -> &Self::Output {
        &self.regs[index]
    }
}
