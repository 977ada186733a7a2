// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Integer registers and bitfields, used the way instruction implementations use them.

use idl_bits::*;
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// fields of the `mstatus` CSR
const MSTATUS_MIE: BitfieldMember = BitfieldMember::new(64, 3, 1);
const MSTATUS_MPP: BitfieldMember = BitfieldMember::new(64, 11, 2);
const MSTATUS_UXL: BitfieldMember = BitfieldMember::new(64, 32, 2);

/// `rd = rs1 + imm`, where `imm` is a sign-extended 12 bit immediate.
fn addi(regs: &mut XRegisterFile, rd: usize, rs1: usize, imm: u64) {
    let imm = sign_extend_from(&Bits::from_u64(imm, 12), 12, regs.xlen());
    let value = regs.read(rs1).add(&imm);
    regs.write(rd, &value);
}

#[test]
fn test_addi() {
    init_logger();
    let mut regs = XRegisterFile::new(32);
    addi(&mut regs, 1, 0, 0x7ff);
    assert_eq!(regs.read(1).as_u64(), 0x7ff);
    // -1
    addi(&mut regs, 2, 1, 0xfff);
    assert_eq!(regs.read(2).as_u64(), 0x7fe);
    addi(&mut regs, 3, 0, 0x800);
    assert_eq!(regs.read(3).to_signed().as_i64(), -2048);
    // writes to x0 are discarded
    addi(&mut regs, 0, 3, 1);
    assert!(regs.read(0).is_zero());
}

#[test]
fn test_register_scenarios() {
    init_logger();
    let mut x = XRegister::from_bits(Bits::from_u64(3786086356, 32));
    x.add_assign(&Bits::from_u64(166095605, 32));
    assert_eq!(x.as_u64(), 3952181961);
    let mut y = XRegister::from_bits(Bits::from_u64(3237427776, 32));
    y.add_assign(&Bits::from_u64(2320471351, 32));
    assert_eq!(y.as_u64(), 1262931831);
    // wider operands are truncated to xlen
    y.assign(&Bits::ones(64));
    assert_eq!(y.as_u64(), u32::MAX as u64);
    y.sra_assign(&Bits::from_u64(4, 5));
    assert_eq!(y.as_u64(), u32::MAX as u64);
}

#[test]
fn test_csr_fields() {
    let mut mstatus = Bitfield::new(64);
    MSTATUS_MPP.write(&mut mstatus, &Bits::from_u64(0b11, 2));
    MSTATUS_UXL.write(&mut mstatus, &Bits::from_u64(2, 2));
    mstatus.member_mut(MSTATUS_MIE).set(&Bits::tru());
    assert_eq!(mstatus.value().as_u64(), (2 << 32) | (0b11 << 11) | (1 << 3));
    assert!(mstatus.member(MSTATUS_MIE).get().is_true());
    assert_eq!(MSTATUS_MPP.read(&mstatus).as_u64(), 0b11);
    // clearing one field leaves the others alone
    mstatus.member_mut(MSTATUS_MPP).set(&Bits::zero(2));
    assert_eq!(mstatus.value().as_u64(), (2 << 32) | (1 << 3));
    assert_eq!(MSTATUS_MIE.msb(), 3);
    assert_eq!(MSTATUS_UXL.msb(), 33);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn test_zero_register_stays_zero(values in prop::collection::vec(any::<u64>(), 1..20)) {
        init_logger();
        let mut regs = XRegisterFile::new(64);
        for value in &values {
            let value = Bits::from_u64(*value, 64);
            regs.write(0, &value);
            regs.get_mut(0).add_assign(&value);
            regs.get_mut(0).xor_assign(&value);
            regs.get_mut(0).post_increment();
            prop_assert!(regs.read(0).is_zero());
        }
    }

    #[test]
    fn test_member_write_then_read(start in 0..63u32, size in 1..64u32, parent in any::<u64>(), value in any::<u64>()) {
        let size = size.min(64 - start);
        let member = BitfieldMember::new(64, start, size);
        let mut reg = Bitfield::from_bits(Bits::from_u64(parent, 64));
        member.write(&mut reg, &Bits::from_u64(value, 64));
        let mask = if size == 64 { u64::MAX } else { (1u64 << size) - 1 };
        prop_assert_eq!(member.read(&reg).as_u64(), value & mask);
        let outside = !(mask << start);
        prop_assert_eq!(reg.value().as_u64() & outside, parent & outside);
    }
}
