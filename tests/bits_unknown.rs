// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Propagation of unknown bits.

use idl_bits::*;
use proptest::prelude::*;

fn pu(value: u64, mask: u64, width: WidthInt) -> PossiblyUnknownBits {
    PossiblyUnknownBits::new(Bits::from_u64(value, width), Bits::from_u64(mask, width))
}

/// Two values of the same width, each with an unknown mask.
fn gen_unknown_pair() -> impl Strategy<Value = (PossiblyUnknownBits, PossiblyUnknownBits)> {
    (1..200u32).prop_flat_map(|width| {
        let bytes = move || prop::collection::vec(any::<u8>(), width.div_ceil(8) as usize);
        (bytes(), bytes(), bytes(), bytes()).prop_map(move |(a, ua, b, ub)| {
            let a = PossiblyUnknownBits::new(
                Bits::from_bytes_le(&a, width),
                Bits::from_bytes_le(&ua, width),
            );
            let b = PossiblyUnknownBits::new(
                Bits::from_bytes_le(&b, width),
                Bits::from_bytes_le(&ub, width),
            );
            (a, b)
        })
    })
}

fn do_test_bitwise_masks(a: &PossiblyUnknownBits, b: &PossiblyUnknownBits) {
    let (ua, ub) = (a.unknown_mask(), b.unknown_mask());
    assert_eq!(a.and(b).unknown_mask(), &ua.and(ub));
    assert_eq!(a.or(b).unknown_mask(), &ua.or(ub));
    assert_eq!(a.xor(b).unknown_mask(), &ua.or(ub));
    assert_eq!(a.not().unknown_mask(), ua);
    // defined lanes compute like plain values
    let known = ua.or(ub).not();
    assert_eq!(
        a.and(b).value().and(&known),
        a.value().and(b.value()).and(&known)
    );
    assert_eq!(
        a.xor(b).value().and(&known),
        a.value().xor(b.value()).and(&known)
    );
}

fn do_test_mixed_masks(a: &PossiblyUnknownBits, b: &Bits) {
    let ua = a.unknown_mask();
    assert_eq!(a.and_bits(b).unknown_mask(), &ua.and(b));
    assert_eq!(a.or_bits(b).unknown_mask(), &ua.and(&b.not()));
    assert_eq!(a.xor_bits(b).unknown_mask(), ua);
    assert_eq!((a & b).unknown_mask(), &ua.and(b));
}

fn do_test_shift_masks(a: &PossiblyUnknownBits, amount: WidthInt) {
    let ua = a.unknown_mask();
    assert_eq!(a.shl(amount).unknown_mask(), &ua.shl(amount));
    assert_eq!(a.shr(amount).unknown_mask(), &ua.shr(amount));
    let signed = a.with_signedness(true);
    assert_eq!(
        signed.sra(amount).unknown_mask(),
        &ua.to_signed().sra(amount).to_unsigned()
    );
}

#[test]
fn test_unknown_scenarios() {
    let a = xbits!("0x1x");
    let b = pu(0b1_0011, 0, 5);
    assert_eq!(a.and(&b).unknown_mask().as_u64(), 0);
    assert_eq!(a.and_bits(b.value()).unknown_mask().as_u64(), 0b0011);
    assert_eq!(a.or(&b).unknown_mask().as_u64(), 0xf);
    assert_eq!(a.shl(2).unknown_mask().as_u64(), 0b1_1100);
    assert!(a.shr(4).is_defined());
    assert_eq!(a.shr(4).to_u64(), Ok(1));
}

#[test]
fn numeric_operations_need_defined_values() {
    let a = xbits!("0x1x");
    let b = PossiblyUnknownBits::from(Bits::from_u64(3, 5));
    let undefined = Err(BitsError::UndefinedValue {
        unknown_mask: Bits::from_u64(0xf, 5),
    });
    assert_eq!(a.add(&b), undefined);
    assert_eq!(b.sub(&a), undefined);
    assert_eq!(a.is_less(&b), Err(undefined.clone().unwrap_err()));
    assert_eq!(a.to_u64(), Err(undefined.unwrap_err()));
    assert!(b.shift_left(&a).is_err());
    // a defined shift amount is fine
    assert_eq!(a.shift_left(&b).unwrap().unknown_mask().as_u64(), 0b1_1000);
    assert_eq!(b.add(&b).unwrap().to_u64(), Ok(6));
}

#[test]
fn resolving_unknown_bits() {
    let mut a = PossiblyUnknownBits::unknown(8);
    assert!(!a.is_defined());
    for pos in 0..8 {
        a.set_bit(pos, pos % 2 == 0);
    }
    assert!(a.is_defined());
    assert_eq!(a.to_u64(), Ok(0b0101_0101));
    a.set_bit_unknown(7);
    assert!(a.is_bit_unknown(7));
    assert_eq!(format!("{a:#x}"), "0x55 (unknown mask: 0x80)");
}

#[test]
fn unknown_sign_bits_extend() {
    let a = pu(0, 0b1000, 4).with_signedness(true);
    assert_eq!(a.resize(8).unknown_mask().as_u64(), 0xf8);
    assert_eq!(a.sra(2).unknown_mask().as_u64(), 0b1110);
    let unsigned = pu(0, 0b1000, 4);
    assert_eq!(unsigned.resize(8).unknown_mask().as_u64(), 0b1000);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn test_bitwise_masks((a, b) in gen_unknown_pair()) {
        do_test_bitwise_masks(&a, &b);
    }

    #[test]
    fn test_mixed_masks((a, b) in gen_unknown_pair()) {
        do_test_mixed_masks(&a, b.value());
    }

    #[test]
    fn test_shift_masks((a, _b) in gen_unknown_pair(), amount in 0..210u32) {
        do_test_shift_masks(&a, amount);
    }

    #[test]
    fn test_arithmetic_needs_defined_values((a, b) in gen_unknown_pair()) {
        let defined = a.is_defined() && b.is_defined();
        prop_assert_eq!(a.add(&b).is_ok(), defined);
        prop_assert_eq!(a.mul(&b).is_ok(), defined);
        if defined {
            let sum = a.add(&b).unwrap().to_bits().unwrap();
            prop_assert_eq!(sum, a.value().add(b.value()));
        }
    }
}
