// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Comparisons checked against num-bigint.

use bits_arithmetic::{gen_big_int_pair, gen_mixed_width_pair};
use idl_bits::*;
use num_bigint::*;
use proptest::prelude::*;

fn do_test_cmp(a: BigInt, b: BigInt, (a_width, b_width): (WidthInt, WidthInt)) {
    // signed
    let a_vec = Bits::from_big_int(&a, a_width);
    let b_vec = Bits::from_big_int(&b, b_width);
    assert_eq!(a_vec.cmp_value(&b_vec), a.cmp(&b), "{a} <=> {b}");
    assert_eq!(a_vec.is_less(&b_vec), a < b);
    assert_eq!(a_vec.is_less_or_equal(&b_vec), a <= b);
    assert_eq!(a_vec.is_greater(&b_vec), a > b);
    assert_eq!(a_vec.is_greater_or_equal(&b_vec), a >= b);
    assert_eq!(a_vec.is_equal(&b_vec), a == b);
    assert_eq!(a_vec.is_not_equal(&b_vec), a != b);

    // unsigned
    let a_mag = a.magnitude();
    let b_mag = b.magnitude();
    let a_vec = Bits::from_big_uint(a_mag, a_width);
    let b_vec = Bits::from_big_uint(b_mag, b_width);
    assert_eq!(a_vec.cmp_value(&b_vec), a_mag.cmp(b_mag), "{a_mag} <=> {b_mag}");
    assert_eq!(a_vec.is_less(&b_vec), a_mag < b_mag);
    assert_eq!(a_vec.is_greater_or_equal(&b_vec), a_mag >= b_mag);
}

#[test]
fn test_mixed_signedness() {
    // a signed and an unsigned operand compare unsigned
    let minus_one = Bits::from_i64(-1, 8);
    let one = Bits::from_u64(1, 8);
    assert!(minus_one.is_greater(&one));
    assert!(minus_one.is_less(&one.to_signed()));
    // the narrower operand is extended by its own signedness
    let wide = Bits::from_u64(0xff, 16);
    assert!(wide.is_greater(&minus_one));
    assert!(Bits::from_i64(-1, 16).is_equal(&minus_one));
}

#[test]
fn test_structural_equality() {
    let a = Bits::from_u64(5, 8);
    let b = Bits::from_u64(5, 16);
    assert!(a.is_equal(&b));
    assert_ne!(a, b);
    assert_ne!(a, a.to_signed());
    assert_eq!(a, b.truncate(8));
}

#[test]
fn test_cmp_regressions() {
    do_test_cmp(BigInt::from(-1), BigInt::from(0), (1, 1));
    do_test_cmp(BigInt::from(-128), BigInt::from(127), (8, 8));
    do_test_cmp(-(BigInt::from(1) << 150u32), BigInt::from(3), (151, 3));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn test_cmp((a, b, width) in gen_big_int_pair()) {
        do_test_cmp(a, b, (width, width));
    }

    #[test]
    fn test_cmp_mixed_width((a, b, widths) in gen_mixed_width_pair()) {
        do_test_cmp(a, b, widths);
    }
}
