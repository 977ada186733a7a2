// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Operations that are easy to verify on the bit-level: msb, concat, slice, bitwise and, or,
// xor and not, zext, sext and set_bit. Expected results are computed on bit strings.

use idl_bits::*;
use proptest::prelude::*;

fn bits(s: &str) -> Bits {
    Bits::from_bit_str(s).unwrap()
}

fn do_test_msb(a: &str) {
    let value = bits(a);
    assert_eq!(value.msb(), a.starts_with('1'), "{a}");
    assert_eq!(value.to_signed().is_negative(), a.starts_with('1'), "{a}");
    assert!(!value.is_negative(), "unsigned values are never negative");
}

fn do_test_concat(a: &str, b: &str) {
    let c = bits(a).concat(&bits(b));
    assert_eq!(c.to_bit_str(), format!("{a}{b}"));
    assert!(!c.is_signed());
}

fn do_test_slice(src: &str, hi: WidthInt, lo: WidthInt) {
    let value = bits(src);
    let res = value.slice(hi, lo);
    assert_eq!(res.width(), hi - lo + 1);
    let expected: String = src
        .chars()
        .skip((value.width() - 1 - hi) as usize)
        .take(res.width() as usize)
        .collect();
    assert_eq!(res.to_bit_str(), expected);
}

fn do_test_bitwise(a: &str, b: &str) {
    let lanes = |f: fn(bool, bool) -> bool| -> String {
        a.chars()
            .zip(b.chars())
            .map(|(a, b)| if f(a == '1', b == '1') { '1' } else { '0' })
            .collect()
    };
    let (a_value, b_value) = (bits(a), bits(b));
    assert_eq!(a_value.and(&b_value).to_bit_str(), lanes(|a, b| a & b));
    assert_eq!(a_value.or(&b_value).to_bit_str(), lanes(|a, b| a | b));
    assert_eq!(a_value.xor(&b_value).to_bit_str(), lanes(|a, b| a ^ b));
    assert_eq!((&a_value ^ &b_value).to_bit_str(), lanes(|a, b| a ^ b));
    assert_eq!(a_value.not().to_bit_str(), lanes(|a, _| !a));
}

fn do_test_zero_ext(src: &str, by: WidthInt) {
    let actual = bits(src).zero_extend(by);
    assert_eq!(actual.width(), src.len() as WidthInt + by);
    assert_eq!(actual.to_bit_str(), format!("{}{}", "0".repeat(by as usize), src));
}

fn do_test_sign_ext(src: &str, by: WidthInt) {
    let actual = bits(src).sign_extend(by);
    assert_eq!(actual.width(), src.len() as WidthInt + by);
    let sign_bit = &src[..1];
    assert_eq!(actual.to_bit_str(), format!("{}{}", sign_bit.repeat(by as usize), src));
    // the signedness does not change
    assert!(!actual.is_signed());
}

fn do_test_set_bit(src: &str, pos: WidthInt, value: bool) {
    let mut actual = bits(src);
    actual.set_bit(pos, value);
    let index = src.len() - 1 - pos as usize;
    let mut expected: Vec<char> = src.chars().collect();
    expected[index] = if value { '1' } else { '0' };
    let expected: String = expected.into_iter().collect();
    assert_eq!(actual.to_bit_str(), expected);
    assert_eq!(actual.is_bit_set(pos), value);
}

//////////////////////////
// Unit Tests
//////////////////////////

#[test]
fn test_msb_regressions() {
    do_test_msb("1");
    do_test_msb("0");
    do_test_msb("10000000000000000000000000000000000000000000000000000000000000000000000000");
}

#[test]
fn test_concat_regressions() {
    do_test_concat("0", "1");
    do_test_concat(&"1".repeat(64), &"0".repeat(64));
    do_test_concat(&"1".repeat(100), "1");
}

#[test]
fn test_slice_regressions() {
    do_test_slice("01", 0, 0);
    do_test_slice(&"10".repeat(100), 137, 2);
}

#[test]
fn test_set_bit_regressions() {
    do_test_set_bit("0000", 3, true);
    do_test_set_bit(&"1".repeat(129), 128, false);
}

#[test]
#[should_panic]
fn set_bit_outside_of_the_value() {
    let mut value = bits("0000");
    value.set_bit(4, true);
}

//////////////////////////
// Random Tests
//////////////////////////

fn gen_bit_str(width: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), width)
        .prop_map(|lanes| lanes.into_iter().map(|b| if b { '1' } else { '0' }).collect())
}

fn gen_pair_of_equal_width() -> impl Strategy<Value = (String, String)> {
    (1..300usize).prop_flat_map(|width| (gen_bit_str(width), gen_bit_str(width)))
}

fn gen_slice() -> impl Strategy<Value = (String, WidthInt, WidthInt)> {
    "[01]{1,300}".prop_flat_map(|src| {
        let width = src.len() as WidthInt;
        (Just(src), 0..width)
            .prop_flat_map(|(src, hi)| (Just(src), Just(hi), 0..(hi + 1)))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn test_msb(a in "[01]{1,300}") {
        do_test_msb(&a);
    }

    #[test]
    fn test_concat(a in "[01]{1,200}", b in "[01]{1,200}") {
        do_test_concat(&a, &b);
    }

    #[test]
    fn test_slice((src, hi, lo) in gen_slice()) {
        do_test_slice(&src, hi, lo);
    }

    #[test]
    fn test_bitwise((a, b) in gen_pair_of_equal_width()) {
        do_test_bitwise(&a, &b);
    }

    #[test]
    fn test_zero_ext(src in "[01]{1,200}", by in 0..200u32) {
        do_test_zero_ext(&src, by);
    }

    #[test]
    fn test_sign_ext(src in "[01]{1,200}", by in 0..200u32) {
        do_test_sign_ext(&src, by);
    }

    #[test]
    fn test_set_bit((src, pos, _lo) in gen_slice(), value in any::<bool>()) {
        do_test_set_bit(&src, pos, value);
    }
}
