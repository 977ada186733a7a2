// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// String conversions, formatting and literals.

use idl_bits::*;
use num_bigint::BigUint;
use proptest::prelude::*;

fn do_test_from_to_bit_str(s: String) {
    let value = Bits::from_bit_str(&s).unwrap();
    // the width is the number of digits
    let digits = s.strip_prefix('+').unwrap_or(&s);
    assert_eq!(value.width(), (digits.len() as WidthInt).max(1));
    assert_eq!(value.to_bit_str(), digits);
}

fn do_test_from_to_hex_str(s: String) {
    let value = Bits::from_hex_str(&s).unwrap();
    let digits = s.strip_prefix('+').unwrap_or(&s).to_ascii_lowercase();
    assert_eq!(value.width(), (digits.len() as WidthInt * 4).max(1));
    assert_eq!(value.to_hex_str(), digits);
}

/// Every supported format parses back to the same value.
fn do_test_format_round_trip(value: &Bits) {
    let width = value.width();
    let signed = value.is_signed();
    for formatted in [
        format!("{value}"),
        format!("{value:#x}"),
        format!("{value:#X}"),
        format!("{value:#o}"),
        format!("{value:#b}"),
    ] {
        let parsed = Bits::parse(&formatted, width, signed).unwrap();
        assert_eq!(&parsed, value, "{formatted}");
        // width inference never needs more bits than the value has
        let inferred: Bits = formatted.parse().unwrap();
        assert!(inferred.width() <= width, "{formatted}");
        assert_eq!(&inferred.resize(width).with_signedness(signed), value, "{formatted}");
    }
    let dec = if signed {
        value.to_dec_str_signed()
    } else {
        value.to_dec_str()
    };
    assert_eq!(&Bits::parse(&dec, width, signed).unwrap(), value);
    let hex = Bits::from_str_radix(&value.to_hex_str(), 16, width).unwrap();
    assert_eq!(hex, value.to_unsigned());
}

fn gen_bits() -> impl Strategy<Value = Bits> {
    (1..300u32, any::<bool>()).prop_flat_map(|(width, signed)| {
        prop::collection::vec(any::<u8>(), width.div_ceil(8) as usize)
            .prop_map(move |bytes| Bits::from_bytes_le(&bytes, width).with_signedness(signed))
    })
}

//////////////////////////
// Unit Tests
//////////////////////////

#[test]
fn test_to_bit_str() {
    assert_eq!(Bits::from_u64(0b101, 3).to_bit_str(), "101");
    assert_eq!(Bits::from_u64(0b101, 5).to_bit_str(), "00101");
    assert_eq!(Bits::from_i64(-1, 4).to_bit_str(), "1111");
}

#[test]
fn test_from_bit_str_regressions() {
    do_test_from_to_bit_str("0".to_string());
    do_test_from_to_bit_str("+0".to_string());
    do_test_from_to_bit_str("1".repeat(200));
    // a minus adds a sign bit
    let minus_one = Bits::from_bit_str("-1").unwrap();
    assert_eq!(minus_one.width(), 2);
    assert!(minus_one.is_all_ones());
}

#[test]
fn test_from_hex_str_regressions() {
    do_test_from_to_hex_str("0aaaA0a0aAA0aaaA".to_string());
    do_test_from_to_hex_str("+A".to_string());
    do_test_from_to_hex_str("0".repeat(40));
}

#[test]
fn test_parse_errors() {
    let kind = |s: &str, width: WidthInt| Bits::parse(s, width, false).unwrap_err().kind;
    assert_eq!(kind("", 8), IntErrorKind::Empty);
    assert_eq!(kind("0x", 8), IntErrorKind::Empty);
    assert_eq!(kind("12z", 8), IntErrorKind::InvalidDigit);
    assert_eq!(kind("0b102", 8), IntErrorKind::InvalidDigit);
    assert_eq!(kind("256", 8), IntErrorKind::ExceedsWidth);
    assert_eq!(kind("0x1ff", 8), IntErrorKind::ExceedsWidth);
    assert_eq!(kind(&"9".repeat(100), 200), IntErrorKind::ExceedsWidth);
    // positive numbers may use every bit of the pattern
    assert_eq!(Bits::parse("255", 8, true).unwrap(), Bits::from_i64(-1, 8));
    assert_eq!(Bits::parse("-128", 8, true).unwrap().as_i64(), -128);
    assert_eq!(Bits::parse("017", 8, false).unwrap().as_u64(), 15);
}

#[test]
fn test_formatting() {
    let a = Bits::from_u64(0xa4, 8);
    assert_eq!(format!("{a}"), "164");
    assert_eq!(format!("{a:x}"), "a4");
    assert_eq!(format!("{a:#X}"), "0xA4");
    assert_eq!(format!("{a:08x}"), "000000a4");
    assert_eq!(format!("{a:#010x}"), "0x000000a4");
    assert_eq!(format!("{a:o}"), "244");
    assert_eq!(format!("{:>6}", a.to_signed()), "   -92");
    let min = Bits::min_value(200, true);
    assert_eq!(format!("{min}"), format!("-{}", BigUint::from(1u8) << 199u32));
}

#[test]
fn test_from_str_infers_width() {
    let a: Bits = "0x1f".parse().unwrap();
    assert_eq!(a, Bits::from_u64(31, 5));
    let b: Bits = "-5".parse().unwrap();
    assert_eq!(b, Bits::from_i64(-5, 4));
    let c: Bits = "-8".parse().unwrap();
    assert_eq!(c, Bits::from_i64(-8, 4));
    let d: Bits = "-0".parse().unwrap();
    assert_eq!(d, Bits::zero(1).to_signed());
    assert!("x".parse::<Bits>().is_err());
}

#[test]
fn test_from_str_prefixes() {
    let a: Bits = "0b101".parse().unwrap();
    assert_eq!(a, Bits::from_u64(5, 3));
    let b: Bits = "0b0101".parse().unwrap();
    assert_eq!(b, Bits::from_u64(5, 3));
    // a leading zero means octal, like in `Bits::parse`
    let c: Bits = "017".parse().unwrap();
    assert_eq!(c, Bits::from_u64(15, 4));
    assert!(c.is_equal(&Bits::parse("017", 8, false).unwrap()));
    let d: Bits = "0o777".parse().unwrap();
    assert_eq!(d, Bits::from_u64(0o777, 9));
    let e: Bits = "-0b100".parse().unwrap();
    assert_eq!(e, Bits::from_i64(-4, 3));
    let f: Bits = "0".parse().unwrap();
    assert_eq!(f, Bits::zero(1));

    let octal = format!("{:#o}", Bits::from_u64(15, 8));
    assert_eq!(octal.parse::<Bits>().unwrap().as_u64(), 15);
    let binary = format!("{:#b}", Bits::from_u64(0b1101, 8));
    assert_eq!(binary.parse::<Bits>().unwrap(), Bits::from_u64(0b1101, 4));

    assert_eq!("0b".parse::<Bits>().unwrap_err().kind, IntErrorKind::Empty);
    assert_eq!("0b102".parse::<Bits>().unwrap_err().kind, IntErrorKind::InvalidDigit);
    assert_eq!("08".parse::<Bits>().unwrap_err().kind, IntErrorKind::InvalidDigit);
}

#[test]
fn test_literals() {
    let a = bits!("0x1f");
    assert_eq!(a.width(), 5);
    assert_eq!(a.as_u64(), 31);
    let b = sbits!("0x1f");
    assert_eq!(b.width(), 6);
    assert!(b.is_signed());
    let c = bits!("4_294_967_295");
    assert_eq!(c, Bits::from_u64(u32::MAX as u64, 32));

    let x = xbits!("0x1x");
    assert_eq!(x.width(), 5);
    assert_eq!(x.unknown_mask().as_u64(), 0xf);
    assert!(!x.is_defined());
    assert!(x.to_bits().is_err());
    assert_eq!(format!("{x:#x}"), "0x10 (unknown mask: 0xf)");
}

//////////////////////////
// Random Tests
//////////////////////////

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn test_from_to_bit_str(s in "[01]{1,300}") {
        do_test_from_to_bit_str(s);
    }

    #[test]
    fn test_from_to_hex_str(s in "[01a-fA-F]{1,80}") {
        do_test_from_to_hex_str(s);
    }

    #[test]
    fn test_format_round_trip(value in gen_bits()) {
        do_test_format_round_trip(&value);
    }

    #[test]
    fn test_literal_round_trip(value in 0..u128::MAX) {
        let lit = format!("{value}");
        let parsed = Bits::parse_literal(&lit, false).unwrap();
        prop_assert_eq!(parsed.as_u128(), value);
        prop_assert_eq!(parsed.width(), (u128::BITS - value.leading_zeros()).max(1));
    }
}
