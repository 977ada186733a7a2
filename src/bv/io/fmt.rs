// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// `std::fmt` integration. Fill, width, `#` and `0` flags work like they do for primitive
// integers.

use crate::bv::io::strings::digits_str;
use crate::{Bits, PossiblyUnknownBits, PossiblyUnknownRuntimeBits, RuntimeBits};
use std::fmt;

impl fmt::Display for Bits {
    /// Signed values print their signed interpretation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            // the magnitude of the smallest value is its own unsigned pattern
            f.pad_integral(false, "", &self.negate().to_dec_str())
        } else {
            f.pad_integral(true, "", &self.to_dec_str())
        }
    }
}

macro_rules! impl_radix_fmt {
    ($trait:ident, $radix:expr, $prefix:expr, $upper:expr) => {
        impl fmt::$trait for Bits {
            /// Prints the unsigned bit pattern.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let digits = digits_str(&self.value, $radix);
                if $upper {
                    f.pad_integral(true, $prefix, &digits.to_uppercase())
                } else {
                    f.pad_integral(true, $prefix, &digits)
                }
            }
        }
    };
}

impl_radix_fmt!(LowerHex, 16, "0x", false);
impl_radix_fmt!(UpperHex, 16, "0x", true);
impl_radix_fmt!(Octal, 8, "0o", false);
impl_radix_fmt!(Binary, 2, "0b", false);

/// Prints `<value> (unknown mask: <mask>)` if any bit is unknown. The mask uses the same format
/// as the value.
macro_rules! impl_unknown_fmt {
    ($tpe:ty, $value:ident) => {
        impl_unknown_fmt!($tpe, $value, Display);
        impl_unknown_fmt!($tpe, $value, LowerHex);
        impl_unknown_fmt!($tpe, $value, UpperHex);
        impl_unknown_fmt!($tpe, $value, Octal);
        impl_unknown_fmt!($tpe, $value, Binary);
    };
    ($tpe:ty, $value:ident, $trait:ident) => {
        impl fmt::$trait for $tpe {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::$trait::fmt(self.$value(), f)?;
                if !self.unknown_mask().is_zero() {
                    f.write_str(" (unknown mask: ")?;
                    fmt::$trait::fmt(self.unknown_mask(), f)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    };
}

impl_unknown_fmt!(PossiblyUnknownBits, value);
impl_unknown_fmt!(PossiblyUnknownRuntimeBits, runtime_value);

impl fmt::Display for RuntimeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value(), f)
    }
}

impl fmt::LowerHex for RuntimeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self.value(), f)
    }
}

impl fmt::UpperHex for RuntimeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self.value(), f)
    }
}

impl fmt::Octal for RuntimeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(self.value(), f)
    }
}

impl fmt::Binary for RuntimeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(self.value(), f)
    }
}
