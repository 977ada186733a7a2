// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Conversions at the boundary to host memory, which reads and writes native integers of 1, 2, 4,
// 8 and 16 bytes.

use crate::{Bits, WidthInt};
use num_bigint::BigUint;

/// A native integer that a `Bits` value can be converted to and from.
pub trait NativeInt: Copy {
    const BITS: WidthInt;
    const SIGNED: bool;
    /// Two's complement pattern, zero extended to 128 bits.
    fn to_pattern(self) -> u128;
    /// Keeps the low `Self::BITS` bits.
    fn from_pattern(pattern: u128) -> Self;
}

macro_rules! impl_native_int {
    ($($tpe:ty, $unsigned:ty, $signed:expr);*) => {
        $(
            impl NativeInt for $tpe {
                const BITS: WidthInt = <$tpe>::BITS;
                const SIGNED: bool = $signed;

                #[inline]
                fn to_pattern(self) -> u128 {
                    self as $unsigned as u128
                }

                #[inline]
                fn from_pattern(pattern: u128) -> Self {
                    pattern as $tpe
                }
            }
        )*
    };
}

impl_native_int!(
    u8, u8, false; u16, u16, false; u32, u32, false; u64, u64, false; u128, u128, false;
    i8, u8, true; i16, u16, true; i32, u32, true; i64, u64, true; i128, u128, true
);

impl Bits {
    /// A value with the width and signedness of `T`.
    pub fn from_native<T: NativeInt>(value: T) -> Self {
        Self::from_u128_masked(value.to_pattern(), T::BITS, T::SIGNED)
    }

    /// Converts to `T` like a C cast: the value is sign or zero extended to the width of `T`
    /// according to its signedness and then truncated.
    pub fn to_native<T: NativeInt>(&self) -> T {
        T::from_pattern(self.as_i128() as u128)
    }

    /// Reads `width` bits from little-endian bytes. Missing bytes are zero.
    pub fn from_bytes_le(bytes: &[u8], width: WidthInt) -> Self {
        Self::from_big_masked(BigUint::from_bytes_le(bytes), width, false)
    }

    /// The pattern as little-endian bytes, `ceil(width / 8)` of them.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        assert!(!self.is_infinite(), "infinite precision values have no byte size");
        let mut bytes = self.to_big_uint().to_bytes_le();
        bytes.resize(self.width.div_ceil(u8::BITS) as usize, 0);
        bytes
    }
}

macro_rules! impl_as_native {
    ($($tpe:ident),*) => {
        paste::paste! {
            impl Bits {
                $(
                    #[doc = concat!("Like a C cast to `", stringify!($tpe), "`.")]
                    pub fn [<as_ $tpe>](&self) -> $tpe {
                        self.to_native::<$tpe>()
                    }
                )*
            }
        }
    };
}

impl_as_native!(u8, u16, u32, i8, i16, i32);

macro_rules! impl_from_native {
    ($($tpe:ty),*) => {
        $(
            impl From<$tpe> for Bits {
                fn from(value: $tpe) -> Self {
                    Bits::from_native(value)
                }
            }
        )*
    };
}

impl_from_native!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
