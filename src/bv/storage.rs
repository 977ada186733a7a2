// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Maps a width onto the narrowest machine integer that can hold it.

use crate::{WidthInt, INFINITE_PRECISION};
use num_bigint::BigUint;

/// The kind of storage used for values of a given width.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StorageKind {
    U8,
    U16,
    U32,
    U64,
    U128,
    Big,
}

impl From<WidthInt> for StorageKind {
    fn from(value: WidthInt) -> Self {
        match value {
            0 => panic!("zero bit is not supported!"),
            1..=8 => Self::U8,
            9..=16 => Self::U16,
            17..=32 => Self::U32,
            33..=64 => Self::U64,
            65..=128 => Self::U128,
            _ => Self::Big,
        }
    }
}

impl StorageKind {
    /// Number of bits in the machine integer. `None` for big integers.
    pub const fn bits(self) -> Option<WidthInt> {
        match self {
            Self::U8 => Some(u8::BITS),
            Self::U16 => Some(u16::BITS),
            Self::U32 => Some(u32::BITS),
            Self::U64 => Some(u64::BITS),
            Self::U128 => Some(u128::BITS),
            Self::Big => None,
        }
    }

    pub const fn is_native(self) -> bool {
        !matches!(self, Self::Big)
    }
}

/// True iff values of `width` need an explicit mask after every mutating operation.
pub fn mask_needed(width: WidthInt) -> bool {
    width != INFINITE_PRECISION && StorageKind::from(width).bits() != Some(width)
}

/// Unsigned bit pattern of a value. The variant always agrees with `StorageKind::from(width)`
/// of the owning value.
#[derive(Clone, Hash, PartialEq, Eq)]
pub(crate) enum Storage {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Big(BigUint),
}

impl Storage {
    pub(crate) fn zero(width: WidthInt) -> Self {
        Self::from_u128(0, width)
    }

    /// `value` must already be masked to `width`.
    pub(crate) fn from_u128(value: u128, width: WidthInt) -> Self {
        debug_assert!(
            width >= u128::BITS || value >> width == 0,
            "value {value} does not fit into {width} bits"
        );
        match StorageKind::from(width) {
            StorageKind::U8 => Self::U8(value as u8),
            StorageKind::U16 => Self::U16(value as u16),
            StorageKind::U32 => Self::U32(value as u32),
            StorageKind::U64 => Self::U64(value as u64),
            StorageKind::U128 => Self::U128(value),
            StorageKind::Big => Self::Big(BigUint::from(value)),
        }
    }

    /// `value` must already be masked to `width`.
    pub(crate) fn from_big(value: BigUint, width: WidthInt) -> Self {
        if StorageKind::from(width).is_native() {
            debug_assert!(value.bits() <= width as u64);
            Self::from_u128(big_low_u128(&value), width)
        } else {
            Self::Big(value)
        }
    }

    pub(crate) fn kind(&self) -> StorageKind {
        match self {
            Self::U8(_) => StorageKind::U8,
            Self::U16(_) => StorageKind::U16,
            Self::U32(_) => StorageKind::U32,
            Self::U64(_) => StorageKind::U64,
            Self::U128(_) => StorageKind::U128,
            Self::Big(_) => StorageKind::Big,
        }
    }

    /// The low 128 bits of the stored pattern.
    pub(crate) fn raw(&self) -> u128 {
        match self {
            Self::U8(v) => *v as u128,
            Self::U16(v) => *v as u128,
            Self::U32(v) => *v as u128,
            Self::U64(v) => *v as u128,
            Self::U128(v) => *v,
            Self::Big(v) => big_low_u128(v),
        }
    }

    pub(crate) fn to_big(&self) -> BigUint {
        match self {
            Self::Big(v) => v.clone(),
            other => BigUint::from(other.raw()),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Self::Big(v) => v.bits() == 0,
            other => other.raw() == 0,
        }
    }

    pub(crate) fn is_bit_set(&self, pos: WidthInt) -> bool {
        match self {
            Self::Big(v) => v.bit(pos as u64),
            other => pos < u128::BITS && (other.raw() >> pos) & 1 == 1,
        }
    }

    /// Number of significant bits.
    pub(crate) fn bits(&self) -> u64 {
        match self {
            Self::Big(v) => v.bits(),
            other => (u128::BITS - other.raw().leading_zeros()) as u64,
        }
    }
}

#[inline]
pub(crate) fn big_low_u128(value: &BigUint) -> u128 {
    let mut digits = value.iter_u64_digits();
    let lsb = digits.next().unwrap_or(0) as u128;
    let msb = digits.next().unwrap_or(0) as u128;
    (msb << u64::BITS) | lsb
}
