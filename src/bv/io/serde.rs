// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Values are encoded as their decimal string. Decoding accepts everything `FromStr` accepts and
// infers the width from the string.

use crate::{Bits, PossiblyUnknownBits};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for Bits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dec_str_signed())
    }
}

struct BitsVisitor;

impl<'de> Visitor<'de> for BitsVisitor {
    type Value = Bits;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer string with an optional 0x, 0o, 0b or 0 prefix")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Bits, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Bits, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Bits, E> {
        self.visit_str(&value.to_string())
    }
}

impl<'de> Deserialize<'de> for Bits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(BitsVisitor)
    }
}

impl Serialize for PossiblyUnknownBits {
    /// Values with unknown bits cannot be represented by a number.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_bits().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PossiblyUnknownBits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Bits::deserialize(deserializer)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_string_encoding() {
        let a = Bits::from_u64(60848, 16);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"60848\"");
        let b = Bits::from_i64(-5, 8);
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"-5\"");
        let back: Bits = serde_json::from_str("\"-5\"").unwrap();
        assert!(back.is_equal(&b));
        let hex: Bits = serde_json::from_str("\"0x1f\"").unwrap();
        assert_eq!(hex, Bits::from_u64(31, 5));
        assert!(serde_json::from_str::<Bits>("\"0x1x\"").is_err());
    }

    #[test]
    fn decoding_accepts_every_prefix() {
        let bin: Bits = serde_json::from_str("\"0b101\"").unwrap();
        assert_eq!(bin, Bits::from_u64(5, 3));
        let oct: Bits = serde_json::from_str("\"017\"").unwrap();
        assert_eq!(oct, Bits::from_u64(15, 4));
        let oct: Bits = serde_json::from_str("\"0o17\"").unwrap();
        assert_eq!(oct, Bits::from_u64(15, 4));
    }

    #[test]
    fn unknown_bits_do_not_serialize() {
        let a = PossiblyUnknownBits::new(Bits::zero(4), Bits::from_u64(1, 4));
        assert!(serde_json::to_string(&a).is_err());
        let b: PossiblyUnknownBits = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(b.to_bits().unwrap(), Bits::from_u64(7, 3));
    }
}
