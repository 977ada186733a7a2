// Copyright 2024 Cornell University
// released under BSD 3-Clause License

use crate::{Bits, WidthInt, INFINITE_PRECISION};
use num_bigint::BigUint;
use rand::RngCore;

impl Bits {
    /// Uniformly distributed unsigned value of `width` bits.
    pub fn random(rng: &mut impl RngCore, width: WidthInt) -> Self {
        assert_ne!(width, INFINITE_PRECISION, "cannot sample infinite precision values");
        let mut bytes = vec![0u8; width.div_ceil(u8::BITS) as usize];
        rng.fill_bytes(&mut bytes);
        Self::from_big_masked(BigUint::from_bytes_le(&bytes), width, false)
    }
}
