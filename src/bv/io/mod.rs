// Copyright 2024 Cornell University
// released under BSD 3-Clause License

pub(crate) mod bytes;
mod fmt;
#[cfg(feature = "rand1")]
mod random;
#[cfg(feature = "serde1")]
mod serde;
pub(crate) mod strings;
