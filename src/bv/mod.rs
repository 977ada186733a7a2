// Copyright 2024 Cornell University
// released under BSD 3-Clause License

mod arithmetic;
mod compose;
mod io;
mod literal;
mod ops;
mod owned;
mod runtime;
mod storage;
mod unknown;

pub use arithmetic::mask;
pub use compose::{
    concat, concat_runtime, extract, extract_dyn, insert, replicate, sign_extend_from,
};
pub use io::bytes::NativeInt;
pub use literal::{Literal, LiteralKind};
pub use owned::Bits;
pub use runtime::{PossiblyUnknownRuntimeBits, RuntimeBits};
pub use storage::{mask_needed, StorageKind};
pub use unknown::PossiblyUnknownBits;
