// Copyright 2024 Cornell University
// released under BSD 3-Clause License
//
// Named bit ranges of a wider value, e.g. the fields of a control and status register.

use crate::{insert, Bits, WidthInt};
use std::cmp::Ordering;

/// A value that owns the storage its members refer to.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Bitfield {
    value: Bits,
}

impl Bitfield {
    pub fn new(width: WidthInt) -> Self {
        Self {
            value: Bits::zero(width),
        }
    }

    pub fn from_bits(value: Bits) -> Self {
        Self {
            value: value.to_unsigned(),
        }
    }

    pub fn width(&self) -> WidthInt {
        self.value.width()
    }

    pub fn value(&self) -> &Bits {
        &self.value
    }

    /// Replaces the whole value. It is truncated or extended to the width of the bitfield.
    pub fn assign(&mut self, value: &Bits) {
        self.value.assign(value);
    }

    pub fn member(&self, member: BitfieldMember) -> MemberRef<'_> {
        member.check_parent(self);
        MemberRef {
            parent: self,
            member,
        }
    }

    pub fn member_mut(&mut self, member: BitfieldMember) -> MemberMut<'_> {
        member.check_parent(self);
        MemberMut {
            parent: self,
            member,
        }
    }
}

/// Bits `start + size - 1` down to `start` of a bitfield that is `parent_width` bits wide.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct BitfieldMember {
    parent_width: WidthInt,
    start: WidthInt,
    size: WidthInt,
}

impl BitfieldMember {
    pub const fn new(parent_width: WidthInt, start: WidthInt, size: WidthInt) -> Self {
        assert!(size > 0, "bitfield members need at least one bit");
        assert!(
            start + size <= parent_width,
            "bitfield member does not fit into its parent"
        );
        Self {
            parent_width,
            start,
            size,
        }
    }

    pub const fn start(&self) -> WidthInt {
        self.start
    }

    pub const fn size(&self) -> WidthInt {
        self.size
    }

    pub const fn msb(&self) -> WidthInt {
        self.start + self.size - 1
    }

    pub const fn parent_width(&self) -> WidthInt {
        self.parent_width
    }

    fn check_parent(&self, parent: &Bitfield) {
        assert_eq!(
            parent.width(),
            self.parent_width,
            "member of a {} bit bitfield used with a {} bit bitfield",
            self.parent_width,
            parent.width()
        );
    }

    /// `(parent >> start) & mask(size)`
    pub fn read(&self, parent: &Bitfield) -> Bits {
        self.check_parent(parent);
        parent.value.slice(self.msb(), self.start)
    }

    /// Replaces the member bits of `parent` with the low `size` bits of `value`.
    pub fn write(&self, parent: &mut Bitfield, value: &Bits) {
        self.check_parent(parent);
        parent.value = insert(&parent.value, self.msb(), self.start, value);
    }
}

/// A member borrowed together with its parent for reading.
#[derive(Debug, Copy, Clone)]
pub struct MemberRef<'a> {
    parent: &'a Bitfield,
    member: BitfieldMember,
}

impl<'a> MemberRef<'a> {
    pub fn get(&self) -> Bits {
        self.member.read(self.parent)
    }

    pub fn is_equal(&self, other: &Bits) -> bool {
        self.get().is_equal(other)
    }

    pub fn cmp_value(&self, other: &Bits) -> Ordering {
        self.get().cmp_value(other)
    }

    pub fn and(&self, other: &Bits) -> Bits {
        self.get().and(other)
    }

    pub fn or(&self, other: &Bits) -> Bits {
        self.get().or(other)
    }

    pub fn xor(&self, other: &Bits) -> Bits {
        self.get().xor(other)
    }
}

/// A member borrowed together with its parent for writing.
#[derive(Debug)]
pub struct MemberMut<'a> {
    parent: &'a mut Bitfield,
    member: BitfieldMember,
}

impl<'a> MemberMut<'a> {
    pub fn get(&self) -> Bits {
        self.member.read(self.parent)
    }

    pub fn set(&mut self, value: &Bits) {
        self.member.write(self.parent, value);
    }

    /// Replaces the member with `f` applied to its current value.
    pub fn update(&mut self, f: impl FnOnce(&Bits) -> Bits) {
        let value = f(&self.get());
        self.set(&value);
    }
}
