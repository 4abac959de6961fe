use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bitmask of rendering options.
///
/// Bit meanings are up to the caller and the active shader. The built-in
/// [`PhongShader`](crate::PhongShader) reads [`Attributes::SHADOWS`] and
/// [`Attributes::NO_SPECULAR`]; every other bit is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(u32);

impl Attributes {
    pub const NONE: Attributes = Attributes(0);
    /// Trace shadow rays toward directed lights.
    pub const SHADOWS: Attributes = Attributes(1 << 0);
    /// Skip the specular highlight term.
    pub const NO_SPECULAR: Attributes = Attributes(1 << 1);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: Attributes) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Attributes) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Attributes) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Attributes {
    type Output = Attributes;

    fn bitor(self, rhs: Attributes) -> Attributes {
        Attributes(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Attributes) {
        self.insert(rhs);
    }
}

impl From<u32> for Attributes {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}
