use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Position of a single base pair inside a chromosome.
///
/// Base pairs are two bits wide and packed four to a byte, most significant
/// pair first: index 0 lives in bits 7-6 of byte 0, index 3 in bits 1-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneIndex(pub i32);

impl GeneIndex {
    pub const INVALID: GeneIndex = GeneIndex(-1);

    pub const fn new(position: i32) -> Self {
        Self(position)
    }

    pub fn position(&self) -> i32 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// The index of the byte holding this base pair
    pub fn byte_index(&self) -> usize {
        debug_assert!(self.is_valid(), "byte index of {} requested", self);
        (self.0 / 4) as usize
    }

    /// Slot of this base pair inside its byte, 0 being the most significant
    pub fn index_inside_byte(&self) -> usize {
        debug_assert!(self.is_valid(), "byte offset of {} requested", self);
        (self.0 % 4) as usize
    }

    /// Right shift that brings this base pair down to the low two bits
    pub(crate) fn shift_in_byte(&self) -> u32 {
        ((3 - self.index_inside_byte()) * 2) as u32
    }
}

impl Add for GeneIndex {
    type Output = GeneIndex;

    fn add(self, rhs: GeneIndex) -> GeneIndex {
        GeneIndex(self.0 + rhs.0)
    }
}

impl Add<i32> for GeneIndex {
    type Output = GeneIndex;

    fn add(self, rhs: i32) -> GeneIndex {
        GeneIndex(self.0 + rhs)
    }
}

impl Sub for GeneIndex {
    type Output = GeneIndex;

    fn sub(self, rhs: GeneIndex) -> GeneIndex {
        GeneIndex(self.0 - rhs.0)
    }
}

impl Sub<i32> for GeneIndex {
    type Output = GeneIndex;

    fn sub(self, rhs: i32) -> GeneIndex {
        GeneIndex(self.0 - rhs)
    }
}

impl From<i32> for GeneIndex {
    fn from(position: i32) -> Self {
        GeneIndex(position)
    }
}

impl fmt::Display for GeneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_addressing() {
        let index = GeneIndex::new(13);
        assert_eq!(index.byte_index(), 3);
        assert_eq!(index.index_inside_byte(), 1);
        assert_eq!(index.shift_in_byte(), 4);

        assert_eq!(GeneIndex::new(4).byte_index(), 1);
        assert_eq!(GeneIndex::new(3).shift_in_byte(), 0);
        assert_eq!(GeneIndex::new(0).shift_in_byte(), 6);
    }

    #[test]
    fn test_arithmetic_and_ordering() {
        let a = GeneIndex::new(5);
        assert_eq!(a + 3, GeneIndex::new(8));
        assert_eq!(a - GeneIndex::new(2), GeneIndex::new(3));
        assert_eq!(a + GeneIndex::new(1), GeneIndex::new(6));
        assert!(GeneIndex::new(2) < a);
        assert!(!GeneIndex::INVALID.is_valid());
        assert_eq!(a.to_string(), "G:5");
    }
}
