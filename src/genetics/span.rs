use super::index::GeneIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Half-open run of base pairs `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneSpan {
    pub start: GeneIndex,
    pub end: GeneIndex,
}

impl GeneSpan {
    /// The empty span. Acts as the identity when spans are combined.
    pub const INVALID: GeneSpan = GeneSpan {
        start: GeneIndex::INVALID,
        end: GeneIndex::INVALID,
    };

    pub fn new(start: impl Into<GeneIndex>, end: impl Into<GeneIndex>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_origin(origin: i32, length: i32) -> Self {
        Self::new(origin, origin + length)
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    pub fn len(&self) -> i32 {
        self.end.0 - self.start.0
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    /// Number of bytes touched by this span
    pub fn byte_length(&self) -> usize {
        if !self.is_valid() || self.is_empty() {
            return 0;
        }
        (self.end - 1).byte_index() - self.start.byte_index() + 1
    }

    pub fn collides_with(&self, other: &GeneSpan) -> bool {
        // if the start of either is contained within the other, must be collision
        (other.start >= self.start && other.start < self.end)
            || (self.start >= other.start && self.start < other.end)
    }

    /// Minimal span enclosing both operands
    pub fn union(&self, other: &GeneSpan) -> GeneSpan {
        if !other.is_valid() {
            return *self;
        }
        if !self.is_valid() {
            return *other;
        }
        GeneSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn indices(&self) -> impl Iterator<Item = GeneIndex> {
        (self.start.0..self.end.0).map(GeneIndex)
    }
}

impl Default for GeneSpan {
    fn default() -> Self {
        GeneSpan::INVALID
    }
}

impl Add for GeneSpan {
    type Output = GeneSpan;

    fn add(self, rhs: GeneSpan) -> GeneSpan {
        self.union(&rhs)
    }
}

impl AddAssign for GeneSpan {
    fn add_assign(&mut self, rhs: GeneSpan) {
        *self = self.union(&rhs);
    }
}

impl fmt::Display for GeneSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "[invalid]");
        }
        write!(f, "[{}, {})", self.start.0, self.end.0)
    }
}
