use serde::{Deserialize, Serialize};
use std::fmt;

/// One closed interval `[min_value, max_value]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min_value: f32,
    pub max_value: f32,
}

impl FloatRange {
    pub fn new(min_value: f32, max_value: f32) -> Self {
        Self {
            min_value,
            max_value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Boundary {
    is_min: bool,
    value: f32,
}

fn ceil_to_int(value: f32) -> i32 {
    if value == f32::NEG_INFINITY {
        return i32::MIN;
    }
    if value == f32::INFINITY {
        return i32::MAX;
    }
    value.ceil() as i32
}

fn floor_to_int(value: f32) -> i32 {
    if value == f32::NEG_INFINITY {
        return i32::MIN;
    }
    if value == f32::INFINITY {
        return i32::MAX;
    }
    value.floor() as i32
}

impl Boundary {
    fn min_bound(value: f32, discrete: bool) -> Self {
        let value = if discrete { ceil_to_int(value) as f32 } else { value };
        // -0.0 and 0.0 must sort as one value
        Self {
            is_min: true,
            value: value + 0.0,
        }
    }

    /// Discrete max bounds are exclusive: they sit one past the last included integer
    fn max_bound(value: f32, discrete: bool) -> Self {
        let value = if discrete {
            floor_to_int(value) as f32 + 1.0
        } else {
            value
        };
        Self {
            is_min: false,
            value: value + 0.0,
        }
    }

    fn inverted(self) -> Self {
        Self {
            is_min: !self.is_min,
            value: self.value,
        }
    }
}

/// Sort boundaries and sweep them into disjoint, non-touching intervals.
///
/// At equal values min bounds sort first, so touching intervals fuse. Zero
/// length intervals are dropped.
fn collapse(mut bounds: Vec<Boundary>) -> Vec<Boundary> {
    bounds.sort_by(|a, b| {
        a.value
            .total_cmp(&b.value)
            .then_with(|| b.is_min.cmp(&a.is_min))
    });

    let mut depth = 0i32;
    let mut collapsed: Vec<Boundary> = Vec::with_capacity(bounds.len());
    for bound in bounds {
        if bound.is_min {
            if depth == 0 {
                collapsed.push(bound);
            }
            depth += 1;
            continue;
        }

        depth -= 1;
        if depth != 0 {
            continue;
        }
        if collapsed.last().map(|last| last.value) == Some(bound.value) {
            collapsed.pop();
            continue;
        }
        collapsed.push(bound);
    }
    collapsed
}

/// A normalized union of disjoint closed intervals.
///
/// In discrete mode every bound snaps to whole numbers and a value matches
/// when its floor lies inside an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokenFloatRange {
    compare_discrete: bool,
    boundaries: Vec<Boundary>,
}

impl BrokenFloatRange {
    pub fn new(min: f32, max: f32, discrete: bool) -> Self {
        Self {
            compare_discrete: discrete,
            boundaries: vec![
                Boundary::min_bound(min, discrete),
                Boundary::max_bound(max, discrete),
            ],
        }
    }

    pub fn from_ranges(ranges: impl IntoIterator<Item = FloatRange>, discrete: bool) -> Self {
        let boundaries = ranges
            .into_iter()
            .flat_map(|r| {
                [
                    Boundary::min_bound(r.min_value, discrete),
                    Boundary::max_bound(r.max_value, discrete),
                ]
            })
            .collect();
        Self {
            compare_discrete: discrete,
            boundaries: collapse(boundaries),
        }
    }

    pub fn is_discrete(&self) -> bool {
        self.compare_discrete
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// The intervals this range is made of. Discrete maxima are reported inclusive.
    pub fn representative_ranges(&self) -> Vec<FloatRange> {
        let adjust = if self.compare_discrete { -1.0 } else { 0.0 };
        self.boundaries
            .windows(2)
            .filter(|pair| pair[0].is_min && !pair[1].is_min)
            .map(|pair| FloatRange::new(pair[0].value, pair[1].value + adjust))
            .collect()
    }

    /// Widen to also accept everything `other` accepts
    pub fn merge_in(&mut self, other: &BrokenFloatRange) {
        let mut bounds = std::mem::take(&mut self.boundaries);
        bounds.extend(other.boundaries.iter().copied());
        self.boundaries = collapse(bounds);
    }

    /// Narrow to reject everything `other` accepts
    pub fn exclude(&mut self, other: &BrokenFloatRange) {
        let mut bounds = std::mem::take(&mut self.boundaries);
        bounds.extend(other.boundaries.iter().map(|b| b.inverted()));
        self.boundaries = collapse(bounds);
    }

    /// The complement over the whole number line
    pub fn invert(&self) -> BrokenFloatRange {
        let mut bounds = Vec::with_capacity(self.boundaries.len() + 2);
        bounds.push(Boundary::min_bound(f32::NEG_INFINITY, self.compare_discrete));
        bounds.extend(self.boundaries.iter().map(|b| b.inverted()));
        bounds.push(Boundary::max_bound(f32::INFINITY, self.compare_discrete));
        BrokenFloatRange {
            compare_discrete: self.compare_discrete,
            boundaries: collapse(bounds),
        }
    }

    pub fn matches(&self, value: f32) -> bool {
        let value = if self.compare_discrete {
            value.floor()
        } else {
            value
        };
        self.representative_ranges()
            .iter()
            .any(|r| value >= r.min_value && value <= r.max_value)
    }
}

impl fmt::Display for BrokenFloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .representative_ranges()
            .iter()
            .map(|r| format!("[{}, {}]", r.min_value, r.max_value))
            .collect();
        if parts.is_empty() {
            return write!(f, "(empty)");
        }
        write!(f, "{}", parts.join(" u "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair_is_not_collapsed() {
        let point = BrokenFloatRange::new(4.0, 4.0, false);
        assert_eq!(point.representative_ranges(), vec![FloatRange::new(4.0, 4.0)]);
        assert!(point.matches(4.0));

        let collapsed = BrokenFloatRange::from_ranges([FloatRange::new(4.0, 4.0)], false);
        assert!(collapsed.is_empty());
    }

    #[test]
    fn test_discrete_representation() {
        let range = BrokenFloatRange::new(2.3, 5.7, true);
        assert_eq!(range.representative_ranges(), vec![FloatRange::new(3.0, 5.0)]);

        let point = BrokenFloatRange::new(3.0, 3.0, true);
        assert_eq!(point.representative_ranges(), vec![FloatRange::new(3.0, 3.0)]);
    }

    #[test]
    fn test_merge_into_itself_is_a_no_op() {
        let mut range = BrokenFloatRange::from_ranges(
            [FloatRange::new(1.0, 3.0), FloatRange::new(5.0, 9.0)],
            false,
        );
        let before = range.representative_ranges();
        let copy = range.clone();
        range.merge_in(&copy);
        assert_eq!(range.representative_ranges(), before);
    }

    #[test]
    fn test_discrete_inversion_maps_infinities_to_integer_extremes() {
        let inverted = BrokenFloatRange::new(2.3, 5.7, true).invert();
        let ranges = inverted.representative_ranges();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].min_value, i32::MIN as f32);
        assert_eq!(ranges[0].max_value, 2.0);
        assert_eq!(ranges[1].min_value, 6.0);
    }

    #[test]
    fn test_excluding_everything_leaves_nothing() {
        let mut range = BrokenFloatRange::new(1.0, 3.0, false);
        range.exclude(&BrokenFloatRange::new(0.0, 10.0, false));
        assert!(range.is_empty());
        assert!(!range.matches(2.0));
    }
}
