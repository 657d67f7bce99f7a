use mendelgen::engines::targets::{BrokenFloatRange, FloatRange};

const DELTA: f32 = 0.1;

#[derive(Debug, PartialEq)]
enum Boundary {
    /// Matches at and above, not below
    Min,
    /// Matches at and below, not above
    Max,
    AllMatch,
    NoMatch,
    Invalid,
}

fn classify(boundary: f32, range: &BrokenFloatRange) -> Boundary {
    let down = range.matches(boundary - DELTA);
    let at = range.matches(boundary);
    let up = range.matches(boundary + DELTA);
    match (down, at, up) {
        (false, false, false) => Boundary::NoMatch,
        (true, true, true) => Boundary::AllMatch,
        (true, true, false) => Boundary::Max,
        (false, true, true) => Boundary::Min,
        _ => Boundary::Invalid,
    }
}

fn continuous(min: f32, max: f32) -> BrokenFloatRange {
    BrokenFloatRange::new(min, max, false)
}

fn discrete(min: f32, max: f32) -> BrokenFloatRange {
    BrokenFloatRange::new(min, max, true)
}

#[test]
fn test_boundaries_of_simple_continuous_range() {
    let range = continuous(2.3, 5.7);
    assert_eq!(classify(2.3, &range), Boundary::Min);
    assert_eq!(classify(5.7, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_boundaries_of_simple_discrete_range() {
    let range = discrete(2.3, 5.7);
    assert_eq!(classify(3.0, &range), Boundary::Min);
    assert_eq!(classify(6.0 - DELTA, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);

    assert!(!range.matches(2.0));
    assert!(range.matches(3.0));
    assert!(range.matches(5.0));
    assert!(!range.matches(6.0));
}

#[test]
fn test_boundaries_of_point_discrete_range() {
    let range = discrete(3.0, 3.0);
    assert_eq!(classify(3.0, &range), Boundary::Min);
    assert_eq!(classify(4.0 - DELTA, &range), Boundary::Max);
    assert_eq!(range.representative_ranges(), vec![FloatRange::new(3.0, 3.0)]);
}

#[test]
fn test_merges_non_overlapping_ranges() {
    let mut range = continuous(1.0, 3.0);
    range.merge_in(&continuous(5.0, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::Max);
    assert_eq!(classify(5.0, &range), Boundary::Min);
    assert_eq!(classify(9.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 2);
}

#[test]
fn test_merges_touching_ranges() {
    let mut range = continuous(1.0, 3.0);
    range.merge_in(&continuous(3.0, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::AllMatch);
    assert_eq!(classify(9.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_merges_adjacent_discrete_points() {
    let mut range = discrete(1.0, 1.0);
    range.merge_in(&discrete(2.0, 2.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0, &range), Boundary::AllMatch);
    assert_eq!(classify(3.0 - DELTA, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_merges_overlapping_ranges() {
    let mut range = continuous(1.0, 3.1);
    range.merge_in(&continuous(2.9, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::AllMatch);
    assert_eq!(classify(9.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_merges_overlapping_discrete_points() {
    let mut range = discrete(1.0, 1.0);
    range.merge_in(&discrete(1.3, 1.5));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0 - DELTA, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_merges_completely_overlapping_ranges() {
    let mut range = continuous(1.0, 7.0);
    range.merge_in(&continuous(2.6, 5.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.6, &range), Boundary::AllMatch);
    assert_eq!(classify(5.0, &range), Boundary::AllMatch);
    assert_eq!(classify(7.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_merges_overlapping_ranges_at_multiple_spots() {
    let mut range = continuous(1.0, 3.1);
    range.merge_in(&continuous(4.0, 5.0));
    range.merge_in(&continuous(8.0, 10.0));
    range.merge_in(&continuous(2.9, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::AllMatch);
    assert_eq!(classify(9.0, &range), Boundary::AllMatch);
    assert_eq!(classify(10.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_non_overlapping_range() {
    let mut range = continuous(1.0, 3.0);
    range.exclude(&continuous(5.0, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::Max);
    assert_eq!(classify(5.0, &range), Boundary::NoMatch);
    assert_eq!(classify(9.0, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_non_overlapping_discrete_points() {
    let mut range = discrete(1.0, 1.0);
    range.exclude(&discrete(3.0, 3.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0 - DELTA, &range), Boundary::Max);
    assert_eq!(classify(3.0, &range), Boundary::NoMatch);
    assert_eq!(classify(4.0 - DELTA, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_overlapping_discrete_points() {
    let mut range = discrete(1.0, 2.0);
    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0, &range), Boundary::AllMatch);
    assert_eq!(classify(3.0 - DELTA, &range), Boundary::Max);

    range.exclude(&discrete(2.0, 2.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0 - DELTA, &range), Boundary::Max);
    assert_eq!(classify(3.0 - DELTA, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_discrete_point_given_as_fractional_range() {
    let mut range = discrete(1.0, 2.0);
    range.exclude(&discrete(1.9, 2.5));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.0 - DELTA, &range), Boundary::Max);
    assert_eq!(classify(3.0 - DELTA, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_touching_range() {
    let mut range = continuous(1.0, 3.0);
    range.exclude(&continuous(3.0, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(3.0, &range), Boundary::Max);
    assert_eq!(classify(9.0, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excludes_overlapping_range() {
    let mut range = continuous(1.0, 3.0);
    range.exclude(&continuous(2.3, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.3, &range), Boundary::Max);
    assert_eq!(classify(3.0, &range), Boundary::NoMatch);
    assert_eq!(classify(9.0, &range), Boundary::NoMatch);
    assert_eq!(range.representative_ranges().len(), 1);
}

#[test]
fn test_excluding_the_middle_splits_the_range() {
    let mut range = continuous(1.0, 7.0);
    range.exclude(&continuous(2.3, 5.2));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.3, &range), Boundary::Max);
    assert_eq!(classify(4.0, &range), Boundary::NoMatch);
    assert_eq!(classify(5.2, &range), Boundary::Min);
    assert_eq!(classify(7.0, &range), Boundary::Max);
    assert_eq!(range.representative_ranges().len(), 2);
}

#[test]
fn test_excludes_overlapping_ranges_at_multiple_spots() {
    let mut range = continuous(1.0, 3.1);
    range.merge_in(&continuous(4.0, 5.0));
    range.merge_in(&continuous(8.0, 10.0));
    range.exclude(&continuous(2.9, 9.0));

    assert_eq!(classify(1.0, &range), Boundary::Min);
    assert_eq!(classify(2.9, &range), Boundary::Max);
    assert_eq!(classify(4.0, &range), Boundary::NoMatch);
    assert_eq!(classify(5.0, &range), Boundary::NoMatch);
    assert_eq!(classify(8.0, &range), Boundary::NoMatch);
    assert_eq!(classify(9.0, &range), Boundary::Min);
    assert_eq!(classify(10.0, &range), Boundary::Max);
    assert_eq!(
        range.representative_ranges(),
        vec![FloatRange::new(1.0, 2.9), FloatRange::new(9.0, 10.0)]
    );
}

#[test]
fn test_inverts_continuous_range() {
    let range = continuous(2.3, 5.7).invert();
    assert_eq!(classify(2.3, &range), Boundary::Max);
    assert_eq!(classify(5.7, &range), Boundary::Min);
    assert_eq!(range.representative_ranges().len(), 2);
}

#[test]
fn test_double_inversion_restores_continuous_range() {
    let original = continuous(2.3, 5.7);
    let range = original.invert().invert();
    assert_eq!(classify(2.3, &range), Boundary::Min);
    assert_eq!(classify(5.7, &range), Boundary::Max);
    assert_eq!(range.representative_ranges(), original.representative_ranges());
}

#[test]
fn test_inverts_discrete_range() {
    let range = discrete(2.3, 5.7).invert();
    assert_eq!(classify(3.0 - DELTA, &range), Boundary::Max);
    assert_eq!(classify(6.0, &range), Boundary::Min);
    assert_eq!(range.representative_ranges().len(), 2);
}

#[test]
fn test_double_inversion_restores_discrete_range() {
    let range = discrete(2.3, 5.7).invert().invert();
    assert_eq!(classify(3.0, &range), Boundary::Min);
    assert_eq!(classify(6.0 - DELTA, &range), Boundary::Max);
    assert_eq!(range.representative_ranges(), vec![FloatRange::new(3.0, 5.0)]);
}
