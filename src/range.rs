//! Closed integer interval intersection used for gap-size consensus.

/// Intersect two closed intervals. Inverted inputs are normalized first.
/// Returns `None` when the intervals do not overlap.
pub fn range_intersect(a: (i64, i64), b: (i64, i64)) -> Option<(i64, i64)> {
    let (a_min, a_max) = if a.0 > a.1 { (a.1, a.0) } else { a };
    let (b_min, b_max) = if b.0 > b.1 { (b.1, b.0) } else { b };

    if a_max < b_min || b_max < a_min {
        return None;
    }

    Some((a_min.max(b_min), a_max.min(b_max)))
}

/// Fold `range_intersect` over a list of intervals.
///
/// A single interval is returned untouched, even when inverted; an empty
/// list has no intersection.
pub fn ranges_intersect(ranges: &[(i64, i64)]) -> Option<(i64, i64)> {
    let (first, rest) = ranges.split_first()?;
    rest.iter()
        .try_fold(*first, |acc, &r| range_intersect(acc, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_intersect() {
        assert_eq!(range_intersect((0, 10), (5, 20)), Some((5, 10)));
        assert_eq!(range_intersect((10, 0), (5, 20)), Some((5, 10)));
        assert_eq!(range_intersect((0, 4), (5, 20)), None);
        // Touching endpoints overlap on a single coordinate
        assert_eq!(range_intersect((0, 5), (5, 20)), Some((5, 5)));
    }

    #[test]
    fn test_ranges_intersect() {
        assert_eq!(ranges_intersect(&[]), None);
        assert_eq!(ranges_intersect(&[(30, -20)]), Some((30, -20)));
        assert_eq!(
            ranges_intersect(&[(0, 400), (100, 500), (50, 300)]),
            Some((100, 300))
        );
        assert_eq!(ranges_intersect(&[(0, 100), (200, 300), (0, 500)]), None);
    }
}
