//! Whole-primitive fan triangulation.

use super::PolyRanges;

/// Corner triples of the fan triangulation of every polygon, flattened.
///
/// Works over the whole corner range at once: every corner that is neither the last nor the
/// second-to-last of its polygon opens one triangle `(start, row + 1, row + 2)`, where `start`
/// is the first corner of that polygon. A `k`-gon yields `k - 2` triangles; smaller polygons
/// yield none.
pub(crate) fn fan_corners(ranges: &PolyRanges) -> Vec<usize> {
    let per_corner = |bounds: &[usize]| -> Vec<usize> {
        bounds
            .iter()
            .zip(ranges.vcounts.iter())
            .flat_map(|(&b, &n)| std::iter::repeat(b).take(n as usize))
            .collect()
    };
    let starts = per_corner(&ranges.polystarts);
    let ends = per_corner(&ranges.polyends);

    (0..ranges.nvertices())
        .filter(|&row| row + 2 < ends[row])
        .flat_map(|row| [starts[row], row + 1, row + 2])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_arity() {
        let ranges = PolyRanges::new(vec![3, 4, 5].into());
        let corners = fan_corners(&ranges);
        assert_eq!(
            corners,
            vec![
                0, 1, 2, // triangle
                3, 4, 5, 3, 5, 6, // quad
                7, 8, 9, 7, 9, 10, 7, 10, 11, // pentagon
            ]
        );
    }

    #[test]
    fn test_empty() {
        let ranges = PolyRanges::new(Vec::new().into());
        assert!(fan_corners(&ranges).is_empty());
    }
}
