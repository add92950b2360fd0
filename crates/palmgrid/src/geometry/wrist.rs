//! Wrist detection: where the boundary crosses a reference line under the
//! palm.
//!
//! The reference line runs through `palm_center − (0, radius)` with a purely
//! horizontal direction. This deliberately approximates the minor principal
//! axis with an axis-aligned line; the PCA minor axis is computed elsewhere
//! and reported, but the detection itself keeps the axis-aligned form.

use super::polygon::Polygon;

/// Maximum perpendicular distance (grid length units) for a boundary point
/// to count as lying on the wrist line.
pub const WRIST_BAND: f64 = 3.0;

/// Perpendicular distance from `p` to the infinite line through `p1`/`p2`.
/// `None` when the two line points coincide.
pub fn dist_point_to_line(p1: [f64; 2], p2: [f64; 2], p: [f64; 2]) -> Option<f64> {
    let dy = p2[1] - p1[1];
    let dx = p2[0] - p1[0];
    let den = (dy * dy + dx * dx).sqrt();
    if den <= f64::EPSILON {
        return None;
    }
    let num = (dy * p[0] - dx * p[1] + p2[0] * p1[1] - p2[1] * p1[0]).abs();
    Some(num / den)
}

/// Walk the boundary forward from index 0 for the first point within
/// [`WRIST_BAND`] of the wrist line, and backward from the last index for
/// the symmetric point. `None` unless both are found.
pub fn find_wrist(polygon: &Polygon, palm_center: [f64; 2], radius: f64) -> Option<(usize, usize)> {
    let p1 = [palm_center[0], palm_center[1] - radius];
    let p2 = [p1[0] + 1.0, p1[1]];

    let start = (0..polygon.len())
        .find(|&k| dist_point_to_line(p1, p2, polygon.point(k)).is_some_and(|d| d < WRIST_BAND))?;
    let end = (0..polygon.len())
        .rev()
        .find(|&k| dist_point_to_line(p1, p2, polygon.point(k)).is_some_and(|d| d < WRIST_BAND))?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dist_point_to_line() {
        let d = dist_point_to_line([0.0, 0.0], [10.0, 0.0], [3.0, 4.0]).unwrap();
        assert_relative_eq!(d, 4.0, epsilon = 1e-12);
        assert!(dist_point_to_line([1.0, 1.0], [1.0, 1.0], [0.0, 0.0]).is_none());
    }

    #[test]
    fn test_find_wrist_on_rectangle() {
        // Rectangle from (0,0) to (20,30); palm at (10,20), radius 10 puts
        // the wrist line at y = 10.
        let poly = Polygon::new(vec![
            [0.0, 0.0],
            [20.0, 0.0],
            [20.0, 10.0],
            [20.0, 30.0],
            [0.0, 30.0],
            [0.0, 10.0],
        ]);
        let (start, end) = find_wrist(&poly, [10.0, 20.0], 10.0).unwrap();
        assert_eq!(start, 2);
        assert_eq!(end, 5);
    }

    #[test]
    fn test_find_wrist_misses() {
        let poly = Polygon::new(vec![[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0]]);
        // Wrist line at y = -20, far from every vertex.
        assert!(find_wrist(&poly, [2.0, 0.0], 20.0).is_none());
    }
}
