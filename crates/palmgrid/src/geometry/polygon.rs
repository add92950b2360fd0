//! Ordered boundary of one connected foreground region.

use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
#[inline]
pub(crate) fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// An ordered sequence of boundary points. Read-only once built; all index
/// lists produced by the geometry stages refer into this sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<[f64; 2]>,
}

impl Polygon {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn point(&self, i: usize) -> [f64; 2] {
        self.points[i]
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a[0] * b[1] - b[0] * a[1];
        }
        acc.abs() / 2.0
    }

    /// Axis-aligned bounding box `(min, max)`; `None` when empty.
    pub fn bounding_box(&self) -> Option<([f64; 2], [f64; 2])> {
        if self.points.is_empty() {
            return None;
        }
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        Some((min, max))
    }

    /// Even-odd point-in-polygon test; points on the boundary count as
    /// inside, matching the rasterization the palm moments expect.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[j];
            let b = self.points[i];
            if on_segment(a, b, p) {
                return true;
            }
            if (b[1] > p[1]) != (a[1] > p[1]) {
                let x_cross = (a[0] - b[0]) * (p[1] - b[1]) / (a[1] - b[1]) + b[0];
                if p[0] < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

fn on_segment(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> bool {
    let cross = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    if cross.abs() > 1e-9 {
        return false;
    }
    let dot = (p[0] - a[0]) * (b[0] - a[0]) + (p[1] - a[1]) * (b[1] - a[1]);
    let len_sq = (b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2);
    dot >= 0.0 && dot <= len_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::new(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]])
    }

    #[test]
    fn test_area_and_bbox() {
        let s = square();
        assert_relative_eq!(s.area(), 100.0);
        assert_eq!(s.bounding_box(), Some(([0.0, 0.0], [10.0, 10.0])));
        assert_eq!(Polygon::new(vec![[1.0, 1.0]]).area(), 0.0);
    }

    #[test]
    fn test_contains() {
        let s = square();
        assert!(s.contains([5.0, 5.0]));
        assert!(s.contains([0.0, 5.0]), "boundary counts as inside");
        assert!(s.contains([10.0, 10.0]), "vertex counts as inside");
        assert!(!s.contains([10.1, 5.0]));
        assert!(!s.contains([-0.1, -0.1]));
    }

    #[test]
    fn test_concave_contains() {
        // A "U" shape: the notch interior is outside.
        let u = Polygon::new(vec![
            [0.0, 0.0],
            [9.0, 0.0],
            [9.0, 9.0],
            [6.0, 9.0],
            [6.0, 3.0],
            [3.0, 3.0],
            [3.0, 9.0],
            [0.0, 9.0],
        ]);
        assert!(u.contains([1.5, 5.0]));
        assert!(u.contains([7.5, 5.0]));
        assert!(!u.contains([4.5, 6.0]));
    }
}
