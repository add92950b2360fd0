//! Convex hull and convexity defects of a boundary.

use super::polygon::Polygon;
use super::wrist::dist_point_to_line;

/// A boundary point dipping inward from the hull by more than the
/// configured depth.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Defect {
    /// Index into the polygon this defect was computed from.
    pub index: usize,
    /// Perpendicular distance from the hull chord.
    pub depth: f64,
}

/// Convex hull of the polygon vertices (monotone chain, strict turns).
///
/// Returns vertex indices sorted in contour order, so consecutive entries
/// delimit the boundary arcs the defect search walks.
pub fn convex_hull(polygon: &Polygon) -> Vec<usize> {
    let n = polygon.len();
    if n < 3 {
        return (0..n).collect();
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let pa = polygon.point(a);
        let pb = polygon.point(b);
        pa[0]
            .partial_cmp(&pb[0])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(pa[1].partial_cmp(&pb[1]).unwrap_or(std::cmp::Ordering::Equal))
    });

    let cross = |o: usize, a: usize, b: usize| -> f64 {
        let po = polygon.point(o);
        let pa = polygon.point(a);
        let pb = polygon.point(b);
        (pa[0] - po[0]) * (pb[1] - po[1]) - (pa[1] - po[1]) * (pb[0] - po[0])
    };

    let mut hull: Vec<usize> = Vec::with_capacity(2 * n);
    for &i in &order {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0 {
            hull.pop();
        }
        hull.push(i);
    }
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }
    hull.pop(); // last point repeats the first

    hull.sort_unstable();
    hull.dedup();
    hull
}

/// Deepest inward boundary point between each pair of consecutive hull
/// vertices, kept when its depth exceeds `min_depth`. Output is sorted by
/// polygon index.
pub fn convexity_defects(polygon: &Polygon, hull: &[usize], min_depth: f64) -> Vec<Defect> {
    let n = polygon.len();
    let mut defects = Vec::new();
    if hull.len() < 3 || n < 4 {
        return defects;
    }
    for (pos, &h0) in hull.iter().enumerate() {
        let h1 = hull[(pos + 1) % hull.len()];
        let p1 = polygon.point(h0);
        let p2 = polygon.point(h1);

        let mut deepest: Option<Defect> = None;
        let mut j = (h0 + 1) % n;
        while j != h1 {
            if let Some(d) = dist_point_to_line(p1, p2, polygon.point(j)) {
                if deepest.map_or(true, |best| d > best.depth) {
                    deepest = Some(Defect { index: j, depth: d });
                }
            }
            j = (j + 1) % n;
        }
        if let Some(d) = deepest {
            if d.depth > min_depth {
                defects.push(d);
            }
        }
    }
    defects.sort_by_key(|d| d.index);
    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let poly = Polygon::new(vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [5.0, 5.0], // interior of the hull
            [10.0, 10.0],
            [0.0, 10.0],
        ]);
        let hull = convex_hull(&poly);
        assert_eq!(hull, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_defect_on_notched_square() {
        // Square with a deep notch on the top edge.
        let poly = Polygon::new(vec![
            [0.0, 0.0],
            [4.0, 0.0],
            [5.0, 6.0], // notch bottom
            [6.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 10.0],
        ]);
        // Collinear bottom-edge points are dropped along with the notch.
        let hull = convex_hull(&poly);
        assert_eq!(hull, vec![0, 4, 5, 6]);
        let defects = convexity_defects(&poly, &hull, 3.0);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].index, 2);
        assert_relative_eq!(defects[0].depth, 6.0, epsilon = 1e-9);
        // A higher floor filters it out.
        assert!(convexity_defects(&poly, &hull, 7.0).is_empty());
    }

    #[test]
    fn test_degenerate_inputs() {
        let line = Polygon::new(vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(convex_hull(&line), vec![0, 1]);
        assert!(convexity_defects(&line, &[0, 1], 0.0).is_empty());
    }
}
