//! Fingertip extraction, two independent strategies.
//!
//! Strategy A (segment-longest-chord) partitions the boundary arc between
//! the wrist points into segments delimited by convexity defects and keeps
//! the point of maximum chord deviation per segment, gated by opening angle.
//!
//! Strategy B (hull-cluster + k-curvature) collapses runs of nearby hull
//! vertices to one representative each, then keeps representatives whose
//! k-curvature angle turns sharp for some step offset in `[k_min, k_max)`.

use crate::config::RoiConfig;

use super::hull::Defect;
use super::polygon::{dist, Polygon};

/// Angle at `p` formed by rays toward `p1` and `p2`, in degrees.
/// `None` when either ray has zero length.
pub fn find_angle(p: [f64; 2], p1: [f64; 2], p2: [f64; 2]) -> Option<f64> {
    let n1 = dist(p1, p);
    let n2 = dist(p2, p);
    if n1 <= f64::EPSILON || n2 <= f64::EPSILON {
        return None;
    }
    let dot = (p1[0] - p[0]) * (p2[0] - p[0]) + (p1[1] - p[1]) * (p2[1] - p[1]);
    Some((dot / (n1 * n2)).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Strategy A. `wrist` is `(start, end)` from [`super::find_wrist`];
/// `defects` must be sorted by polygon index. Returns tip indices in
/// boundary order. Empty when the wrist points are closer than
/// `min_separation` indices apart, or when no defects delimit segments.
pub fn chord_fingertips(
    polygon: &Polygon,
    wrist: (usize, usize),
    defects: &[Defect],
    max_angle_deg: f64,
    min_separation: usize,
) -> Vec<usize> {
    let (w0, w1) = wrist;
    let mut tips = Vec::new();
    if w1 <= w0 + min_separation {
        return tips;
    }
    let inner: Vec<usize> = defects
        .iter()
        .map(|d| d.index)
        .filter(|&i| i > w0 && i < w1)
        .collect();
    if inner.is_empty() {
        return tips;
    }

    let mut start = w0;
    for &next in inner.iter().chain(std::iter::once(&w1)) {
        let p1 = polygon.point(start);
        let p2 = polygon.point(next);
        let mut best: Option<(usize, f64)> = None;
        for j in (start + 1)..next {
            let p = polygon.point(j);
            let d = dist(p, p1) + dist(p, p2);
            if best.map_or(true, |(_, bd)| d > bd) {
                best = Some((j, d));
            }
        }
        if let Some((idx, _)) = best {
            if find_angle(polygon.point(idx), p1, p2).is_some_and(|a| a < max_angle_deg) {
                tips.push(idx);
            }
        }
        start = next;
    }
    tips
}

/// Drop hull vertices within one cell of the region-of-interest border;
/// tips pinned to the crop edge are artifacts, not fingers.
pub fn remove_border_points(polygon: &Polygon, hull: &[usize], roi: &RoiConfig) -> Vec<usize> {
    if hull.len() <= 2 {
        return Vec::new();
    }
    // Margins in f64: a degenerate bound of 0 must not wrap, it just
    // filters everything on that axis.
    hull.iter()
        .copied()
        .filter(|&i| {
            let p = polygon.point(i);
            p[0] > roi.x_min as f64 + 1.0
                && p[0] < roi.x_max as f64 - 1.0
                && p[1] > roi.y_min as f64 + 1.0
                && p[1] < roi.y_max as f64 - 1.0
        })
        .collect()
}

/// Group hull vertices into clusters of consecutive-in-hull-order members
/// closer than `separation`, and collapse each cluster to the member nearest
/// the cluster centroid.
pub fn cluster_hull_points(polygon: &Polygon, hull: &[usize], separation: f64) -> Vec<usize> {
    let len = hull.len();
    let mut reduced = Vec::new();
    if len <= 2 {
        return reduced;
    }

    // Start right after the first gap wider than the separation, so no
    // cluster is split by the wrap point.
    let Some(start) = (0..len).find_map(|k| {
        let n = (k + 1) % len;
        (dist(polygon.point(hull[k]), polygon.point(hull[n])) > separation).then_some(n)
    }) else {
        return reduced;
    };

    let mut cluster: Vec<usize> = vec![hull[start]];
    for i in start..start + len {
        let k = i % len;
        let n = (i + 1) % len;
        if dist(polygon.point(hull[k]), polygon.point(hull[n])) > separation {
            if let Some(rep) = centroid_nearest(polygon, &cluster) {
                reduced.push(rep);
            }
            cluster.clear();
        }
        cluster.push(hull[n]);
    }
    reduced
}

/// The cluster member closest to the cluster centroid.
fn centroid_nearest(polygon: &Polygon, cluster: &[usize]) -> Option<usize> {
    if cluster.is_empty() {
        return None;
    }
    let inv = 1.0 / cluster.len() as f64;
    let mut centroid = [0.0f64; 2];
    for &i in cluster {
        let p = polygon.point(i);
        centroid[0] += p[0] * inv;
        centroid[1] += p[1] * inv;
    }
    cluster
        .iter()
        .copied()
        .min_by(|&a, &b| {
            let da = dist(polygon.point(a), centroid);
            let db = dist(polygon.point(b), centroid);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Strategy B sharpness test: `candidate` indices survive when the angle to
/// the boundary points `k` steps away (wrapping) drops below
/// `max_angle_deg` for some `k` in `[k_min, k_max)`.
pub fn k_curvature(
    polygon: &Polygon,
    candidates: &[usize],
    k_min: usize,
    k_max: usize,
    max_angle_deg: f64,
) -> Vec<usize> {
    let len = polygon.len();
    let mut tips = Vec::new();
    if len < 3 {
        return tips;
    }
    for &n in candidates {
        let p = polygon.point(n);
        for k in k_min.max(1)..k_max {
            let step = k % len;
            let p1 = polygon.point((n + len - step) % len);
            let p2 = polygon.point((n + step) % len);
            if find_angle(p, p1, p2).is_some_and(|a| a < max_angle_deg) {
                tips.push(n);
                break;
            }
        }
    }
    tips
}
