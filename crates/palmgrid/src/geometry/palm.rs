//! Palm center and radius from interior image moments.

use image::GrayImage;

use super::polygon::{dist, Polygon};

/// Palm location estimate for one hand region.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palm {
    /// Mass-weighted centroid of the region interior.
    pub center: [f64; 2],
    /// Minimum distance from the center to any boundary point. This is an
    /// inscribed-circle approximation, not a largest-empty-circle solve.
    pub radius: f64,
}

/// Rasterize the polygon interior over the mask and compute the zeroth and
/// first moments, weighting each pixel by its mask value. `None` when the
/// accumulated mass is zero (degenerate or fully cropped region).
pub fn palm_center(polygon: &Polygon, mask: &GrayImage) -> Option<Palm> {
    let (min, max) = polygon.bounding_box()?;
    let (mw, mh) = mask.dimensions();
    let x0 = min[0].floor().max(0.0) as u32;
    let y0 = min[1].floor().max(0.0) as u32;
    let x1 = (max[0].ceil() as u32).min(mw.saturating_sub(1));
    let y1 = (max[1].ceil() as u32).min(mh.saturating_sub(1));

    let mut m00 = 0.0f64;
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if polygon.contains([x as f64, y as f64]) {
                let v = mask.get_pixel(x, y)[0] as f64;
                m00 += v;
                m10 += x as f64 * v;
                m01 += y as f64 * v;
            }
        }
    }
    if m00 <= 0.0 {
        return None;
    }
    let center = [m10 / m00, m01 / m00];
    let radius = polygon
        .points()
        .iter()
        .map(|&p| dist(p, center))
        .fold(f64::INFINITY, f64::min);
    Some(Palm { center, radius })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filled_mask(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |_, _| image::Luma([255]))
    }

    #[test]
    fn test_square_palm() {
        let poly = Polygon::new(vec![[10.0, 10.0], [30.0, 10.0], [30.0, 30.0], [10.0, 30.0]]);
        let palm = palm_center(&poly, &filled_mask(40, 40)).unwrap();
        assert_relative_eq!(palm.center[0], 20.0, epsilon = 1e-9);
        assert_relative_eq!(palm.center[1], 20.0, epsilon = 1e-9);
        // Only the four corners are boundary points here.
        assert_relative_eq!(palm.radius, (2.0f64).sqrt() * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_center_within_bounding_box() {
        let poly = Polygon::new(vec![
            [5.0, 5.0],
            [25.0, 8.0],
            [28.0, 20.0],
            [15.0, 27.0],
            [6.0, 18.0],
        ]);
        let palm = palm_center(&poly, &filled_mask(32, 32)).unwrap();
        let (min, max) = poly.bounding_box().unwrap();
        assert!(palm.center[0] >= min[0] && palm.center[0] <= max[0]);
        assert!(palm.center[1] >= min[1] && palm.center[1] <= max[1]);
    }

    #[test]
    fn test_zero_mass_region() {
        let poly = Polygon::new(vec![[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0]]);
        let empty = GrayImage::new(10, 10);
        assert!(palm_center(&poly, &empty).is_none());
    }
}
