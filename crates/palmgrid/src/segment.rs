//! Binary mask cleanup and boundary extraction.
//!
//! Thin wrappers over the `imageproc` primitives (morphological open,
//! border following) plus the ROI crop. Everything downstream works on
//! [`Polygon`] boundaries.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;

use crate::config::RoiConfig;
use crate::geometry::Polygon;
use crate::grid::ScalarGrid;

/// Threshold a foreground map into an 8-bit binary mask.
pub fn binarize(fg: &ScalarGrid) -> GrayImage {
    let (w, h) = fg.dimensions();
    let data: Vec<u8> = fg
        .as_slice()
        .iter()
        .map(|&v| if v > 0.0 { 255 } else { 0 })
        .collect();
    GrayImage::from_raw(w as u32, h as u32, data).expect("mask buffer matches grid dimensions")
}

/// Morphological open (erode then dilate) with a 3×3 structuring element,
/// removing speckle noise from the mask.
pub fn morph_clean(mask: &GrayImage) -> GrayImage {
    open(mask, Norm::LInf, 1)
}

/// Force cells outside the region of interest to background.
pub fn crop_roi(mask: &mut GrayImage, roi: &RoiConfig) {
    let (w, h) = mask.dimensions();
    for y in 0..h {
        for x in 0..w {
            if x < roi.x_min || x > roi.x_max || y < roi.y_min || y > roi.y_max {
                mask.put_pixel(x, y, image::Luma([0]));
            }
        }
    }
}

/// Extract outer-border polygons of every connected foreground region.
///
/// Inner (hole) borders are dropped; degenerate boundaries of fewer than
/// three points are skipped per the error model.
pub fn extract_polygons(mask: &GrayImage) -> Vec<Polygon> {
    let contours: Vec<Contour<i32>> = find_contours(mask);
    contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.points.len() >= 3)
        .map(|c| {
            Polygon::new(
                c.points
                    .iter()
                    .map(|p| [p.x as f64, p.y as f64])
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_block(w: u32, h: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        let mut m = GrayImage::new(w, h);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                m.put_pixel(x, y, image::Luma([255]));
            }
        }
        m
    }

    #[test]
    fn test_open_removes_speckle_keeps_block() {
        let mut m = mask_with_block(32, 32, 8, 8, 10);
        m.put_pixel(2, 2, image::Luma([255])); // lone speckle
        let cleaned = morph_clean(&m);
        assert_eq!(cleaned.get_pixel(2, 2)[0], 0);
        assert_eq!(cleaned.get_pixel(12, 12)[0], 255);
    }

    #[test]
    fn test_crop_roi_zeroes_outside() {
        let mut m = mask_with_block(16, 16, 0, 0, 16);
        crop_roi(
            &mut m,
            &RoiConfig {
                x_min: 4,
                x_max: 11,
                y_min: 4,
                y_max: 11,
            },
        );
        assert_eq!(m.get_pixel(0, 0)[0], 0);
        assert_eq!(m.get_pixel(12, 5)[0], 0);
        assert_eq!(m.get_pixel(5, 5)[0], 255);
        assert_eq!(m.get_pixel(11, 11)[0], 255);
    }

    #[test]
    fn test_extract_single_outer_polygon() {
        let m = mask_with_block(32, 32, 10, 10, 8);
        let polys = extract_polygons(&m);
        assert_eq!(polys.len(), 1);
        let (min, max) = polys[0].bounding_box().unwrap();
        assert_eq!(min, [10.0, 10.0]);
        assert_eq!(max, [17.0, 17.0]);
        assert!(polys[0].area() > 0.0);
    }
}
