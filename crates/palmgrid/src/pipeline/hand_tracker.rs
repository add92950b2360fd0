//! The per-frame hand-tracking pipeline.
//!
//! Stages, in order:
//!
//! 1. Fold the frame into the motion heat map; re-sample the background
//!    reference when the scene is still (if enabled).
//! 2. Foreground map: band-pass against the reference, or the absolute
//!    proximity fallback while no reference exists.
//! 3. Binarize, morphological open, ROI crop.
//! 4. Outer-border polygons, keep the up-to-two largest hand candidates.
//! 5. Per hand: palm moments, principal axes, hull, defects, wrist,
//!    fingertips per the configured strategy.
//! 6. Pinch-click hysteresis on `palm_depth − tip_depth`, per hand.

use crate::background::{foreground_absolute, BackgroundModel};
use crate::config::{TipStrategy, TrackerConfig};
use crate::frame::Frame;
use crate::geometry::{
    chord_fingertips, cluster_hull_points, convex_hull, convexity_defects, find_wrist, k_curvature,
    palm_center, principal_axes, remove_border_points, select_hand_polygons, HandPair, Handedness,
    Palm, Polygon,
};
use crate::grid::ScalarGrid;
use crate::hyster::Hysteresis;
use crate::segment::{binarize, crop_roi, extract_polygons, morph_clean};

use super::report::{HandReport, TrackerReport};

/// Stateful hand tracker; feed frames through [`HandTracker::observe`].
#[derive(Debug)]
pub struct HandTracker {
    config: TrackerConfig,
    background: BackgroundModel,
    // Click debounce state, indexed by handedness slot (right, left).
    clicks: [Hysteresis; 2],
}

impl HandTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let click = Hysteresis::new(config.click_upper, config.click_lower, config.click_debounce);
        Self {
            background: BackgroundModel::new(config.heat_coef),
            clicks: [click.clone(), click],
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TrackerConfig {
        &mut self.config
    }

    /// Snapshot the frame as the background reference right now, regardless
    /// of scene motion.
    pub fn sample_background(&mut self, frame: &Frame) {
        tracing::info!("background reference sampled on request");
        self.background.sample(frame.grids());
    }

    /// Process one frame and report every tracked hand.
    pub fn observe(&mut self, frame: &Frame) -> TrackerReport {
        let grids = frame.grids();
        self.background.observe(grids);
        if self.config.auto_sample_background && self.background.is_still(self.config.still_thresh)
        {
            self.background.sample(grids);
        }

        let background_sampled = self.background.is_sampled();
        let fg = match self
            .background
            .foreground(grids, self.config.z_low_thresh, self.config.z_high_thresh)
        {
            Some(fg) => fg,
            None => foreground_absolute(
                grids,
                self.config.distance_clip,
                self.config.strength_clip,
            ),
        };

        let mut mask = morph_clean(&binarize(&fg));
        crop_roi(&mut mask, &self.config.roi);
        let polygons = extract_polygons(&mask);
        let selected = select_hand_polygons(polygons, self.config.min_contour_area);
        tracing::debug!(
            regions = selected.len(),
            diff_mode = background_sampled,
            "hand candidates selected"
        );

        let mut located: Vec<(Polygon, Palm)> = Vec::new();
        for polygon in selected {
            match palm_center(&polygon, &mask) {
                Some(palm) => located.push((polygon, palm)),
                None => tracing::debug!("zero-mass region skipped"),
            }
        }

        let mut hands = HandPair::new();
        let two = located.len() == 2;
        let palm_xs: Vec<f64> = located.iter().map(|(_, p)| p.center[0]).collect();
        for (i, (polygon, palm)) in located.into_iter().enumerate() {
            // The sensor faces the user, so the region at smaller image x
            // is the user's right hand. A lone hand defaults to right.
            let handedness = if two && palm_xs[i] > palm_xs[1 - i] {
                Handedness::Left
            } else {
                Handedness::Right
            };
            let report = self.analyze_hand(polygon, palm, handedness, grids.distance());
            if hands.push(report).is_err() {
                break;
            }
        }

        TrackerReport {
            hands,
            background_sampled,
        }
    }

    fn analyze_hand(
        &mut self,
        polygon: Polygon,
        palm: Palm,
        handedness: Handedness,
        distance: &ScalarGrid,
    ) -> HandReport {
        let axes = principal_axes(&polygon);
        let hull = convex_hull(&polygon);
        let defects = convexity_defects(&polygon, &hull, self.config.min_defect_depth);

        let mut wrist = None;
        let tip_indices = match self.config.tip_strategy {
            TipStrategy::Chord => {
                wrist = find_wrist(&polygon, palm.center, palm.radius);
                wrist.map_or_else(Vec::new, |w| {
                    chord_fingertips(
                        &polygon,
                        w,
                        &defects,
                        self.config.max_tip_angle_deg,
                        self.config.wrist_min_separation,
                    )
                })
            }
            TipStrategy::Curvature => {
                let kept = remove_border_points(&polygon, &hull, &self.config.roi);
                let candidates =
                    cluster_hull_points(&polygon, &kept, self.config.tip_separation);
                k_curvature(
                    &polygon,
                    &candidates,
                    self.config.k_min,
                    self.config.k_max,
                    self.config.max_tip_angle_deg,
                )
            }
        };

        let palm_depth = depth_at(distance, palm.center);
        let fingertips: Vec<[f64; 2]> = tip_indices.iter().map(|&i| polygon.point(i)).collect();
        let tip_depth = fingertips
            .iter()
            .map(|&p| depth_at(distance, p))
            .fold(None, |best: Option<f32>, d| {
                Some(best.map_or(d, |b| b.min(d)))
            });

        let slot = match handedness {
            Handedness::Right => 0,
            Handedness::Left => 1,
        };
        let clicking = match tip_depth {
            // Positive when the closest tip sits nearer than the palm.
            Some(tip) => self.clicks[slot].update(palm_depth - tip),
            None => self.clicks[slot].state(),
        };
        tracing::debug!(
            ?handedness,
            tips = fingertips.len(),
            clicking,
            "hand analyzed"
        );

        HandReport {
            handedness,
            boundary: polygon,
            palm,
            palm_depth,
            axes,
            hull,
            defects,
            wrist,
            fingertips,
            tip_depth,
            clicking,
        }
    }
}

/// Distance-grid sample under a fractional position, nearest cell, clamped
/// to the grid.
fn depth_at(distance: &ScalarGrid, p: [f64; 2]) -> f32 {
    let (w, h) = distance.dimensions();
    let x = (p[0].round().max(0.0) as usize).min(w.saturating_sub(1));
    let y = (p[1].round().max(0.0) as usize).min(h.saturating_sub(1));
    distance.at(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DepthGrid;

    fn blob_frame(w: usize, h: usize, blocks: &[(usize, usize, usize)], dist: f32) -> Frame {
        let mut g = DepthGrid::zeros(w, h);
        for &(x0, y0, side) in blocks {
            for y in y0..y0 + side {
                for x in x0..x0 + side {
                    g.distance_mut().set(x, y, dist);
                    g.strength_mut().set(x, y, 0.5);
                }
            }
        }
        Frame::Depth(g)
    }

    fn manual_config() -> TrackerConfig {
        TrackerConfig {
            auto_sample_background: false,
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn test_absolute_fallback_finds_one_hand() {
        let mut tracker = HandTracker::new(manual_config());
        let frame = blob_frame(48, 48, &[(10, 10, 20)], 0.3);
        let report = tracker.observe(&frame);
        assert!(!report.background_sampled);
        assert_eq!(report.hands.len(), 1);
        let hand = report.hands.get(0).unwrap();
        assert_eq!(hand.handedness, Handedness::Right);
        assert!(hand.palm.center[0] > 10.0 && hand.palm.center[0] < 30.0);
        assert!(hand.palm.center[1] > 10.0 && hand.palm.center[1] < 30.0);
        assert!((hand.palm_depth - 0.3).abs() < 1e-6);
        assert!(!hand.clicking, "no fingertips on a square blob");
    }

    #[test]
    fn test_point_cloud_frame_tracks_like_depth() {
        use crate::frame::{PointCloudFrame, PointXyzi};
        let (w, h) = (48usize, 48usize);
        let mut points = vec![
            PointXyzi {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                i: 0.0
            };
            w * h
        ];
        for y in 10..30 {
            for x in 10..30 {
                points[y * w + x].z = 0.3;
                points[y * w + x].i = 0.5;
            }
        }
        let frame = Frame::PointCloud(PointCloudFrame::new(w, h, points).unwrap());

        let mut tracker = HandTracker::new(manual_config());
        let report = tracker.observe(&frame);
        assert_eq!(report.hands.len(), 1);
        let hand = report.hands.get(0).unwrap();
        assert_eq!(hand.handedness, Handedness::Right);
        assert!((hand.palm_depth - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_region_is_ignored() {
        let mut tracker = HandTracker::new(manual_config());
        let frame = blob_frame(48, 48, &[(10, 10, 6)], 0.3);
        let report = tracker.observe(&frame);
        assert!(report.hands.is_empty());
    }

    #[test]
    fn test_two_hands_left_right_assignment() {
        let mut tracker = HandTracker::new(manual_config());
        let frame = blob_frame(96, 48, &[(8, 12, 20), (60, 12, 24)], 0.3);
        let report = tracker.observe(&frame);
        assert_eq!(report.hands.len(), 2);
        for hand in report.hands.iter() {
            if hand.palm.center[0] < 48.0 {
                assert_eq!(hand.handedness, Handedness::Right);
            } else {
                assert_eq!(hand.handedness, Handedness::Left);
            }
        }
    }

    #[test]
    fn test_auto_sample_then_diff_mode() {
        let mut tracker = HandTracker::new(TrackerConfig::default());

        let mut bg = DepthGrid::zeros(48, 48);
        bg.distance_mut().fill(1.0);
        bg.strength_mut().fill(0.5);
        let background = Frame::Depth(bg.clone());

        // A still scene gets sampled; nothing stands out against itself.
        let report = tracker.observe(&background);
        assert!(report.background_sampled);
        assert!(report.hands.is_empty());
        tracker.observe(&background);

        // A hand 0.5m in front of the reference trips the heat map, so the
        // reference survives and diff mode segments the hand.
        let mut live = bg;
        for y in 12..32 {
            for x in 12..32 {
                live.distance_mut().set(x, y, 0.5);
            }
        }
        let report = tracker.observe(&Frame::Depth(live));
        assert!(report.background_sampled);
        assert_eq!(report.hands.len(), 1);
    }

    #[test]
    fn test_manual_sample_switches_mode() {
        let mut tracker = HandTracker::new(manual_config());
        let frame = blob_frame(48, 48, &[(10, 10, 20)], 0.3);
        assert!(!tracker.observe(&frame).background_sampled);
        tracker.sample_background(&frame);
        let report = tracker.observe(&frame);
        assert!(report.background_sampled);
        assert!(
            report.hands.is_empty(),
            "a sampled scene matches its own reference"
        );
    }
}
