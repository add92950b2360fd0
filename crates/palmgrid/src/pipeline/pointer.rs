//! Proximity pointer (air-mouse) pipeline.
//!
//! Clips the frame to a near-field shell, clusters the surviving return
//! strength, picks a pointing tip on the largest cluster with a corner rule,
//! and drives an [`Actuator`] with move and debounced click events.

use crate::cluster::{Cluster, DensityClusterer};
use crate::config::PointerConfig;
use crate::frame::Frame;
use crate::grid::ScalarGrid;
use crate::hyster::Hysteresis;

use super::report::{Actuator, PointerSample};

/// Mouse button the pinch click maps onto.
const CLICK_BUTTON: u8 = 1;

/// Stateful pointer tracker; feed frames through [`PointerTracker::observe`].
#[derive(Debug)]
pub struct PointerTracker {
    config: PointerConfig,
    clusterer: DensityClusterer,
    click: Hysteresis,
    clicking: bool,
}

impl PointerTracker {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            clusterer: DensityClusterer::new(config.cluster.clone()),
            click: Hysteresis::new(config.click_upper, config.click_lower, config.click_debounce),
            clicking: false,
            config,
        }
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Process one frame; emits events into `actuator` and returns the
    /// sample when a cluster was tracked.
    pub fn observe(&mut self, frame: &Frame, actuator: &mut dyn Actuator) -> Option<PointerSample> {
        let grids = frame.grids();
        let (w, h) = (grids.width(), grids.height());

        // Near-field clip: surviving cells get a flat strength so the
        // clusterer sees shape, not sensor gain.
        let mut strength = ScalarGrid::new(w, h);
        let mut distance = ScalarGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let d = grids.distance().at(x, y);
                if d < self.config.proximity && grids.strength().at(x, y) > self.config.strength_min
                {
                    strength.set(x, y, self.config.strength_gain);
                    distance.set(x, y, d);
                }
            }
        }

        self.clusterer.scan(&strength);
        let cluster = self.clusterer.largest().map(|i| &self.clusterer.clusters()[i])?;
        let tip = select_tip(cluster, self.config.left_handed)?;
        let centroid = cluster.centroid()?;

        let screen = [
            (tip[0] as i64 * self.config.screen_width as i64 / w as i64) as i32,
            (tip[1] as i64 * self.config.screen_height as i64 / h as i64) as i32,
        ];
        actuator.move_to(screen[0], screen[1]);

        let palm_depth = cell_at(&distance, centroid);
        let tip_depth = distance.at(tip[0], tip[1]);
        let clicking = self.click.update(palm_depth - tip_depth);
        if clicking != self.clicking {
            if clicking {
                tracing::debug!("pointer button down");
                actuator.button_down(CLICK_BUTTON);
            } else {
                tracing::debug!("pointer button up");
                actuator.button_up(CLICK_BUTTON);
            }
            self.clicking = clicking;
        }

        Some(PointerSample {
            tip,
            screen,
            clicking,
        })
    }
}

/// Corner rule: among cluster cells on the bounding-box edges facing the
/// pointing direction, take the one farthest from the opposite corner. For a
/// right-handed user (sensor faces the user) the tip approaches from the
/// top-left, so candidates lie on the top or left edge and the anchor is the
/// bottom-right corner; left-handed mirrors both.
fn select_tip(cluster: &Cluster, left_handed: bool) -> Option<[usize; 2]> {
    let (min, max) = cluster.bounding_box()?;
    let anchor = if left_handed {
        [min[0], max[1]]
    } else {
        [max[0], max[1]]
    };
    cluster
        .points()
        .iter()
        .filter(|p| {
            if left_handed {
                p.y <= min[1] || p.x >= max[0]
            } else {
                p.y <= min[1] || p.x <= min[0]
            }
        })
        .max_by_key(|p| {
            let dx = p.x as i64 - anchor[0] as i64;
            let dy = p.y as i64 - anchor[1] as i64;
            dx * dx + dy * dy
        })
        .map(|p| [p.x, p.y])
}

/// Grid sample under a fractional position, nearest cell, clamped.
fn cell_at(grid: &ScalarGrid, p: [f64; 2]) -> f32 {
    let (w, h) = grid.dimensions();
    let x = (p[0].round().max(0.0) as usize).min(w.saturating_sub(1));
    let y = (p[1].round().max(0.0) as usize).min(h.saturating_sub(1));
    grid.at(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterConfig;
    use crate::frame::DepthGrid;
    use crate::pipeline::report::{EventLog, PointerEvent};

    fn pointer_config() -> PointerConfig {
        PointerConfig {
            cluster: ClusterConfig {
                density: 0.5,
                threshold: 0.5,
                kernel_radius: 1,
            },
            click_debounce: 1,
            ..PointerConfig::default()
        }
    }

    /// 8x8 blob at (10,10) in a 32x24 grid; the top-left blob cell carries
    /// `tip_depth`, the rest 0.5m.
    fn blob_frame(tip_depth: f32) -> Frame {
        let mut g = DepthGrid::zeros(32, 24);
        g.distance_mut().fill(5.0); // beyond the proximity clip
        for y in 10..18 {
            for x in 10..18 {
                g.distance_mut().set(x, y, 0.5);
                g.strength_mut().set(x, y, 0.5);
            }
        }
        g.distance_mut().set(10, 10, tip_depth);
        Frame::Depth(g)
    }

    #[test]
    fn test_tip_and_screen_mapping() {
        let mut tracker = PointerTracker::new(pointer_config());
        let mut log = EventLog::default();
        let sample = tracker.observe(&blob_frame(0.5), &mut log).unwrap();
        assert_eq!(sample.tip, [10, 10]);
        assert_eq!(sample.screen, [600, 450]);
        assert!(!sample.clicking);
        assert_eq!(log.events, vec![PointerEvent::MoveTo { x: 600, y: 450 }]);
    }

    #[test]
    fn test_left_handed_mirrors_tip() {
        let config = PointerConfig {
            left_handed: true,
            ..pointer_config()
        };
        let mut tracker = PointerTracker::new(config);
        let mut log = EventLog::default();
        let sample = tracker.observe(&blob_frame(0.5), &mut log).unwrap();
        assert_eq!(sample.tip, [17, 10]);
    }

    #[test]
    fn test_click_press_and_release() {
        let mut tracker = PointerTracker::new(pointer_config());
        let mut log = EventLog::default();

        // Tip 0.2m closer than the palm; the debounce holds one frame.
        let near = blob_frame(0.3);
        assert!(!tracker.observe(&near, &mut log).unwrap().clicking);
        assert!(tracker.observe(&near, &mut log).unwrap().clicking);
        assert!(log.events.contains(&PointerEvent::ButtonDown(CLICK_BUTTON)));

        // Tip back level with the palm releases after the same debounce.
        let level = blob_frame(0.5);
        assert!(tracker.observe(&level, &mut log).unwrap().clicking);
        assert!(!tracker.observe(&level, &mut log).unwrap().clicking);
        assert_eq!(
            log.events.last(),
            Some(&PointerEvent::ButtonUp(CLICK_BUTTON))
        );
    }

    #[test]
    fn test_empty_scene_yields_nothing() {
        let mut tracker = PointerTracker::new(pointer_config());
        let mut log = EventLog::default();
        let mut g = DepthGrid::zeros(32, 24);
        g.distance_mut().fill(5.0);
        assert!(tracker.observe(&Frame::Depth(g), &mut log).is_none());
        assert!(log.events.is_empty());
    }
}
