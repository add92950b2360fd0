//! Runtime tunables, injected as plain configuration structs.
//!
//! Every tunable an external control surface may want to bind lives here by
//! name; the decoupled registry in [`crate::params`] exposes them without
//! holding pointers into these structs.

use serde::{Deserialize, Serialize};

pub use crate::cluster::ClusterConfig;

/// Rectangular region of interest, inclusive bounds in grid coordinates.
/// Cells outside are forced to background after mask cleaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            x_min: 0,
            x_max: 319,
            y_min: 0,
            y_max: 239,
        }
    }
}

/// Which fingertip extraction strategy the hand tracker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipStrategy {
    /// Segment-longest-chord between the wrist points, delimited by
    /// convexity defects.
    Chord,
    /// Hull clustering plus k-curvature sharpness test.
    Curvature,
}

/// Configuration for the hand-tracking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Diff-mode foreground band: minimum closer-than-reference (meters).
    pub z_low_thresh: f32,
    /// Diff-mode foreground band: maximum closer-than-reference (meters).
    pub z_high_thresh: f32,
    /// Absolute-mode distance clip (meters), used before a background exists.
    pub distance_clip: f32,
    /// Absolute-mode minimum return strength (sensor units).
    pub strength_clip: f32,
    /// Minimum polygon area (cells) for a region to count as a hand.
    pub min_contour_area: f64,
    /// Minimum inward depth for a convexity defect (grid length units).
    pub min_defect_depth: f64,
    /// Maximum fingertip opening angle (degrees), both strategies.
    pub max_tip_angle_deg: f64,
    /// Hull-cluster separation distance for the curvature strategy.
    pub tip_separation: f64,
    /// k-curvature minimum step offset.
    pub k_min: usize,
    /// k-curvature maximum step offset (exclusive).
    pub k_max: usize,
    /// Minimum contour-index separation between the two wrist points.
    pub wrist_min_separation: usize,
    /// Fingertip strategy to run.
    pub tip_strategy: TipStrategy,
    /// EWMA coefficient for the motion heat map, in [0, 1].
    pub heat_coef: f32,
    /// Summed-heat threshold below which the scene counts as still.
    pub still_thresh: f32,
    /// Re-sample the background automatically whenever the scene is still.
    pub auto_sample_background: bool,
    /// Click hysteresis upper bound on `palm_depth − tip_depth` (meters).
    pub click_upper: f32,
    /// Click hysteresis lower bound (meters).
    pub click_lower: f32,
    /// Consecutive qualifying ticks before a click state commits.
    pub click_debounce: u32,
    /// Region of interest crop.
    pub roi: RoiConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            z_low_thresh: 0.01,
            z_high_thresh: 1.0,
            distance_clip: 0.6,
            strength_clip: 0.01,
            min_contour_area: 100.0,
            min_defect_depth: 10.0,
            max_tip_angle_deg: 60.0,
            tip_separation: 10.0,
            k_min: 5,
            k_max: 25,
            wrist_min_separation: 5,
            tip_strategy: TipStrategy::Chord,
            heat_coef: 0.5,
            still_thresh: 10.0,
            auto_sample_background: true,
            click_upper: 0.05,
            click_lower: 0.02,
            click_debounce: 3,
            roi: RoiConfig::default(),
        }
    }
}

/// Configuration for the proximity pointer (air-mouse) pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Objects beyond this distance (meters) are clipped away.
    pub proximity: f32,
    /// Minimum return strength for a cell to survive the clip.
    pub strength_min: f32,
    /// Value written into the clipped strength map for surviving cells.
    pub strength_gain: f32,
    /// Output screen width the tip position maps onto.
    pub screen_width: i32,
    /// Output screen height the tip position maps onto.
    pub screen_height: i32,
    /// Pick the tip for a left-handed user (mirrors the corner rule).
    pub left_handed: bool,
    /// Clusterer settings for the clipped strength map.
    pub cluster: ClusterConfig,
    /// Click hysteresis upper bound on `palm_depth − tip_depth` (meters).
    pub click_upper: f32,
    /// Click hysteresis lower bound (meters).
    pub click_lower: f32,
    /// Consecutive qualifying ticks before a click state commits.
    pub click_debounce: u32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            proximity: 1.5,
            strength_min: 0.01,
            strength_gain: 10.0,
            screen_width: 1920,
            screen_height: 1080,
            left_handed: false,
            cluster: ClusterConfig::default(),
            click_upper: 0.05,
            click_lower: 0.02,
            click_debounce: 3,
        }
    }
}
