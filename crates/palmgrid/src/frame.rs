//! Frame kinds delivered by a frame source.
//!
//! The sensor can deliver either a plain distance/strength pair or a point
//! cloud with per-point intensity. Both are carried in a closed [`Frame`]
//! variant and matched exhaustively; downstream stages only ever see the
//! paired grids.

use serde::{Deserialize, Serialize};

use crate::grid::{GridError, ScalarGrid};

/// Paired distance and return-strength grids for one frame.
///
/// Distance is in meters, return strength in sensor units. Both grids share
/// one width/height agreed at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthGrid {
    distance: ScalarGrid,
    strength: ScalarGrid,
}

impl DepthGrid {
    pub fn new(distance: ScalarGrid, strength: ScalarGrid) -> Result<Self, GridError> {
        distance.check_same_dims(&strength)?;
        Ok(Self { distance, strength })
    }

    /// All-zero pair, mostly for scratch buffers and tests.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            distance: ScalarGrid::new(width, height),
            strength: ScalarGrid::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.distance.width()
    }

    pub fn height(&self) -> usize {
        self.distance.height()
    }

    pub fn distance(&self) -> &ScalarGrid {
        &self.distance
    }

    pub fn strength(&self) -> &ScalarGrid {
        &self.strength
    }

    pub fn distance_mut(&mut self) -> &mut ScalarGrid {
        &mut self.distance
    }

    pub fn strength_mut(&mut self) -> &mut ScalarGrid {
        &mut self.strength
    }
}

/// One sample of a point-cloud frame: position plus return intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointXyzi {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub i: f32,
}

/// A point-cloud frame in sensor raster order, with the distance/strength
/// grids derived once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudFrame {
    points: Vec<PointXyzi>,
    grids: DepthGrid,
}

impl PointCloudFrame {
    /// Build from raster-ordered points. `points.len()` must equal
    /// `width * height`.
    pub fn new(width: usize, height: usize, points: Vec<PointXyzi>) -> Result<Self, GridError> {
        if points.len() != width * height {
            return Err(GridError::LengthMismatch {
                expected: width * height,
                got: points.len(),
            });
        }
        let mut distance = ScalarGrid::new(width, height);
        let mut strength = ScalarGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let p = points[y * width + x];
                distance.set(x, y, p.z);
                strength.set(x, y, p.i);
            }
        }
        Ok(Self {
            points,
            grids: DepthGrid { distance, strength },
        })
    }

    pub fn points(&self) -> &[PointXyzi] {
        &self.points
    }

    pub fn grids(&self) -> &DepthGrid {
        &self.grids
    }
}

/// The closed set of frame kinds a source can deliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Frame {
    /// Distance + return strength only.
    Depth(DepthGrid),
    /// Point cloud with intensity; grids are derived at construction.
    PointCloud(PointCloudFrame),
}

impl Frame {
    /// The paired grids, whichever kind the frame is.
    pub fn grids(&self) -> &DepthGrid {
        match self {
            Frame::Depth(g) => g,
            Frame::PointCloud(pc) => pc.grids(),
        }
    }

    pub fn width(&self) -> usize {
        self.grids().width()
    }

    pub fn height(&self) -> usize {
        self.grids().height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_grid_rejects_mismatched_pair() {
        let d = ScalarGrid::new(4, 4);
        let s = ScalarGrid::new(4, 3);
        assert!(DepthGrid::new(d, s).is_err());
    }

    #[test]
    fn test_point_cloud_derives_grids() {
        let mut points = vec![
            PointXyzi {
                x: 0.0,
                y: 0.0,
                z: 1.0,
                i: 0.5
            };
            6
        ];
        points[4].z = 2.0;
        points[4].i = 0.9;
        let frame = Frame::PointCloud(PointCloudFrame::new(3, 2, points).unwrap());
        assert_eq!(frame.grids().distance().at(1, 1), 2.0);
        assert_eq!(frame.grids().strength().at(1, 1), 0.9);
        assert_eq!(frame.grids().distance().at(0, 0), 1.0);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
    }
}
