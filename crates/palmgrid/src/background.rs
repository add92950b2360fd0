//! Background reference model and foreground map computation.
//!
//! The model snapshots a reference frame on demand and classifies live cells
//! by how much closer they have come relative to that reference. Until a
//! reference exists the caller falls back to the absolute proximity mode,
//! which needs no history. A motion heat map (EWMA of frame-to-frame change)
//! lets the pipeline re-sample the reference whenever the scene is quiet.

use crate::frame::DepthGrid;
use crate::grid::ScalarGrid;

/// Mask value for foreground cells, matching the 8-bit binarization range.
pub const FOREGROUND: f32 = 255.0;

/// Background snapshot plus motion statistics for one camera session.
#[derive(Debug, Default)]
pub struct BackgroundModel {
    reference: Option<DepthGrid>,
    prev: Option<DepthGrid>,
    heat: Option<DepthGrid>,
    heat_coef: f32,
}

impl BackgroundModel {
    pub fn new(heat_coef: f32) -> Self {
        Self {
            reference: None,
            prev: None,
            heat: None,
            heat_coef,
        }
    }

    /// Snapshot `live` as the new reference.
    pub fn sample(&mut self, live: &DepthGrid) {
        tracing::debug!("background reference sampled");
        self.reference = Some(live.clone());
    }

    pub fn is_sampled(&self) -> bool {
        self.reference.is_some()
    }

    pub fn reference(&self) -> Option<&DepthGrid> {
        self.reference.as_ref()
    }

    /// Fold one live frame into the motion heat map.
    pub fn observe(&mut self, live: &DepthGrid) {
        let (w, h) = (live.width(), live.height());
        let heat = self
            .heat
            .get_or_insert_with(|| DepthGrid::zeros(w, h));
        if let Some(prev) = &self.prev {
            let a = self.heat_coef;
            for y in 0..h {
                for x in 0..w {
                    let dz = (live.distance().at(x, y) - prev.distance().at(x, y)).abs();
                    let da = (live.strength().at(x, y) - prev.strength().at(x, y)).abs();
                    let hz = (1.0 - a) * heat.distance().at(x, y) + a * dz;
                    let ha = (1.0 - a) * heat.strength().at(x, y) + a * da;
                    heat.distance_mut().set(x, y, hz);
                    heat.strength_mut().set(x, y, ha);
                }
            }
        }
        self.prev = Some(live.clone());
    }

    /// Summed distance-channel heat; zero before any frame was observed.
    pub fn heat_total(&self) -> f32 {
        self.heat
            .as_ref()
            .map_or(0.0, |heatmap| heatmap.distance().sum())
    }

    /// Whether the scene is quiet enough to re-sample the reference.
    pub fn is_still(&self, still_thresh: f32) -> bool {
        self.heat_total() < still_thresh
    }

    /// Diff-mode foreground: a cell is foreground iff
    /// `low < reference − live < high`, i.e. the object sits between a
    /// minimum-closer and a maximum-closer bound. `None` until a reference
    /// has been sampled.
    pub fn foreground(&self, live: &DepthGrid, low: f32, high: f32) -> Option<ScalarGrid> {
        let reference = self.reference.as_ref()?;
        let (w, h) = (live.width(), live.height());
        let mut fg = ScalarGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let diff = reference.distance().at(x, y) - live.distance().at(x, y);
                if diff > low && diff < high {
                    fg.set(x, y, FOREGROUND);
                }
            }
        }
        Some(fg)
    }
}

/// Absolute proximity foreground, the mode used when no reference exists:
/// foreground iff the cell is closer than `distance_clip` and returns more
/// than `strength_clip`.
pub fn foreground_absolute(live: &DepthGrid, distance_clip: f32, strength_clip: f32) -> ScalarGrid {
    let (w, h) = (live.width(), live.height());
    let mut fg = ScalarGrid::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if live.distance().at(x, y) < distance_clip && live.strength().at(x, y) > strength_clip
            {
                fg.set(x, y, FOREGROUND);
            }
        }
    }
    fg
}
