//! Density-based region growing over a scalar grid.
//!
//! A cell qualifies when its own value exceeds `threshold` and at least a
//! `density` fraction of its Chebyshev neighborhood does too. Qualified cells
//! inherit the id of the first already-labeled qualifying neighbor in scan
//! order, or open a new cluster; every above-threshold unlabeled neighbor is
//! then eagerly swept into the same cluster. The eager sweep uses a weaker
//! predicate than qualification on purpose: it is what pulls thin fringes
//! (fingers, sleeve edges) into the cluster their hand belongs to.
//!
//! The scan is deterministic for a fixed scan order (x outer ascending,
//! y inner ascending, neighbor offsets ascending). A cell that qualifies but
//! is visited before any neighbor it could join, and is never reached by the
//! eager sweep, stays unallocated; this boundary-density case is accepted
//! behavior, not something the scan tries to repair.

use serde::{Deserialize, Serialize};

use crate::grid::ScalarGrid;

/// Label value for cells that belong to no cluster.
pub const UNALLOCATED: i32 = -1;

/// A labeled grid cell with the sample value it carried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

/// Accumulated statistics for one cluster.
///
/// Lives for one `scan` only; the clusterer keeps no cross-frame identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cluster {
    points: Vec<ClusterPoint>,
    area: usize,
    mass: f64,
    moment: [f64; 2],
    sum: [f64; 2],
    min: [usize; 2],
    max: [usize; 2],
}

impl Cluster {
    fn new() -> Self {
        Self {
            points: Vec::new(),
            area: 0,
            mass: 0.0,
            moment: [0.0; 2],
            sum: [0.0; 2],
            min: [usize::MAX; 2],
            max: [0; 2],
        }
    }

    fn add_point(&mut self, p: ClusterPoint) {
        self.area += 1;
        self.mass += p.value as f64;
        self.moment[0] += p.value as f64 * p.x as f64;
        self.moment[1] += p.value as f64 * p.y as f64;
        self.sum[0] += p.x as f64;
        self.sum[1] += p.y as f64;
        self.min[0] = self.min[0].min(p.x);
        self.min[1] = self.min[1].min(p.y);
        self.max[0] = self.max[0].max(p.x);
        self.max[1] = self.max[1].max(p.y);
        self.points.push(p);
    }

    pub fn points(&self) -> &[ClusterPoint] {
        &self.points
    }

    /// Member cell count.
    pub fn area(&self) -> usize {
        self.area
    }

    /// Sum of member values.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Plain average of member coordinates. `None` for an empty cluster.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        if self.area == 0 {
            return None;
        }
        let n = self.area as f64;
        Some([self.sum[0] / n, self.sum[1] / n])
    }

    /// Mass-weighted center of gravity. `None` at zero mass.
    pub fn center_of_gravity(&self) -> Option<[f64; 2]> {
        if self.mass <= 0.0 {
            return None;
        }
        Some([self.moment[0] / self.mass, self.moment[1] / self.mass])
    }

    /// Axis-aligned bounding box `(min, max)`, inclusive.
    pub fn bounding_box(&self) -> Option<([usize; 2], [usize; 2])> {
        if self.area == 0 {
            return None;
        }
        Some((self.min, self.max))
    }
}

/// Per-cell cluster ids, rebuilt on every scan.
#[derive(Debug, Clone)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    labels: Vec<i32>,
}

impl LabelGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![UNALLOCATED; width * height],
        }
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> i32 {
        self.labels[y * self.width + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, id: i32) {
        self.labels[y * self.width + x] = id;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.labels
    }
}

/// Tunables for [`DensityClusterer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Fraction of the neighborhood that must exceed `threshold`, in [0, 1].
    pub density: f32,
    /// Minimum cell value to count as foreground.
    pub threshold: f32,
    /// Neighborhood half-width (Chebyshev), i.e. a (2k+1)² window.
    pub kernel_radius: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            density: 0.8,
            threshold: 0.1,
            kernel_radius: 3,
        }
    }
}

/// Region-growing clusterer over a scalar grid. O(W·H·k²) per scan.
#[derive(Debug)]
pub struct DensityClusterer {
    config: ClusterConfig,
    clusters: Vec<Cluster>,
    labels: LabelGrid,
}

impl DensityClusterer {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
            labels: LabelGrid::new(0, 0),
        }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Clusters from the most recent scan.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Label grid from the most recent scan.
    pub fn labels(&self) -> &LabelGrid {
        &self.labels
    }

    /// Index of the largest-area cluster from the most recent scan.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, c) in self.clusters.iter().enumerate() {
            if best.map_or(true, |b| c.area() > self.clusters[b].area()) {
                best = Some(i);
            }
        }
        best
    }

    /// True when the cell exceeds the threshold and its neighborhood carries
    /// at least the configured density of above-threshold cells.
    fn qualify(&self, grid: &ScalarGrid, x: usize, y: usize) -> bool {
        if grid.at(x, y) <= self.config.threshold {
            return false;
        }
        let k = self.config.kernel_radius as isize;
        let (w, h) = (grid.width() as isize, grid.height() as isize);
        let (xi, yi) = (x as isize, y as isize);
        let mut area = 0u32;
        let mut count = 0u32;
        for i in (xi - k)..=(xi + k) {
            if i < 0 || i >= w {
                continue;
            }
            for j in (yi - k)..=(yi + k) {
                if j < 0 || j >= h {
                    continue;
                }
                area += 1;
                if grid.at(i as usize, j as usize) > self.config.threshold {
                    count += 1;
                }
            }
        }
        count as f32 >= self.config.density * area as f32
    }

    /// Replace the cluster list with a fresh partition of `grid`.
    pub fn scan(&mut self, grid: &ScalarGrid) {
        let (w, h) = grid.dimensions();
        let k = self.config.kernel_radius as isize;
        let mut labels = LabelGrid::new(w, h);
        let mut next_id: i32 = 0;

        for x in 0..w {
            for y in 0..h {
                if !self.qualify(grid, x, y) {
                    continue;
                }
                if labels.at(x, y) == UNALLOCATED {
                    // Inherit from the first labeled qualifying neighbor,
                    // offsets ascending; otherwise open a new cluster.
                    let mut inherited = None;
                    'neighbors: for i in (x as isize - k)..=(x as isize + k) {
                        if i < 0 || i >= w as isize {
                            continue;
                        }
                        for j in (y as isize - k)..=(y as isize + k) {
                            if j < 0 || j >= h as isize {
                                continue;
                            }
                            if (i, j) == (x as isize, y as isize) {
                                continue;
                            }
                            let (iu, ju) = (i as usize, j as usize);
                            if labels.at(iu, ju) != UNALLOCATED && self.qualify(grid, iu, ju) {
                                inherited = Some(labels.at(iu, ju));
                                break 'neighbors;
                            }
                        }
                    }
                    let id = inherited.unwrap_or_else(|| {
                        let id = next_id;
                        next_id += 1;
                        id
                    });
                    labels.set(x, y, id);
                }

                // Eager expansion: unlabeled above-threshold neighbors join
                // this cluster without the density test.
                let id = labels.at(x, y);
                for i in (x as isize - k)..=(x as isize + k) {
                    if i < 0 || i >= w as isize {
                        continue;
                    }
                    for j in (y as isize - k)..=(y as isize + k) {
                        if j < 0 || j >= h as isize {
                            continue;
                        }
                        if (i, j) == (x as isize, y as isize) {
                            continue;
                        }
                        let (iu, ju) = (i as usize, j as usize);
                        if labels.at(iu, ju) == UNALLOCATED
                            && grid.at(iu, ju) > self.config.threshold
                        {
                            labels.set(iu, ju, id);
                        }
                    }
                }
            }
        }

        // Accumulation pass: fold every labeled cell into its cluster.
        let mut clusters = vec![Cluster::new(); next_id as usize];
        for x in 0..w {
            for y in 0..h {
                let id = labels.at(x, y);
                if id != UNALLOCATED {
                    clusters[id as usize].add_point(ClusterPoint {
                        x,
                        y,
                        value: grid.at(x, y),
                    });
                }
            }
        }

        tracing::debug!(
            clusters = clusters.len(),
            "density scan over {}x{} grid",
            w,
            h
        );
        self.clusters = clusters;
        self.labels = labels;
    }
}
