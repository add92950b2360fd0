//! palmgrid — depth-sensor hand-gesture pipeline.
//!
//! Turns time-of-flight distance/strength frames into hand reports and
//! pointer events. The pipeline stages are:
//!
//! 1. **Frame** – closed set of sensor frame kinds, paired scalar grids.
//! 2. **Background** – reference snapshot, motion heat, foreground maps.
//! 3. **Segment** – binarization, morphological cleanup, ROI crop, outer
//!    boundary extraction.
//! 4. **Cluster** – density-based region growing over a scalar grid.
//! 5. **Geometry** – palm moments, PCA, hull, convexity defects, wrist,
//!    fingertips.
//! 6. **Pipeline** – the [`HandTracker`] and [`PointerTracker`] front ends,
//!    click hysteresis, frame queue and worker session.
//!
//! # Public API
//! [`HandTracker`] and [`PointerTracker`] are the primary entry points, fed
//! with [`Frame`] values and tuned through [`TrackerConfig`] /
//! [`PointerConfig`]. The geometry and clustering stages are exposed for
//! callers that assemble their own pipeline.

pub mod background;
pub mod cluster;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod hyster;
pub mod params;
pub mod pipeline;
pub mod segment;

pub use cluster::{Cluster, ClusterConfig, DensityClusterer, LabelGrid, UNALLOCATED};
pub use config::{PointerConfig, RoiConfig, TipStrategy, TrackerConfig};
pub use frame::{DepthGrid, Frame, PointCloudFrame, PointXyzi};
pub use grid::{GridError, ScalarGrid};
pub use hyster::Hysteresis;
pub use params::{
    get_param, get_pointer_param, param_specs, pointer_param_specs, set_param, set_pointer_param,
    ParamSpec, UnknownParam,
};
pub use pipeline::{
    frame_queue, Actuator, EventLog, FrameSender, HandReport, HandTracker, PointerEvent,
    PointerSample, PointerTracker, Session, TrackerReport, DEFAULT_QUEUE_DEPTH,
};
