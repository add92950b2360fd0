//! Blob geometry: everything computed from one region boundary.
//!
//! Stages, in the order the hand tracker runs them:
//!
//! 1. **palm** – interior moments → palm center, inscribed-circle radius.
//! 2. **pca** – principal axis of the vertex cloud.
//! 3. **hull** – convex hull and convexity defects.
//! 4. **wrist** – wrist-line intersection with the boundary.
//! 5. **fingertips** – two independent tip extraction strategies.
//! 6. **hand** – per-hand bookkeeping (at most two, left/right).
//!
//! Hull, defect and fingertip index lists are only meaningful against the
//! polygon they were computed from and are rebuilt every frame.

mod fingertips;
mod hand;
mod hull;
mod palm;
mod pca;
mod polygon;
mod wrist;

pub use fingertips::{
    chord_fingertips, cluster_hull_points, find_angle, k_curvature, remove_border_points,
};
pub use hand::{select_hand_polygons, CapacityError, HandPair, Handedness, MAX_HANDS};
pub use hull::{convex_hull, convexity_defects, Defect};
pub use palm::{palm_center, Palm};
pub use pca::{principal_axes, PrincipalAxes};
pub use polygon::Polygon;
pub use wrist::{dist_point_to_line, find_wrist, WRIST_BAND};
