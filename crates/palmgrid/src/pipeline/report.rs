//! Per-frame pipeline outputs and the actuator seam.

use serde::{Deserialize, Serialize};

use crate::geometry::{Defect, HandPair, Handedness, Palm, Polygon, PrincipalAxes};

/// Everything the tracker learned about one hand in one frame.
///
/// `defects`, `wrist` and the hull indices refer into `boundary`, which is
/// carried along so consumers can render or post-process the region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandReport {
    pub handedness: Handedness,
    pub boundary: Polygon,
    pub palm: Palm,
    /// Sensor distance (meters) under the palm center.
    pub palm_depth: f32,
    pub axes: Option<PrincipalAxes>,
    pub hull: Vec<usize>,
    pub defects: Vec<Defect>,
    pub wrist: Option<(usize, usize)>,
    /// Fingertip positions in grid coordinates, boundary order.
    pub fingertips: Vec<[f64; 2]>,
    /// Sensor distance of the closest fingertip, when any tip was found.
    pub tip_depth: Option<f32>,
    /// Debounced pinch-click state for this hand.
    pub clicking: bool,
}

/// Result of one hand-tracker frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerReport {
    pub hands: HandPair<HandReport>,
    /// Whether a background reference existed when this frame was processed
    /// (i.e. diff mode ran rather than the absolute fallback).
    pub background_sampled: bool,
}

/// Result of one pointer-tracker frame, present when a cluster was tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Selected tip cell in grid coordinates.
    pub tip: [usize; 2],
    /// Tip mapped onto the output screen.
    pub screen: [i32; 2],
    /// Debounced click state.
    pub clicking: bool,
}

/// Pointer-side effects, in emission order within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    MoveTo { x: i32, y: i32 },
    ButtonDown(u8),
    ButtonUp(u8),
}

/// Sink for pointer events. Production implementations inject them into a
/// windowing system; tests record them.
pub trait Actuator {
    fn move_to(&mut self, x: i32, y: i32);
    fn button_down(&mut self, button: u8);
    fn button_up(&mut self, button: u8);
}

/// Actuator that records events, for tests and replay inspection.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<PointerEvent>,
}

impl Actuator for EventLog {
    fn move_to(&mut self, x: i32, y: i32) {
        self.events.push(PointerEvent::MoveTo { x, y });
    }

    fn button_down(&mut self, button: u8) {
        self.events.push(PointerEvent::ButtonDown(button));
    }

    fn button_up(&mut self, button: u8) {
        self.events.push(PointerEvent::ButtonUp(button));
    }
}
