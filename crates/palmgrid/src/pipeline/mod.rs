//! Frame-to-report pipelines and their delivery plumbing.
//!
//! Two trackers share the lower stages but serve different gestures:
//!
//! * [`HandTracker`] segments up to two hands against a background model and
//!   reports palm, axes, hull, wrist and fingertips per hand.
//! * [`PointerTracker`] clips to the near field, clusters what remains and
//!   drives an [`Actuator`] like a mouse.
//!
//! [`Session`] and [`frame_queue`] carry frames from a source thread into
//! either tracker without blocking the source.

mod hand_tracker;
mod pointer;
mod report;
mod session;

pub use hand_tracker::HandTracker;
pub use pointer::PointerTracker;
pub use report::{Actuator, EventLog, HandReport, PointerEvent, PointerSample, TrackerReport};
pub use session::{frame_queue, FrameSender, Session, DEFAULT_QUEUE_DEPTH};
