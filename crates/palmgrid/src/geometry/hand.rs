//! Per-hand bookkeeping. The pipeline tracks at most two hands per frame.

use std::fmt;

use super::polygon::Polygon;

/// Upper bound on simultaneously tracked hands.
pub const MAX_HANDS: usize = 2;

/// Which hand a region is attributed to. The sensor faces the user, so the
/// hand appearing at smaller image x is the user's right hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// Returned when a third hand is pushed into a [`HandPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hand pair already holds {MAX_HANDS} entries")
    }
}

impl std::error::Error for CapacityError {}

/// Fixed-capacity container for up to [`MAX_HANDS`] per-frame hand records.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HandPair<T> {
    slots: Vec<T>,
}

impl<T> HandPair<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_HANDS),
        }
    }

    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.slots.len() >= MAX_HANDS {
            return Err(CapacityError);
        }
        self.slots.push(item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T> Default for HandPair<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for HandPair<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

/// Keep the up-to-two largest polygons whose area passes `min_area`,
/// largest first.
pub fn select_hand_polygons(polygons: Vec<Polygon>, min_area: f64) -> HandPair<Polygon> {
    let mut candidates: Vec<(f64, Polygon)> = polygons
        .into_iter()
        .filter_map(|p| {
            let area = p.area();
            (area >= min_area).then_some((area, p))
        })
        .collect();
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut pair = HandPair::new();
    for (_, poly) in candidates.into_iter().take(MAX_HANDS) {
        // Length is capped by take(MAX_HANDS) above.
        let _ = pair.push(poly);
    }
    pair
}
