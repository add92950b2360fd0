//! Hysteresis debounce for noisy scalar signals.
//!
//! A state flip is proposed when the input crosses the upper (rising) or
//! lower (falling) threshold, and committed only after the proposal survives
//! `debounce_ticks` further samples. Samples in the dead band between the
//! thresholds neither propose nor cancel anything.

/// Debounced two-threshold comparator.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    upper: f32,
    lower: f32,
    debounce_ticks: u32,
    tick: u32,
    pending: Option<bool>,
    reported: bool,
}

impl Hysteresis {
    /// `upper` must be at or above `lower`; samples at or above `upper`
    /// drive toward `true`, at or below `lower` toward `false`.
    pub fn new(upper: f32, lower: f32, debounce_ticks: u32) -> Self {
        debug_assert!(upper >= lower, "hysteresis bounds inverted");
        Self {
            upper,
            lower,
            debounce_ticks,
            tick: 0,
            pending: None,
            reported: false,
        }
    }

    /// Feed one sample and return the debounced state.
    pub fn update(&mut self, value: f32) -> bool {
        if value >= self.upper {
            self.advance(true);
        } else if value <= self.lower {
            self.advance(false);
        }
        self.reported
    }

    /// Drop any in-flight proposal and force the committed state.
    pub fn reset(&mut self, state: bool) {
        self.reported = state;
        self.pending = None;
        self.tick = 0;
    }

    /// The last committed state, without consuming a sample.
    pub fn state(&self) -> bool {
        self.reported
    }

    fn advance(&mut self, target: bool) {
        if target == self.reported {
            self.pending = None;
            self.tick = 0;
            return;
        }
        if self.pending != Some(target) {
            // Direction change restarts the debounce.
            self.pending = Some(target);
            self.tick = 0;
        }
        if self.tick >= self.debounce_ticks {
            self.reported = target;
            self.pending = None;
            self.tick = 0;
        } else {
            self.tick += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_debounce() {
        let mut h = Hysteresis::new(1.0, 0.0, 2);
        let reported: Vec<bool> = [1.2, 1.2, 1.2].iter().map(|&v| h.update(v)).collect();
        assert_eq!(reported, vec![false, false, true]);
    }

    #[test]
    fn test_falling_edge_debounce() {
        let mut h = Hysteresis::new(1.0, 0.0, 2);
        h.reset(true);
        assert!(h.state());
        let reported: Vec<bool> = [-0.2, -0.2, -0.2].iter().map(|&v| h.update(v)).collect();
        assert_eq!(reported, vec![true, true, false]);
    }

    #[test]
    fn test_dead_band_is_inert() {
        let mut h = Hysteresis::new(1.0, 0.0, 2);
        h.update(1.2);
        // Mid-band samples neither commit nor cancel the rising proposal.
        assert!(!h.update(0.5));
        assert!(!h.update(0.5));
        h.update(1.2);
        assert!(h.update(1.2));
    }

    #[test]
    fn test_direction_flip_restarts_count() {
        let mut h = Hysteresis::new(1.0, 0.0, 1);
        h.update(1.2);
        // A falling sample abandons the rising proposal.
        assert!(!h.update(-0.5));
        assert!(!h.update(1.2));
        assert!(h.update(1.2));
    }

    #[test]
    #[should_panic(expected = "hysteresis bounds inverted")]
    fn test_inverted_bounds_rejected() {
        let _ = Hysteresis::new(0.0, 1.0, 2);
    }

    #[test]
    fn test_zero_debounce_commits_immediately() {
        let mut h = Hysteresis::new(1.0, 0.0, 0);
        assert!(h.update(1.0));
        assert!(!h.update(0.0));
    }
}
