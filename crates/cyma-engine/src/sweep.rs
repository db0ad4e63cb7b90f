pub const SWEEP_MIN_HZ: f32 = 20.0;
pub const SWEEP_MAX_HZ: f32 = 20000.0;
/// Seconds for one pass from one end of the range to the other.
pub const SWEEP_DURATION: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Rising,
    Falling,
}

/// Logarithmic ping-pong sweep across the audible range, used to drive a
/// lens's wave frequency.
#[derive(Debug, Clone)]
pub struct FrequencySweep {
    pub enabled: bool,
    pub direction: SweepDirection,
    elapsed: f32,
}

impl Default for FrequencySweep {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: SweepDirection::Rising,
            elapsed: 0.0,
        }
    }
}

impl FrequencySweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the sweep on or off. Turning it on restarts the current pass.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.elapsed = 0.0;
        }
        self.enabled = enabled;
    }

    /// Advance by `delta` seconds and return the swept frequency, or `None`
    /// while disabled.
    ///
    /// At the end of a pass the frequency sits on the endpoint for that frame,
    /// then the direction flips and the next pass starts from there.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        self.elapsed += delta;
        let mut progress = self.elapsed / SWEEP_DURATION;
        let direction = self.direction;
        if progress >= 1.0 {
            progress = 1.0;
            self.elapsed = 0.0;
            self.direction = match self.direction {
                SweepDirection::Rising => SweepDirection::Falling,
                SweepDirection::Falling => SweepDirection::Rising,
            };
        }
        Some(sweep_frequency(progress, direction))
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.direction = SweepDirection::Rising;
    }
}

/// Frequency at `progress` (0..1) of a pass in `direction`.
pub fn sweep_frequency(progress: f32, direction: SweepDirection) -> f32 {
    let min_log = SWEEP_MIN_HZ.ln();
    let max_log = SWEEP_MAX_HZ.ln();
    let p = progress.clamp(0.0, 1.0);
    let log_freq = match direction {
        SweepDirection::Rising => min_log + p * (max_log - min_log),
        SweepDirection::Falling => max_log - p * (max_log - min_log),
    };
    log_freq.exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sweep_yields_nothing() {
        let mut sweep = FrequencySweep::new();
        assert_eq!(sweep.advance(1.0), None);
    }

    #[test]
    fn test_sweep_is_logarithmic() {
        // Halfway through is the geometric mean of the range.
        let mid = sweep_frequency(0.5, SweepDirection::Rising);
        assert!((mid - (20.0f32 * 20000.0).sqrt()).abs() < 0.5);
        assert!((sweep_frequency(0.0, SweepDirection::Rising) - 20.0).abs() < 1e-2);
        assert!((sweep_frequency(0.0, SweepDirection::Falling) - 20000.0).abs() < 1.0);
    }

    #[test]
    fn test_sweep_ping_pongs() {
        let mut sweep = FrequencySweep::new();
        sweep.set_enabled(true);
        let top = sweep.advance(60.0).unwrap();
        assert!((top - 20000.0).abs() < 1.0);
        assert_eq!(sweep.direction, SweepDirection::Falling);
        let next = sweep.advance(1.0).unwrap();
        assert!(next < top && next > 10000.0);
    }

    #[test]
    fn test_sweep_rises_monotonically() {
        let mut sweep = FrequencySweep::new();
        sweep.set_enabled(true);
        let mut last = 0.0;
        for _ in 0..100 {
            let f = sweep.advance(0.5).unwrap();
            assert!(f > last);
            last = f;
        }
    }
}
